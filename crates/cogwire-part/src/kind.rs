//! Closed set of part categories.

use std::fmt;

/// The category a part belongs to.
///
/// Forms the first tier of the element ordering, so that parts of the
/// same kind tick together. The declaration order is the ordering and
/// must stay stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartKind {
    /// Reads aspects from the world.
    Reader,
    /// Writes values into the world.
    Writer,
    /// Displays a value.
    Panel,
    /// Bridges a network to something outside it.
    Interface,
    /// Carries connectivity only.
    Connector,
}

impl PartKind {
    /// All kinds in ordering order.
    pub const ALL: [PartKind; 5] = [
        PartKind::Reader,
        PartKind::Writer,
        PartKind::Panel,
        PartKind::Interface,
        PartKind::Connector,
    ];

    /// Stable ordinal.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Lower-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Reader => "reader",
            Self::Writer => "writer",
            Self::Panel => "panel",
            Self::Interface => "interface",
            Self::Connector => "connector",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_matches_order() {
        for pair in PartKind::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].ordinal() < pair[1].ordinal());
        }
    }
}
