//! Network configuration, validation, and error types.
//!
//! [`NetworkConfig`] is the builder-input for constructing a network.
//! [`validate()`](NetworkConfig::validate) checks its invariants once,
//! at construction, so the tick loop never has to.

use thiserror::Error;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`NetworkConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A budget of zero would defer every consuming element forever.
    #[error("energy_per_tick must be at least 1 (use None for unlimited)")]
    ZeroEnergyBudget,
    /// A starvation threshold of zero would warn on every tick.
    #[error("max_deferred_ticks must be at least 1 (use None to disable)")]
    ZeroDeferralCap,
}

// ── NetworkConfig ──────────────────────────────────────────────────

/// Per-network tuning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Energy available per tick. `None` = unlimited. Default: `None`.
    ///
    /// The budget is fresh every tick; unspent energy does not carry over.
    pub energy_per_tick: Option<u64>,
    /// Consecutive deferrals after which an element is reported as
    /// starved. `None` = never report. Default: `None`.
    ///
    /// Starved elements are logged, never dropped.
    pub max_deferred_ticks: Option<u32>,
}

impl NetworkConfig {
    /// Config with a fixed energy budget per tick.
    pub fn with_energy(energy_per_tick: u64) -> Self {
        Self {
            energy_per_tick: Some(energy_per_tick),
            ..Self::default()
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.energy_per_tick == Some(0) {
            return Err(ConfigError::ZeroEnergyBudget);
        }
        if self.max_deferred_ticks == Some(0) {
            return Err(ConfigError::ZeroDeferralCap);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlimited_and_valid() {
        let cfg = NetworkConfig::default();
        assert_eq!(cfg.energy_per_tick, None);
        assert_eq!(cfg.max_deferred_ticks, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_budget_rejected() {
        assert_eq!(
            NetworkConfig::with_energy(0).validate(),
            Err(ConfigError::ZeroEnergyBudget)
        );
        assert!(NetworkConfig::with_energy(1).validate().is_ok());
    }

    #[test]
    fn zero_deferral_cap_rejected() {
        let cfg = NetworkConfig {
            max_deferred_ticks: Some(0),
            ..NetworkConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroDeferralCap));
    }
}
