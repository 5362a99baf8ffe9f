//! Per-tick and cumulative network metrics.
//!
//! [`TickReport`] describes a single tick and is returned by
//! [`Network::tick`](crate::Network::tick). [`NetworkMetrics`]
//! accumulates across ticks and is read from the network.

use cogwire_core::TickId;

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The tick this report describes.
    pub tick_id: TickId,
    /// Elements whose update ran to completion.
    pub updated: u32,
    /// Elements that were due but ran out of energy.
    pub deferred: u32,
    /// Elements skipped because their state was unreachable.
    pub skipped_unreachable: u32,
    /// Elements whose update returned an error.
    pub failed: u32,
    /// Elements due this tick, whether or not they ran.
    pub due: u32,
    /// Energy spent on updates this tick.
    pub energy_consumed: u64,
    /// Wall-clock time for the whole tick, in microseconds.
    pub total_us: u64,
}

/// Counters accumulated over the network's lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkMetrics {
    /// Ticks executed.
    pub ticks: u64,
    /// Total completed updates.
    pub updates: u64,
    /// Total deferrals.
    pub deferrals: u64,
    /// Total failed updates.
    pub failures: u64,
    /// Total energy spent.
    pub energy_consumed: u64,
    /// Times an element crossed the starvation threshold.
    pub starvation_events: u64,
    /// The most recent tick's report.
    pub last_tick: TickReport,
}

impl NetworkMetrics {
    pub(crate) fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.updates += u64::from(report.updated);
        self.deferrals += u64::from(report.deferred);
        self.failures += u64::from(report.failed);
        self.energy_consumed = self.energy_consumed.saturating_add(report.energy_consumed);
        self.last_tick = report.clone();
    }
}
