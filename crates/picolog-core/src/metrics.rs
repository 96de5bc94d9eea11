//! Loop-timing diagnostics backing the `TIME` command.

use core::fmt::Display;

/// Timing figures for the control loop, refreshed once per cycle.
///
/// Query execution runs synchronously inside the cycle, so a heavy
/// SELECT directly lengthens that cycle's sampling period; these numbers
/// are how a client observes that cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopMetrics {
    /// Completed control-loop cycles since boot.
    pub cycles: u64,
    /// Duration of the most recent full cycle, in microseconds
    /// (excluding the end-of-cycle idle delay).
    pub last_cycle_us: u64,
    /// Portion of the last cycle spent draining input and dispatching.
    pub last_dispatch_us: u64,
    /// Portion of the last cycle spent acquiring and storing the sample.
    pub last_sample_us: u64,
}

impl LoopMetrics {
    pub fn record_cycle(&mut self, cycle_us: u64, dispatch_us: u64, sample_us: u64) {
        self.cycles += 1;
        self.last_cycle_us = cycle_us;
        self.last_dispatch_us = dispatch_us;
        self.last_sample_us = sample_us;
    }
}

impl Display for LoopMetrics {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "[LoopMetrics] cycles: {}, cycle: {} us, dispatch: {} us, sample: {} us",
            self.cycles, self.last_cycle_us, self.last_dispatch_us, self.last_sample_us
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_cycle_tracks_latest_figures() {
        let mut metrics = LoopMetrics::default();
        metrics.record_cycle(900, 300, 600);
        metrics.record_cycle(1100, 400, 700);

        assert_eq!(metrics.cycles, 2);
        assert_eq!(metrics.last_cycle_us, 1100);
        assert_eq!(metrics.last_dispatch_us, 400);
        assert_eq!(metrics.last_sample_us, 700);
    }
}
