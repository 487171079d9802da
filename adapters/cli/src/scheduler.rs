//! Paces the main loop at the simulation's tick cadence.

use std::time::{Duration, Instant};

/// Target interval between two ticks (~60 Hz).
pub(crate) const FRAME_INTERVAL: Duration = Duration::from_micros(16_666);

/// Floor for the computed interval, so a long stall never degenerates
/// into a zero-length busy spin.
const MINIMUM_INTERVAL: Duration = Duration::from_micros(8_333);

/// Computes how long the loop should wait before its next tick.
///
/// A tick that ran late shortens the following interval by the overage,
/// down to half a frame, so the loop catches back up to the target
/// cadence instead of drifting.
#[derive(Debug, Default)]
pub(crate) struct TickScheduler {
    last_tick_at: Option<Instant>,
}

impl TickScheduler {
    pub(crate) fn interval_to_next_tick(&mut self, now: Instant) -> Duration {
        let interval = match self.last_tick_at {
            None => FRAME_INTERVAL,
            Some(last) => {
                let overage = now.duration_since(last).saturating_sub(FRAME_INTERVAL);
                FRAME_INTERVAL.saturating_sub(overage).max(MINIMUM_INTERVAL)
            }
        };
        self.last_tick_at = Some(now);
        interval
    }
}
