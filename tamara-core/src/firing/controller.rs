//! Firing controller implementation

use crate::config::{MAX_DURATION_MS, MIN_DURATION_MS};
use crate::traits::{Channel, Level, OutputDriver};

/// Errors from the firing controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FiringError {
    /// A session is already in progress
    AlreadyFiring,
}

/// Live record of an in-progress firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FiringSession {
    /// Energized channel
    pub channel: Channel,
    /// Configured duration (ms)
    pub duration_ms: u32,
    /// Timestamp the output went HIGH (ms)
    pub start_ms: u32,
}

impl FiringSession {
    /// Time since the output went HIGH
    ///
    /// Wrapping, so a session spanning the millisecond counter rollover
    /// still measures correctly.
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.start_ms)
    }

    /// Check if the deadline has been reached
    pub fn is_expired(&self, now_ms: u32) -> bool {
        self.elapsed_ms(now_ms) >= self.duration_ms
    }
}

/// Summary of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FiringReport {
    /// Channel that was energized
    pub channel: Channel,
    /// Configured duration (ms)
    pub duration_ms: u32,
    /// Measured time between HIGH and LOW (ms)
    pub energized_ms: u32,
}

impl FiringReport {
    /// Time energized beyond the configured duration
    pub fn overshoot_ms(&self) -> u32 {
        self.energized_ms.saturating_sub(self.duration_ms)
    }
}

/// Owner of the output stage and the (at most one) firing session
///
/// Invariant: while a session exists its channel is HIGH and the other
/// channel is LOW; otherwise both are LOW.
pub struct FiringController<O> {
    outputs: O,
    session: Option<FiringSession>,
}

impl<O: OutputDriver> FiringController<O> {
    /// Take ownership of the output stage
    ///
    /// Both channels are driven LOW immediately.
    pub fn new(mut outputs: O) -> Self {
        outputs.all_low();
        Self {
            outputs,
            session: None,
        }
    }

    /// Energize a channel for the given duration
    ///
    /// The duration is clamped into the allowed range but not rounded to
    /// the configuration step. The other channel
    /// is driven LOW before this one goes HIGH, so both are never HIGH
    /// together.
    pub fn start(
        &mut self,
        channel: Channel,
        duration_ms: u32,
        now_ms: u32,
    ) -> Result<(), FiringError> {
        if self.session.is_some() {
            warn!("Start rejected: already firing");
            return Err(FiringError::AlreadyFiring);
        }

        let duration_ms = duration_ms.clamp(MIN_DURATION_MS, MAX_DURATION_MS);
        self.session = Some(FiringSession {
            channel,
            duration_ms,
            start_ms: now_ms,
        });

        self.outputs.set(channel.other(), Level::Low);
        self.outputs.set(channel, Level::High);

        info!(
            "Firing output {} for {} ms",
            channel.number(),
            duration_ms
        );
        Ok(())
    }

    /// Advance the session timer
    ///
    /// Must be called every loop iteration while a session is active;
    /// this is the only thing that ends a session on time. Returns the
    /// report if the session ended on this tick.
    pub fn tick(&mut self, now_ms: u32) -> Option<FiringReport> {
        let session = self.session?;
        if !session.is_expired(now_ms) {
            return None;
        }

        self.finish(now_ms)
    }

    /// Stop the session now
    ///
    /// Idempotent: with no session this is a no-op and performs no
    /// output writes. Usable at any time as an abort path.
    pub fn stop(&mut self, now_ms: u32) -> Option<FiringReport> {
        self.finish(now_ms)
    }

    fn finish(&mut self, now_ms: u32) -> Option<FiringReport> {
        let session = self.session.take()?;
        self.outputs.all_low();

        let report = FiringReport {
            channel: session.channel,
            duration_ms: session.duration_ms,
            energized_ms: session.elapsed_ms(now_ms),
        };

        info!(
            "Output {} off after {} ms (configured {} ms)",
            report.channel.number(),
            report.energized_ms,
            report.duration_ms
        );
        Some(report)
    }

    /// Check if a session is in progress
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Current session, if any
    pub fn session(&self) -> Option<&FiringSession> {
        self.session.as_ref()
    }

    /// Time left before the deadline
    ///
    /// Saturates to 0 once the deadline has passed, even if `tick` has
    /// not run yet. Returns 0 with no session.
    pub fn remaining(&self, now_ms: u32) -> u32 {
        self.session
            .map(|s| s.duration_ms.saturating_sub(s.elapsed_ms(now_ms)))
            .unwrap_or(0)
    }

    /// Fraction of the duration elapsed, clamped to `0.0..=1.0`
    ///
    /// Returns 0.0 with no session.
    pub fn progress(&self, now_ms: u32) -> f32 {
        match self.session {
            Some(s) => {
                let fraction = s.elapsed_ms(now_ms) as f32 / s.duration_ms as f32;
                fraction.clamp(0.0, 1.0)
            }
            None => 0.0,
        }
    }

    /// Access the output driver
    pub fn outputs(&self) -> &O {
        &self.outputs
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Mock output stage recording levels and write counts
    ///
    /// Flags any moment where both channels are HIGH.
    #[derive(Debug, Default)]
    pub struct MockOutputs {
        pub high: [bool; 2],
        pub writes: u32,
        pub high_writes: u32,
        pub both_high_seen: bool,
    }

    impl MockOutputs {
        pub fn is_high(&self, channel: Channel) -> bool {
            self.high[channel.index()]
        }

        pub fn none_high(&self) -> bool {
            !self.high[0] && !self.high[1]
        }
    }

    impl OutputDriver for MockOutputs {
        fn set(&mut self, channel: Channel, level: Level) {
            self.high[channel.index()] = level.is_high();
            self.writes += 1;
            if level.is_high() {
                self.high_writes += 1;
            }
            if self.high[0] && self.high[1] {
                self.both_high_seen = true;
            }
        }
    }

    fn controller() -> FiringController<MockOutputs> {
        FiringController::new(MockOutputs::default())
    }

    #[test]
    fn test_new_forces_low() {
        let ctrl = FiringController::new(MockOutputs {
            high: [true, false],
            ..Default::default()
        });
        assert!(ctrl.outputs().none_high());
        assert!(!ctrl.is_active());
    }

    #[test]
    fn test_start_energizes_one_channel() {
        let mut ctrl = controller();
        ctrl.start(Channel::One, 1000, 0).unwrap();

        assert!(ctrl.is_active());
        assert!(ctrl.outputs().is_high(Channel::One));
        assert!(!ctrl.outputs().is_high(Channel::Two));
        assert_eq!(ctrl.outputs().high_writes, 1);
    }

    #[test]
    fn test_start_channel_two() {
        let mut ctrl = controller();
        ctrl.start(Channel::Two, 100, 0).unwrap();

        assert!(ctrl.outputs().is_high(Channel::Two));
        assert!(!ctrl.outputs().is_high(Channel::One));
    }

    #[test]
    fn test_already_firing() {
        let mut ctrl = controller();
        ctrl.start(Channel::One, 1000, 0).unwrap();

        assert_eq!(
            ctrl.start(Channel::Two, 1000, 10),
            Err(FiringError::AlreadyFiring)
        );
        // Original session untouched
        assert_eq!(ctrl.session().unwrap().channel, Channel::One);
        assert!(!ctrl.outputs().is_high(Channel::Two));
        assert!(!ctrl.outputs().both_high_seen);
    }

    #[test]
    fn test_tick_before_deadline() {
        let mut ctrl = controller();
        ctrl.start(Channel::One, 1000, 0).unwrap();

        assert_eq!(ctrl.tick(999), None);
        assert!(ctrl.is_active());
        assert!(ctrl.outputs().is_high(Channel::One));
    }

    #[test]
    fn test_tick_at_deadline() {
        let mut ctrl = controller();
        ctrl.start(Channel::One, 1000, 500).unwrap();

        let report = ctrl.tick(1500).unwrap();
        assert_eq!(report.energized_ms, 1000);
        assert_eq!(report.overshoot_ms(), 0);
        assert!(!ctrl.is_active());
        assert!(ctrl.outputs().none_high());
    }

    #[test]
    fn test_tick_past_deadline_reports_overshoot() {
        let mut ctrl = controller();
        ctrl.start(Channel::Two, 300, 0).unwrap();

        let report = ctrl.tick(340).unwrap();
        assert_eq!(report.channel, Channel::Two);
        assert_eq!(report.overshoot_ms(), 40);
        assert!(ctrl.outputs().none_high());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut ctrl = controller();
        ctrl.start(Channel::One, 1000, 0).unwrap();

        assert!(ctrl.stop(200).is_some());
        let writes = ctrl.outputs().writes;

        assert_eq!(ctrl.stop(300), None);
        assert_eq!(ctrl.stop(400), None);
        assert_eq!(ctrl.outputs().writes, writes);
        assert!(ctrl.outputs().none_high());
    }

    #[test]
    fn test_stop_without_session() {
        let mut ctrl = controller();
        let writes = ctrl.outputs().writes;
        assert_eq!(ctrl.stop(0), None);
        assert_eq!(ctrl.outputs().writes, writes);
    }

    #[test]
    fn test_remaining_saturates() {
        let mut ctrl = controller();
        assert_eq!(ctrl.remaining(0), 0);

        ctrl.start(Channel::One, 1000, 100).unwrap();
        assert_eq!(ctrl.remaining(100), 1000);
        assert_eq!(ctrl.remaining(600), 500);
        assert_eq!(ctrl.remaining(1100), 0);
        // Deadline passed, tick not yet run
        assert_eq!(ctrl.remaining(5000), 0);
    }

    #[test]
    fn test_progress_clamped() {
        let mut ctrl = controller();
        assert_eq!(ctrl.progress(0), 0.0);

        ctrl.start(Channel::One, 1000, 0).unwrap();
        assert_eq!(ctrl.progress(0), 0.0);
        assert_eq!(ctrl.progress(250), 0.25);
        assert_eq!(ctrl.progress(1000), 1.0);
        assert_eq!(ctrl.progress(3000), 1.0);
    }

    #[test]
    fn test_counter_rollover() {
        let mut ctrl = controller();
        let start = u32::MAX - 50;
        ctrl.start(Channel::One, 100, start).unwrap();

        assert_eq!(ctrl.tick(start.wrapping_add(60)), None);
        assert_eq!(ctrl.remaining(start.wrapping_add(60)), 40);

        let report = ctrl.tick(start.wrapping_add(100)).unwrap();
        assert_eq!(report.energized_ms, 100);
        assert!(ctrl.outputs().none_high());
    }

    #[test]
    fn test_duration_clamped_on_start() {
        let mut ctrl = controller();
        ctrl.start(Channel::One, 0, 0).unwrap();
        assert_eq!(ctrl.session().unwrap().duration_ms, 100);
        ctrl.stop(0);

        ctrl.start(Channel::One, 60_000, 0).unwrap();
        assert_eq!(ctrl.session().unwrap().duration_ms, 10_000);
    }

    #[test]
    fn test_start_keeps_off_step_duration() {
        let mut ctrl = controller();
        ctrl.start(Channel::One, 250, 0).unwrap();
        assert_eq!(ctrl.session().unwrap().duration_ms, 250);

        assert_eq!(ctrl.tick(200), None);
        assert!(ctrl.outputs().is_high(Channel::One));

        let report = ctrl.tick(250).unwrap();
        assert_eq!(report.energized_ms, 250);
        assert!(ctrl.outputs().none_high());
    }

    #[test]
    fn test_restart_after_finish() {
        let mut ctrl = controller();
        ctrl.start(Channel::One, 100, 0).unwrap();
        ctrl.tick(100);

        ctrl.start(Channel::Two, 100, 200).unwrap();
        assert!(ctrl.outputs().is_high(Channel::Two));
        assert!(!ctrl.outputs().is_high(Channel::One));
        assert!(!ctrl.outputs().both_high_seen);
    }
}
