//! Playback clock.
//!
//! The clock is the single owner of "current timeline time". Everything
//! downstream (the timeline-to-source mapper, the playback tracker) receives
//! that time as a plain argument on each tick instead of reading shared
//! mutable state.

use std::time::Duration;

/// Transport state of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Playing,
    Paused,
    /// Playback reached the end of the timeline.
    Ended,
}

/// A playback clock over a timeline of known duration (seconds).
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    position_secs: f64,
    duration_secs: f64,
    rate: f64,
    state: TransportState,
}

impl PlaybackClock {
    /// Create a paused clock at 0 over a timeline of `duration_secs`.
    pub fn new(duration_secs: f64) -> Self {
        Self {
            position_secs: 0.0,
            duration_secs: duration_secs.max(0.0),
            rate: 1.0,
            state: TransportState::Paused,
        }
    }

    /// Current timeline time in seconds.
    pub fn position(&self) -> f64 {
        self.position_secs
    }

    /// Timeline duration the clock runs over.
    pub fn duration(&self) -> f64 {
        self.duration_secs
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    /// Start or resume playback. Restarts from 0 if the clock had ended.
    pub fn play(&mut self) {
        if self.state == TransportState::Ended || self.position_secs >= self.duration_secs {
            self.position_secs = 0.0;
        }
        self.state = TransportState::Playing;
    }

    pub fn pause(&mut self) {
        if self.state == TransportState::Playing {
            self.state = TransportState::Paused;
        }
    }

    /// Jump to `secs`, clamped to `[0, duration]`.
    pub fn seek(&mut self, secs: f64) {
        self.position_secs = secs.clamp(0.0, self.duration_secs);
        if self.state == TransportState::Ended && self.position_secs < self.duration_secs {
            self.state = TransportState::Paused;
        }
    }

    /// Set the playback rate (1.0 = realtime). Negative rates are clamped to 0.
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.max(0.0);
    }

    /// Replace the timeline duration after the clip sequence changed.
    /// The current position is clamped to the new duration.
    pub fn set_duration(&mut self, duration_secs: f64) {
        self.duration_secs = duration_secs.max(0.0);
        self.position_secs = self.position_secs.min(self.duration_secs);
    }

    /// Advance by a wall-clock interval and return the new position.
    ///
    /// Only moves while playing. Reaching the duration stops the clock in
    /// the `Ended` state with the position pinned at the duration.
    pub fn advance(&mut self, elapsed: Duration) -> f64 {
        if self.state != TransportState::Playing {
            return self.position_secs;
        }

        let next = self.position_secs + elapsed.as_secs_f64() * self.rate;
        if next >= self.duration_secs {
            self.position_secs = self.duration_secs;
            self.state = TransportState::Ended;
        } else {
            self.position_secs = next;
        }
        self.position_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_clock_does_not_advance() {
        let mut clock = PlaybackClock::new(10.0);
        assert_eq!(clock.advance(Duration::from_millis(500)), 0.0);
    }

    #[test]
    fn test_advance_scales_with_rate() {
        let mut clock = PlaybackClock::new(10.0);
        clock.set_rate(2.0);
        clock.play();
        let pos = clock.advance(Duration::from_millis(250));
        assert!((pos - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_clock_ends_at_duration() {
        let mut clock = PlaybackClock::new(1.0);
        clock.play();
        clock.advance(Duration::from_millis(700));
        let pos = clock.advance(Duration::from_millis(700));
        assert_eq!(pos, 1.0);
        assert_eq!(clock.state(), TransportState::Ended);

        // Playing again restarts from the top
        clock.play();
        assert_eq!(clock.position(), 0.0);
        assert!(clock.is_playing());
    }

    #[test]
    fn test_seek_clamps() {
        let mut clock = PlaybackClock::new(8.0);
        clock.seek(-3.0);
        assert_eq!(clock.position(), 0.0);
        clock.seek(12.0);
        assert_eq!(clock.position(), 8.0);
    }

    #[test]
    fn test_shrinking_duration_clamps_position() {
        let mut clock = PlaybackClock::new(8.0);
        clock.seek(6.0);
        clock.set_duration(5.0);
        assert_eq!(clock.position(), 5.0);
    }
}
