//! Restartable one-shot countdown used for paced sequences and effects.

use bevy::prelude::*;
use std::time::Duration;

/// A one-shot timer that can be restarted or cancelled at any point.
///
/// Starting a countdown that is already running throws the old one away, so
/// two runs of the same sequence never overlap.
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    timer: Option<Timer>,
}

impl Countdown {
    /// Start (or restart) the countdown.
    pub fn start(&mut self, seconds: f32) {
        self.timer = Some(Timer::from_seconds(seconds.max(0.0), TimerMode::Once));
    }

    pub fn cancel(&mut self) {
        self.timer = None;
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Advance the countdown. Returns `true` on the tick it runs out.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };

        if timer.tick(delta).finished() {
            self.timer = None;
            return true;
        }
        false
    }

    /// Progress through the countdown in `[0, 1]`; 1 when idle.
    pub fn fraction(&self) -> f32 {
        self.timer.as_ref().map_or(1.0, Timer::fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_fires_once() {
        let mut countdown = Countdown::default();
        countdown.start(1.0);

        assert!(!countdown.tick(Duration::from_millis(500)));
        assert!(countdown.is_running());
        assert!(countdown.tick(Duration::from_millis(500)));
        assert!(!countdown.is_running());
        assert!(!countdown.tick(Duration::from_millis(500)));
    }

    #[test]
    fn test_restart_discards_previous_run() {
        let mut countdown = Countdown::default();
        countdown.start(1.0);
        countdown.tick(Duration::from_millis(900));

        countdown.start(1.0);
        assert!(!countdown.tick(Duration::from_millis(200)));
        assert!((countdown.fraction() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_cancel_stops_countdown() {
        let mut countdown = Countdown::default();
        countdown.start(0.3);
        countdown.cancel();
        assert!(!countdown.tick(Duration::from_secs(1)));
        assert_eq!(countdown.fraction(), 1.0);
    }
}
