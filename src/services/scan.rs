//! Scanner re-entrancy guard
//!
//! A camera feed decodes the same physical code many times per second. The
//! guard latches on the first accepted frame so one code triggers exactly
//! one transition, and re-arms only after a cooldown once the outcome is
//! processed. Transitions take an explicit instant so the timing behavior
//! is testable without real delays.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardState {
    /// Accepting the next frame.
    Ready,
    /// A frame is being processed; further frames are ignored.
    Latched,
    /// Rejected or finished; frames are ignored until the instant passes.
    CoolingDown { until: Instant },
}

#[derive(Debug, Clone)]
pub struct ScanGuard {
    cooldown: Duration,
    state: GuardState,
}

impl ScanGuard {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            state: GuardState::Ready,
        }
    }

    /// Try to claim the guard for one frame. Returns false while a frame
    /// is in flight or the cooldown has not elapsed.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        match self.state {
            GuardState::Ready => {
                self.state = GuardState::Latched;
                true
            }
            GuardState::Latched => false,
            GuardState::CoolingDown { until } => {
                if now >= until {
                    self.state = GuardState::Latched;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// The frame's outcome was an error; ignore frames for the cooldown so
    /// the same code still in front of the camera does not re-trigger.
    pub fn lockout(&mut self, now: Instant) {
        self.state = GuardState::CoolingDown {
            until: now + self.cooldown,
        };
    }

    /// The outcome was fully processed (screen changed, modal closed);
    /// accept the next frame immediately.
    pub fn rearm(&mut self) {
        self.state = GuardState::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> (ScanGuard, Instant) {
        (ScanGuard::new(Duration::from_secs(2)), Instant::now())
    }

    #[test]
    fn one_frame_latches_out_the_rest() {
        let (mut guard, t0) = guard();
        assert!(guard.try_acquire(t0));
        assert!(!guard.try_acquire(t0));
        assert!(!guard.try_acquire(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn lockout_refuses_frames_until_cooldown_elapses() {
        let (mut guard, t0) = guard();
        assert!(guard.try_acquire(t0));
        guard.lockout(t0);

        assert!(!guard.try_acquire(t0 + Duration::from_millis(1999)));
        assert!(guard.try_acquire(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn rearm_accepts_the_next_frame_immediately() {
        let (mut guard, t0) = guard();
        assert!(guard.try_acquire(t0));
        guard.rearm();
        assert!(guard.try_acquire(t0));
    }
}
