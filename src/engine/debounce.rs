// FlexSonic — Output Debounce
//
// Holding a gesture must not restart its clip every cycle. The tracker
// remembers what was issued and only emits on an edge; a settled idle cycle
// clears the memory so the same gesture can fire again.

/// Which repeats get suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebouncePolicy {
    /// Suppress only a repeat of the immediately previous track. Switching
    /// between two gestures re-fires on every change.
    LastAction,
    /// Suppress any track already issued since the last idle reset. A track
    /// plays at most once per "hand returns to rest" interval.
    TrackLatch,
}

/// What a settled return to idle does, besides clearing the debounce memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleBehavior {
    /// Clear silently; the current clip plays out on its own.
    Reset,
    /// Also tell the player to stop the current clip.
    StopPlayback,
}

/// Command the tracker asks the cycle loop to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play(u16),
    Stop,
}

/// The engine's only cross-cycle state.
#[derive(Debug)]
pub struct OutputTracker {
    policy: DebouncePolicy,
    on_idle: IdleBehavior,
    last: Option<u16>,
    latched: Vec<u16>,
    active: bool,
}

impl OutputTracker {
    pub fn new(policy: DebouncePolicy, on_idle: IdleBehavior) -> Self {
        Self {
            policy,
            on_idle,
            last: None,
            latched: Vec::new(),
            active: false,
        }
    }

    /// Fold this cycle's arbitration result into the tracker.
    ///
    /// `settled` is the hysteresis gate for the idle reset: with no action
    /// and every sensor back at rest the memory clears (and, under
    /// [`IdleBehavior::StopPlayback`], a stop is emitted once). With no
    /// action but the gyro still inside its release band, nothing changes —
    /// the previous trigger stays suppressed.
    pub fn decide(&mut self, action: Option<u16>, settled: bool) -> Option<PlaybackCommand> {
        match action {
            Some(track) => {
                if self.suppressed(track) {
                    return None;
                }
                self.last = Some(track);
                if self.policy == DebouncePolicy::TrackLatch && !self.latched.contains(&track) {
                    self.latched.push(track);
                }
                self.active = true;
                Some(PlaybackCommand::Play(track))
            }
            None => {
                if !settled {
                    return None;
                }
                let was_active = self.active;
                self.last = None;
                self.latched.clear();
                self.active = false;
                if was_active && self.on_idle == IdleBehavior::StopPlayback {
                    Some(PlaybackCommand::Stop)
                } else {
                    None
                }
            }
        }
    }

    fn suppressed(&self, track: u16) -> bool {
        match self.policy {
            DebouncePolicy::LastAction => self.last == Some(track),
            DebouncePolicy::TrackLatch => self.latched.contains(&track),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_action_emits_only_once() {
        let mut tracker = OutputTracker::new(DebouncePolicy::LastAction, IdleBehavior::Reset);
        assert_eq!(tracker.decide(Some(5), false), Some(PlaybackCommand::Play(5)));
        assert_eq!(tracker.decide(Some(5), false), None);
        assert_eq!(tracker.decide(Some(5), false), None);
    }

    #[test]
    fn idle_reset_rearms_the_same_track() {
        let mut tracker = OutputTracker::new(DebouncePolicy::LastAction, IdleBehavior::Reset);
        assert_eq!(tracker.decide(Some(5), false), Some(PlaybackCommand::Play(5)));
        assert_eq!(tracker.decide(None, true), None);
        // No stale suppression across an idle transition.
        assert_eq!(tracker.decide(Some(5), false), Some(PlaybackCommand::Play(5)));
    }

    #[test]
    fn unsettled_idle_keeps_suppression() {
        let mut tracker = OutputTracker::new(DebouncePolicy::LastAction, IdleBehavior::Reset);
        assert_eq!(tracker.decide(Some(10), false), Some(PlaybackCommand::Play(10)));
        // Gyro dropped below trigger but not below release: no reset yet.
        assert_eq!(tracker.decide(None, false), None);
        assert_eq!(tracker.decide(Some(10), false), None);
        // Fully settled now.
        assert_eq!(tracker.decide(None, true), None);
        assert_eq!(tracker.decide(Some(10), false), Some(PlaybackCommand::Play(10)));
    }

    #[test]
    fn last_action_refires_on_alternation() {
        let mut tracker = OutputTracker::new(DebouncePolicy::LastAction, IdleBehavior::Reset);
        assert_eq!(tracker.decide(Some(1), false), Some(PlaybackCommand::Play(1)));
        assert_eq!(tracker.decide(Some(2), false), Some(PlaybackCommand::Play(2)));
        // Only the immediately previous track is suppressed.
        assert_eq!(tracker.decide(Some(1), false), Some(PlaybackCommand::Play(1)));
    }

    #[test]
    fn track_latch_holds_until_idle() {
        let mut tracker = OutputTracker::new(DebouncePolicy::TrackLatch, IdleBehavior::Reset);
        assert_eq!(tracker.decide(Some(1), false), Some(PlaybackCommand::Play(1)));
        assert_eq!(tracker.decide(Some(2), false), Some(PlaybackCommand::Play(2)));
        // Track 1 is still latched from earlier in this interval.
        assert_eq!(tracker.decide(Some(1), false), None);
        assert_eq!(tracker.decide(None, true), None);
        assert_eq!(tracker.decide(Some(1), false), Some(PlaybackCommand::Play(1)));
    }

    #[test]
    fn stop_on_idle_emits_exactly_once() {
        let mut tracker =
            OutputTracker::new(DebouncePolicy::LastAction, IdleBehavior::StopPlayback);
        assert_eq!(tracker.decide(Some(3), false), Some(PlaybackCommand::Play(3)));
        assert_eq!(tracker.decide(None, true), Some(PlaybackCommand::Stop));
        // Already idle: no second stop.
        assert_eq!(tracker.decide(None, true), None);
    }

    #[test]
    fn idle_from_idle_emits_nothing() {
        let mut tracker =
            OutputTracker::new(DebouncePolicy::LastAction, IdleBehavior::StopPlayback);
        assert_eq!(tracker.decide(None, true), None);
    }
}
