//! Cinematic memory sequence.
//!
//! Pure timed phase walk after acceptance: beach, then the night drive,
//! then hand-off to the terminal reward. The only user input is the close
//! action, which aborts mid-scene and triggers the full experience reset.
//! Timers are owned by the session; this module just records which scene is
//! on screen and what comes next.

/// Current scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ScenePhase {
    #[default]
    None,
    Beach,
    Drive,
}

/// What a phase-duration expiry did.
#[derive(Debug, PartialEq, Eq)]
pub enum SceneOutcome {
    /// Drive scene is up; schedule its duration.
    DriveStarted,
    /// Sequence finished; show the reward stage.
    Finished,
    /// Not visible (stale timer after close/reset).
    Idle,
}

#[derive(Debug, Default)]
pub struct CinematicSequencer {
    visible: bool,
    phase: ScenePhase,
}

impl CinematicSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    /// Post-acceptance activation: fade in on the beach.
    pub fn activate(&mut self) {
        self.visible = true;
        self.phase = ScenePhase::Beach;
    }

    /// The current scene's duration elapsed.
    pub fn advance(&mut self) -> SceneOutcome {
        if !self.visible {
            return SceneOutcome::Idle;
        }
        match self.phase {
            ScenePhase::Beach => {
                self.phase = ScenePhase::Drive;
                SceneOutcome::DriveStarted
            }
            ScenePhase::Drive => {
                self.visible = false;
                self.phase = ScenePhase::None;
                SceneOutcome::Finished
            }
            ScenePhase::None => SceneOutcome::Idle,
        }
    }

    /// Abort mid-scene. The caller performs the session-wide reset and
    /// cancels the pending phase timer.
    pub fn close(&mut self) {
        self.visible = false;
        self.phase = ScenePhase::None;
    }

    pub fn reset(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_beach_then_drive_then_finishes() {
        let mut seq = CinematicSequencer::new();
        seq.activate();
        assert!(seq.is_visible());
        assert_eq!(seq.phase(), ScenePhase::Beach);

        assert_eq!(seq.advance(), SceneOutcome::DriveStarted);
        assert_eq!(seq.phase(), ScenePhase::Drive);

        assert_eq!(seq.advance(), SceneOutcome::Finished);
        assert!(!seq.is_visible());
        assert_eq!(seq.phase(), ScenePhase::None);
    }

    #[test]
    fn close_during_any_phase_goes_dark() {
        for advances in 0..2 {
            let mut seq = CinematicSequencer::new();
            seq.activate();
            for _ in 0..advances {
                seq.advance();
            }
            seq.close();
            assert!(!seq.is_visible());
            assert_eq!(seq.phase(), ScenePhase::None);
        }
    }

    #[test]
    fn stale_advance_after_close_is_idle() {
        let mut seq = CinematicSequencer::new();
        seq.activate();
        seq.close();
        assert_eq!(seq.advance(), SceneOutcome::Idle);
    }
}
