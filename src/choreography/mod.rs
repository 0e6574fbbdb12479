//! Proposal choreographer.
//!
//! Drives the Yes/No game: the evading "No" button, the staged reveal of
//! messages, and the point where "No" stops meaning no. Hovering or clicking
//! "No" both run the same evade step; the reveal stages advance on scheduled
//! timer events owned by the session.
//!
//! Stage machine:
//!
//! ```text
//! None ──evasions ≥ threshold──▶ FirstBatch (0→1→2)
//!   FirstBatch ──index 2 dwell elapsed──▶ Question
//!   Question ──next evade──▶ RemainingBatch (3→4→5→6)
//!   RemainingBatch ──closing dwell elapsed──▶ FinalQuestion
//!   FinalQuestion: a "No" *click* also accepts; a hover never does.
//! ```

pub mod jitter;

use crate::config::ChoreographyConfig;
use crate::script::{CLOSING_INDEX, FIRST_BATCH_END, REMAINING_BATCH_START};
use jitter::ButtonJitter;
use rand::Rng;

/// Position in the scripted reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RevealStage {
    #[default]
    None,
    FirstBatch,
    Question,
    RemainingBatch,
    FinalQuestion,
}

/// What an evade step did beyond moving the button.
#[derive(Debug, PartialEq, Eq)]
pub enum EvadeOutcome {
    /// Button relocated/relabeled only.
    Moved,
    /// A reveal batch just started; schedule the dwell for `index`.
    BatchStarted { index: usize },
}

/// What a message-dwell expiry did.
#[derive(Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Next message is up; schedule its dwell.
    Shown { index: usize },
    /// First batch exhausted; back to the bare question.
    QuestionReached,
    /// Closing line done; "No" now accepts.
    FinalQuestionReached,
    /// No message active (stale timer after a reset mid-batch).
    Idle,
}

#[derive(Debug)]
pub struct Choreographer {
    evasion_threshold: u32,
    jitter: ButtonJitter,

    evasions: u32,
    no_offset: (f32, f32),
    no_label: &'static str,
    active_message: Option<usize>,
    stage: RevealStage,
    accepted: bool,
}

impl Choreographer {
    pub fn new(config: &ChoreographyConfig) -> Self {
        Self {
            evasion_threshold: config.evasion_threshold,
            jitter: ButtonJitter::new(config.jitter_px),
            evasions: 0,
            no_offset: (0.0, 0.0),
            no_label: "No",
            active_message: None,
            stage: RevealStage::None,
            accepted: false,
        }
    }

    pub fn stage(&self) -> RevealStage {
        self.stage
    }

    /// Active reveal index, `None` when no overlay message is showing.
    /// Always in `0..=6` when present.
    pub fn active_message(&self) -> Option<usize> {
        self.active_message
    }

    pub fn evasions(&self) -> u32 {
        self.evasions
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn no_offset(&self) -> (f32, f32) {
        self.no_offset
    }

    pub fn no_label(&self) -> &'static str {
        self.no_label
    }

    /// The evade step shared by hover and click: count it, move and relabel
    /// the button, and open a reveal batch when the stage calls for one.
    ///
    /// The `None → FirstBatch` transition fires exactly once; extra evasions
    /// during `FirstBatch` change nothing but the button.
    pub fn evade<R: Rng>(&mut self, rng: &mut R) -> EvadeOutcome {
        self.evasions += 1;
        self.no_offset = self.jitter.offset(rng);
        self.no_label = self.jitter.label(rng);

        if self.stage == RevealStage::None && self.evasions >= self.evasion_threshold {
            self.stage = RevealStage::FirstBatch;
            self.active_message = Some(0);
            return EvadeOutcome::BatchStarted { index: 0 };
        }
        if self.stage == RevealStage::Question {
            self.stage = RevealStage::RemainingBatch;
            self.active_message = Some(REMAINING_BATCH_START);
            return EvadeOutcome::BatchStarted {
                index: REMAINING_BATCH_START,
            };
        }
        EvadeOutcome::Moved
    }

    /// A hover only ever evades — even in the final question.
    pub fn on_no_hover<R: Rng>(&mut self, rng: &mut R) -> EvadeOutcome {
        self.evade(rng)
    }

    /// A click evades too, but once the script is exhausted it is
    /// reinterpreted as acceptance. Returns `(outcome, newly_accepted)`.
    pub fn on_no_click<R: Rng>(&mut self, rng: &mut R) -> (EvadeOutcome, bool) {
        let outcome = self.evade(rng);
        let accepted = if self.stage == RevealStage::FinalQuestion {
            self.on_yes_click()
        } else {
            false
        };
        (outcome, accepted)
    }

    /// Accept the proposal. Returns `true` only on the first call so the
    /// acceptance pause is scheduled exactly once.
    pub fn on_yes_click(&mut self) -> bool {
        if self.accepted {
            return false;
        }
        self.accepted = true;
        true
    }

    /// A message's dwell elapsed: advance the reveal.
    pub fn advance_message(&mut self) -> AdvanceOutcome {
        let Some(index) = self.active_message else {
            return AdvanceOutcome::Idle;
        };

        if self.stage == RevealStage::FirstBatch && index == FIRST_BATCH_END {
            self.active_message = None;
            self.stage = RevealStage::Question;
            return AdvanceOutcome::QuestionReached;
        }
        if index == CLOSING_INDEX {
            self.active_message = None;
            self.stage = RevealStage::FinalQuestion;
            return AdvanceOutcome::FinalQuestionReached;
        }

        let next = index + 1;
        self.active_message = Some(next);
        AdvanceOutcome::Shown { index: next }
    }

    /// Zero every field back to the freshly-constructed state.
    pub fn reset(&mut self) {
        self.evasions = 0;
        self.no_offset = (0.0, 0.0);
        self.no_label = "No";
        self.active_message = None;
        self.stage = RevealStage::None;
        self.accepted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn choreo() -> Choreographer {
        Choreographer::new(&ChoreographyConfig::default())
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    #[test]
    fn first_batch_opens_at_third_evasion_exactly_once() {
        let mut c = choreo();
        let mut rng = rng();
        assert_eq!(c.evade(&mut rng), EvadeOutcome::Moved);
        assert_eq!(c.evade(&mut rng), EvadeOutcome::Moved);
        assert_eq!(c.evade(&mut rng), EvadeOutcome::BatchStarted { index: 0 });
        assert_eq!(c.stage(), RevealStage::FirstBatch);
        // Further evasions inside the batch only move the button.
        assert_eq!(c.evade(&mut rng), EvadeOutcome::Moved);
        assert_eq!(c.active_message(), Some(0));
    }

    #[test]
    fn full_reveal_walk_matches_the_script() {
        let mut c = choreo();
        let mut rng = rng();
        for _ in 0..3 {
            c.evade(&mut rng);
        }
        assert_eq!(c.active_message(), Some(0));
        assert_eq!(c.advance_message(), AdvanceOutcome::Shown { index: 1 });
        assert_eq!(c.advance_message(), AdvanceOutcome::Shown { index: 2 });
        assert_eq!(c.advance_message(), AdvanceOutcome::QuestionReached);
        assert_eq!(c.stage(), RevealStage::Question);
        assert_eq!(c.active_message(), None);

        // Next evade opens the remaining batch at index 3.
        assert_eq!(c.evade(&mut rng), EvadeOutcome::BatchStarted { index: 3 });
        assert_eq!(c.advance_message(), AdvanceOutcome::Shown { index: 4 });
        assert_eq!(c.advance_message(), AdvanceOutcome::Shown { index: 5 });
        assert_eq!(c.advance_message(), AdvanceOutcome::Shown { index: 6 });
        assert_eq!(c.advance_message(), AdvanceOutcome::FinalQuestionReached);
        assert_eq!(c.stage(), RevealStage::FinalQuestion);
        assert_eq!(c.active_message(), None);
    }

    #[test]
    fn active_index_never_leaves_valid_range() {
        let mut c = choreo();
        let mut rng = rng();
        for _ in 0..10 {
            c.evade(&mut rng);
            if let Some(idx) = c.active_message() {
                assert!(idx <= script::CLOSING_INDEX);
            }
            c.advance_message();
            if let Some(idx) = c.active_message() {
                assert!(idx <= script::CLOSING_INDEX);
            }
        }
    }

    #[test]
    fn closing_index_renders_the_closing_line() {
        assert_eq!(
            script::reveal_message(script::CLOSING_INDEX),
            Some(script::CLOSING_LINE)
        );
    }

    #[test]
    fn final_question_click_accepts_but_hover_never_does() {
        let mut c = choreo();
        let mut rng = rng();
        for _ in 0..3 {
            c.evade(&mut rng);
        }
        while c.stage() != RevealStage::Question {
            c.advance_message();
        }
        c.evade(&mut rng);
        while c.stage() != RevealStage::FinalQuestion {
            c.advance_message();
        }

        c.on_no_hover(&mut rng);
        assert!(!c.accepted(), "hover must never accept");

        let (_, newly) = c.on_no_click(&mut rng);
        assert!(newly);
        assert!(c.accepted());
    }

    #[test]
    fn yes_click_is_idempotent() {
        let mut c = choreo();
        assert!(c.on_yes_click());
        assert!(!c.on_yes_click());
        assert!(c.accepted());
    }

    #[test]
    fn stale_advance_after_clear_is_idle() {
        let mut c = choreo();
        assert_eq!(c.advance_message(), AdvanceOutcome::Idle);
    }

    #[test]
    fn reset_round_trips_to_initial_state() {
        let mut c = choreo();
        let mut rng = rng();
        for _ in 0..5 {
            c.on_no_click(&mut rng);
        }
        c.on_yes_click();
        c.reset();

        assert_eq!(c.evasions(), 0);
        assert_eq!(c.no_offset(), (0.0, 0.0));
        assert_eq!(c.no_label(), "No");
        assert_eq!(c.active_message(), None);
        assert_eq!(c.stage(), RevealStage::None);
        assert!(!c.accepted());
    }
}
