//! Gift wish intake.
//!
//! Collects a free-text wish, trims and length-clamps it, and tracks the
//! single-attempt delivery lifecycle: one remote try, then the mail-compose
//! fallback. Both paths land in `submitted`; only the confirmation copy
//! differs.

pub mod delivery;

use crate::config::GiftConfig;
use delivery::DeliveryOutcome;

#[derive(Debug)]
pub struct GiftIntake {
    max_len: usize,

    text: String,
    sending: bool,
    submitted: bool,
    used_fallback: bool,
}

impl GiftIntake {
    pub fn new(config: &GiftConfig) -> Self {
        Self {
            max_len: config.max_wish_len,
            text: String::new(),
            sending: false,
            submitted: false,
            used_fallback: false,
        }
    }

    /// Replace the draft text, clamped to the maximum length at input time
    /// (not just at submit).
    pub fn input(&mut self, raw: &str) {
        if self.submitted || self.sending {
            return;
        }
        self.text = raw.chars().take(self.max_len).collect();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    /// Submit is disabled while a delivery is in flight and while the draft
    /// is empty after trimming.
    pub fn can_submit(&self) -> bool {
        !self.sending && !self.submitted && !self.text.trim().is_empty()
    }

    /// Start the one delivery attempt. Returns the trimmed wish to deliver,
    /// or `None` when submission is currently disabled.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        let wish = self.text.trim().to_string();
        self.text = wish.clone();
        self.sending = true;
        Some(wish)
    }

    /// Record the single delivery outcome. The form flips to the read-only
    /// submitted view either way.
    pub fn finish(&mut self, outcome: DeliveryOutcome) {
        self.sending = false;
        self.submitted = true;
        self.used_fallback = matches!(outcome, DeliveryOutcome::FallbackUsed);
    }

    pub fn reset(&mut self) {
        self.text.clear();
        self.sending = false;
        self.submitted = false;
        self.used_fallback = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake() -> GiftIntake {
        GiftIntake::new(&GiftConfig::default())
    }

    #[test]
    fn input_clamps_to_max_length_at_entry() {
        let mut g = intake();
        g.input(&"x".repeat(900));
        assert_eq!(g.text().chars().count(), 500);
    }

    #[test]
    fn whitespace_only_wish_cannot_submit() {
        let mut g = intake();
        g.input("   \t  ");
        assert!(!g.can_submit());
        assert_eq!(g.begin_submit(), None);
    }

    #[test]
    fn submit_trims_and_disables_while_in_flight() {
        let mut g = intake();
        g.input("  a telescope  ");
        let wish = g.begin_submit().unwrap();
        assert_eq!(wish, "a telescope");
        assert!(g.is_sending());
        assert!(!g.can_submit());
        assert_eq!(g.begin_submit(), None);
    }

    #[test]
    fn delivered_and_fallback_both_end_submitted() {
        let mut g = intake();
        g.input("a telescope");
        g.begin_submit().unwrap();
        g.finish(DeliveryOutcome::Delivered);
        assert!(g.is_submitted());
        assert!(!g.used_fallback());

        let mut g = intake();
        g.input("a telescope");
        g.begin_submit().unwrap();
        g.finish(DeliveryOutcome::FallbackUsed);
        assert!(g.is_submitted());
        assert!(g.used_fallback());
    }

    #[test]
    fn submitted_form_ignores_further_edits() {
        let mut g = intake();
        g.input("a telescope");
        g.begin_submit().unwrap();
        g.finish(DeliveryOutcome::Delivered);
        g.input("something else");
        assert_eq!(g.text(), "a telescope");
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut g = intake();
        g.input("a telescope");
        g.begin_submit().unwrap();
        g.finish(DeliveryOutcome::FallbackUsed);
        g.reset();
        assert_eq!(g.text(), "");
        assert!(!g.is_submitted());
        assert!(!g.used_fallback());
        assert!(!g.is_sending());
    }
}
