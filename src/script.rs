//! Compiled-in copy for the experience script.
//!
//! Fixed tables consumed by the choreographer and the terminal views. The
//! reveal sequence is six messages plus one closing line; index 6 always
//! renders [`CLOSING_LINE`] no matter which batch reached it.

/// Labels the "No" button cycles through while evading.
pub const TAUNT_LABELS: &[&str] = &[
    "Try again!",
    "Nice try 😉",
    "Wrong button!",
    "Are you sure?",
    "Think again!",
    "Nope!",
    "Click Yes!",
];

/// Staged reveal messages, indices 0..=5. Batch one is 0..=2, batch two
/// starts at 3.
pub const REVEAL_MESSAGES: &[&str] = &[
    "You don't fix me; you just stay. That's the kind of safe I needed.",
    "You in the passenger seat, city lights passing. Simple. Perfect.",
    "We've solved half our problems on empty roads after midnight.",
    "Every long drive with you feels like a tiny adventure we didn't plan.",
    "The best conversations we've had were in the car when the world was asleep.",
    "Driving with you at night is when I feel most us.",
];

/// The fixed closing line, always shown for reveal index 6.
pub const CLOSING_LINE: &str = "Still you don't love? 😏 Okay, we'll fix that...";

/// Last message index of the first reveal batch (0, 1, 2 then back to the
/// question).
pub const FIRST_BATCH_END: usize = 2;

/// First message index of the second reveal batch.
pub const REMAINING_BATCH_START: usize = 3;

/// Index of the closing line; also the highest valid reveal index.
pub const CLOSING_INDEX: usize = 6;

/// Screen copy shared by the terminal views.
pub mod copy {
    pub const GATE_TITLE: &str = "Keyphrase.";
    pub const GATE_LOCKED: &str = "Too many attempts. Try again in {remaining}s.";
    pub const GATE_DENIED: &str = "Access denied";
    pub const GATE_UNLOCKING: &str = "Unlocking my heart... preparing your surprise";
    pub const PROPOSAL_TITLE: &str = "Will You Be Mine?";
    pub const ACCEPTED_BANNER: &str = "I KNEW IT! ❤️";
    pub const SCENE_BEACH: &str = "THE BEGINNING — where the waves met our story";
    pub const SCENE_DRIVE: &str = "Night Cruise — destination: forever";
    pub const SURPRISE_TITLE: &str = "You have a surprise!";
    pub const GIFT_PROMPT: &str = "Tell me one thing you wish for";
    pub const GIFT_DELIVERED: &str = "Got it. Your wish is on its way to me ❤️";
    pub const GIFT_FALLBACK: &str = "Finish sending your wish via your mail app — I'll be waiting.";
}

/// Returns the message for a reveal index, if the index is valid.
///
/// Index [`CLOSING_INDEX`] is the closing line; 0..=5 come from the reveal
/// table.
pub fn reveal_message(index: usize) -> Option<&'static str> {
    if index == CLOSING_INDEX {
        Some(CLOSING_LINE)
    } else {
        REVEAL_MESSAGES.get(index).copied()
    }
}
