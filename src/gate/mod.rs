//! Passcode gate.
//!
//! Validates a 4-digit code, counts failed attempts, and enforces an
//! optional time-based lockout. Mirrors the entry screen of the original
//! experience: every keystroke is sanitized to at most four digits, a wrong
//! code flashes a transient error, and the correct code runs a fixed
//! "unlocking" presentation delay before the gate opens.
//!
//! The gate never reads the clock itself; callers pass `Instant`s in, which
//! keeps lockout arithmetic deterministic under test.

pub mod secret;

use crate::config::GateConfig;
use crate::error::GateError;
use secret::SecretSpec;
use std::time::Instant;

pub const CODE_LEN: usize = 4;

/// What a [`PasscodeGate::submit`] call did.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Correct code. The unlock delay is running; call
    /// [`PasscodeGate::complete_unlock`] when it elapses.
    Unlocking,
    /// Wrong code. The error flash is visible and the input was cleared;
    /// clear the flash after the configured window.
    Rejected(GateError),
    /// No-op: locked out, already mid-unlock, or nothing entered.
    Ignored,
}

#[derive(Debug)]
pub struct PasscodeGate {
    secret: SecretSpec,
    max_attempts: Option<u32>,
    lockout: std::time::Duration,

    code: String,
    attempts: u32,
    locked_until: Option<Instant>,
    error_visible: bool,
    unlocking: bool,
    unlocked: bool,
}

impl PasscodeGate {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            secret: SecretSpec::from_config(config),
            max_attempts: config.max_attempts,
            lockout: config.lockout(),
            code: String::new(),
            attempts: 0,
            locked_until: None,
            error_visible: false,
            unlocking: false,
            unlocked: false,
        }
    }

    /// Replace the code buffer with the sanitized form of `raw`: digits
    /// only, truncated to four. Applied on every keystroke, so the stored
    /// code can never violate the length/charset invariant.
    pub fn input(&mut self, raw: &str) {
        self.code = raw
            .chars()
            .filter(char::is_ascii_digit)
            .take(CODE_LEN)
            .collect();
        if self.error_visible {
            self.error_visible = false;
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Fraction of the code entered, in `[0.0, 1.0]`. Drives the door
    /// animation on the entry screen.
    pub fn fill_progress(&self) -> f32 {
        self.code.len() as f32 / CODE_LEN as f32
    }

    pub fn is_locked(&self, now: Instant) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }

    /// Remaining lockout in whole seconds (at least 1 while locked), for
    /// the countdown display. Recomputed from the wall clock each tick, so
    /// there is no drift to account for.
    pub fn remaining_lockout_secs(&self, now: Instant) -> Option<u64> {
        let until = self.locked_until?;
        if until <= now {
            return None;
        }
        Some(until.duration_since(now).as_secs().max(1))
    }

    pub fn error_visible(&self) -> bool {
        self.error_visible
    }

    pub fn clear_error(&mut self) {
        self.error_visible = false;
    }

    pub fn is_unlocking(&self) -> bool {
        self.unlocking
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Evaluate the entered code.
    ///
    /// No-op while locked out or while an unlock is already in flight, so
    /// re-entrant submissions during the presentation delay cannot double
    /// fire. Attempt counting survives individual failures and resets only
    /// with [`PasscodeGate::reset`].
    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        if self.is_locked(now) || self.unlocking || self.unlocked {
            return SubmitOutcome::Ignored;
        }
        if self.code.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        if self.secret.matches(&self.code) {
            self.unlocking = true;
            self.error_visible = false;
            return SubmitOutcome::Unlocking;
        }

        self.error_visible = true;
        self.code.clear();
        self.attempts += 1;

        if let Some(max) = self.max_attempts {
            if self.attempts >= max {
                self.locked_until = Some(now + self.lockout);
                return SubmitOutcome::Rejected(GateError::LockedOut {
                    remaining_secs: self.lockout.as_secs(),
                });
            }
        }

        SubmitOutcome::Rejected(GateError::InvalidCode)
    }

    /// Flip to unlocked once the presentation delay has elapsed.
    pub fn complete_unlock(&mut self) {
        if self.unlocking {
            self.unlocking = false;
            self.unlocked = true;
        }
    }

    /// Back to the initial locked screen. The only place attempts reset.
    pub fn reset(&mut self) {
        self.code.clear();
        self.attempts = 0;
        self.locked_until = None;
        self.error_visible = false;
        self.unlocking = false;
        self.unlocked = false;
    }
}
