//! Events into the session and directives back out of it.
//!
//! The session is a pure dispatcher: user input and timer expirations go
//! in, scheduling directives come out. Every delayed transition and the
//! async delivery outcome are tagged with the epoch they were started
//! under, so a reset (which bumps the epoch) invalidates the whole run at
//! once — a torn-down run can never apply a stale transition.

use crate::gift::delivery::DeliveryOutcome;
use std::time::Duration;

/// External triggers: user interactions plus resolved async work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keystroke(s) into the passcode field (raw, pre-sanitization).
    GateInput(String),
    GateSubmit,
    YesClick,
    NoHover,
    NoClick,
    /// Close button during the cinematic sequence.
    CinematicClose,
    /// Edit of the wish draft.
    GiftInput(String),
    GiftSubmit,
    /// The single delivery attempt resolved. Carries the epoch it was
    /// started under; like timers, mismatches are dropped.
    GiftResolved {
        epoch: u64,
        outcome: DeliveryOutcome,
    },
    /// Explicit start-over.
    Reset,
    Timer(TimerEvent),
}

/// A scheduled transition firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    /// Session epoch at scheduling time; mismatches are dropped.
    pub epoch: u64,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// "Access denied" flash window over.
    ErrorFlashElapsed,
    /// Unlock presentation delay over; the gate opens.
    UnlockDelayElapsed,
    /// 1s countdown refresh while locked out; self-rescheduling.
    LockoutTick,
    /// Pause between acceptance and the cinematic start.
    AcceptancePauseElapsed,
    /// Current reveal message's dwell over.
    MessageDwellElapsed,
    /// Current cinematic scene's duration over.
    SceneElapsed,
}

/// Instructions the runtime driver executes on the session's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Fire `event` back into the session after `after`.
    Schedule { after: Duration, event: TimerEvent },
    /// Drop every pending timer; the epoch fence was crossed.
    CancelTimers,
    /// Run the one async wish delivery, then feed back
    /// [`Event::GiftResolved`] tagged with `epoch`.
    Deliver { epoch: u64, wish: String },
}
