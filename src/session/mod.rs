//! Session aggregate.
//!
//! One owned state bag for the whole experience — gate, choreographer,
//! cinematic sequencer, gift intake — with a single synchronous dispatch
//! point. Nothing here touches the clock or spawns tasks; callers pass
//! `Instant::now()` in and execute the returned [`Directive`]s.
//!
//! Reset semantics: [`Session::reset`] zeroes every component atomically
//! and bumps the epoch, so every previously scheduled timer becomes stale
//! and is ignored on arrival.

pub mod event;

use crate::choreography::{AdvanceOutcome, Choreographer, EvadeOutcome};
use crate::cinematic::{CinematicSequencer, SceneOutcome};
use crate::config::{Config, RewardVariant};
use crate::error::GateError;
use crate::gate::{PasscodeGate, SubmitOutcome};
use crate::gift::GiftIntake;
use crate::script::CLOSING_INDEX;
use event::{Directive, Event, TimerEvent, TimerKind};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

/// Which top-level view is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Screen {
    #[default]
    Gate,
    Proposal,
    Cinematic,
    Reward,
}

pub struct Session {
    config: Config,
    epoch: u64,
    screen: Screen,
    rng: StdRng,

    gate: PasscodeGate,
    choreography: Choreographer,
    cinematic: CinematicSequencer,
    gift: GiftIntake,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Seeded constructor for deterministic tests.
    pub fn with_rng(config: Config, rng: StdRng) -> Self {
        Self {
            gate: PasscodeGate::new(&config.gate),
            choreography: Choreographer::new(&config.choreography),
            cinematic: CinematicSequencer::new(),
            gift: GiftIntake::new(&config.gift),
            epoch: 0,
            screen: Screen::Gate,
            rng,
            config,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn gate(&self) -> &PasscodeGate {
        &self.gate
    }

    pub fn choreography(&self) -> &Choreographer {
        &self.choreography
    }

    pub fn cinematic(&self) -> &CinematicSequencer {
        &self.cinematic
    }

    pub fn gift(&self) -> &GiftIntake {
        &self.gift
    }

    pub fn reward_variant(&self) -> RewardVariant {
        self.config.reward
    }

    /// Dispatch one event. Pure state transition plus scheduling directives;
    /// the caller owns timers and async work.
    pub fn handle(&mut self, event: Event, now: Instant) -> Vec<Directive> {
        match event {
            Event::GateInput(raw) => {
                self.gate.input(&raw);
                Vec::new()
            }
            Event::GateSubmit => self.on_gate_submit(now),
            Event::YesClick => self.on_yes(),
            Event::NoHover => self.on_no_hover(),
            Event::NoClick => self.on_no_click(),
            Event::CinematicClose => {
                if self.screen == Screen::Cinematic {
                    tracing::info!("cinematic closed early, starting over");
                    self.reset()
                } else {
                    Vec::new()
                }
            }
            Event::GiftInput(raw) => {
                self.gift.input(&raw);
                Vec::new()
            }
            Event::GiftSubmit => self.on_gift_submit(),
            Event::GiftResolved { epoch, outcome } => {
                // Same fence as timers: a delivery started before a reset
                // must not touch the new run.
                if epoch == self.epoch {
                    self.gift.finish(outcome);
                } else {
                    tracing::debug!("dropping stale delivery outcome from a previous run");
                }
                Vec::new()
            }
            Event::Reset => self.reset(),
            Event::Timer(timer) => self.on_timer(timer, now),
        }
    }

    fn on_gate_submit(&mut self, now: Instant) -> Vec<Directive> {
        match self.gate.submit(now) {
            SubmitOutcome::Unlocking => {
                tracing::info!("passcode accepted, unlock delay running");
                vec![self.schedule(self.config.gate.unlock_delay(), TimerKind::UnlockDelayElapsed)]
            }
            SubmitOutcome::Rejected(GateError::InvalidCode) => {
                vec![self.schedule(self.config.gate.error_flash(), TimerKind::ErrorFlashElapsed)]
            }
            SubmitOutcome::Rejected(GateError::LockedOut { remaining_secs }) => {
                tracing::warn!(remaining_secs, "too many failed attempts, gate locked");
                vec![
                    self.schedule(self.config.gate.error_flash(), TimerKind::ErrorFlashElapsed),
                    self.schedule(Duration::from_secs(1), TimerKind::LockoutTick),
                ]
            }
            SubmitOutcome::Ignored => Vec::new(),
        }
    }

    fn on_yes(&mut self) -> Vec<Directive> {
        if self.screen != Screen::Proposal {
            return Vec::new();
        }
        if self.choreography.on_yes_click() {
            tracing::info!("proposal accepted");
            vec![self.schedule(
                self.config.choreography.acceptance_pause(),
                TimerKind::AcceptancePauseElapsed,
            )]
        } else {
            Vec::new()
        }
    }

    fn on_no_hover(&mut self) -> Vec<Directive> {
        if self.screen != Screen::Proposal || self.choreography.accepted() {
            return Vec::new();
        }
        let outcome = self.choreography.on_no_hover(&mut self.rng);
        self.evade_directives(&outcome)
    }

    fn on_no_click(&mut self) -> Vec<Directive> {
        if self.screen != Screen::Proposal || self.choreography.accepted() {
            return Vec::new();
        }
        let (outcome, newly_accepted) = self.choreography.on_no_click(&mut self.rng);
        let mut directives = self.evade_directives(&outcome);
        if newly_accepted {
            tracing::info!("the exhausted \"No\" button accepted for them");
            directives.push(self.schedule(
                self.config.choreography.acceptance_pause(),
                TimerKind::AcceptancePauseElapsed,
            ));
        }
        directives
    }

    fn on_gift_submit(&mut self) -> Vec<Directive> {
        if self.screen != Screen::Reward || self.config.reward != RewardVariant::GiftIntake {
            return Vec::new();
        }
        match self.gift.begin_submit() {
            Some(wish) => vec![Directive::Deliver {
                epoch: self.epoch,
                wish,
            }],
            None => Vec::new(),
        }
    }

    fn on_timer(&mut self, timer: TimerEvent, now: Instant) -> Vec<Directive> {
        if timer.epoch != self.epoch {
            tracing::debug!(?timer, "dropping stale timer from a previous run");
            return Vec::new();
        }
        match timer.kind {
            TimerKind::ErrorFlashElapsed => {
                self.gate.clear_error();
                Vec::new()
            }
            TimerKind::UnlockDelayElapsed => {
                self.gate.complete_unlock();
                self.screen = Screen::Proposal;
                tracing::info!("gate open, proposal on screen");
                Vec::new()
            }
            TimerKind::LockoutTick => {
                // Wall-clock comparison each tick; stops itself at expiry.
                if self.gate.remaining_lockout_secs(now).is_some() {
                    vec![self.schedule(Duration::from_secs(1), TimerKind::LockoutTick)]
                } else {
                    Vec::new()
                }
            }
            TimerKind::AcceptancePauseElapsed => {
                self.cinematic.activate();
                self.screen = Screen::Cinematic;
                vec![self.schedule(self.config.cinematic.beach_duration(), TimerKind::SceneElapsed)]
            }
            TimerKind::MessageDwellElapsed => match self.choreography.advance_message() {
                AdvanceOutcome::Shown { index } => {
                    vec![self.schedule(self.message_dwell(index), TimerKind::MessageDwellElapsed)]
                }
                AdvanceOutcome::QuestionReached
                | AdvanceOutcome::FinalQuestionReached
                | AdvanceOutcome::Idle => Vec::new(),
            },
            TimerKind::SceneElapsed => match self.cinematic.advance() {
                SceneOutcome::DriveStarted => {
                    vec![
                        self.schedule(
                            self.config.cinematic.drive_duration(),
                            TimerKind::SceneElapsed,
                        ),
                    ]
                }
                SceneOutcome::Finished => {
                    self.screen = Screen::Reward;
                    tracing::info!(reward = %self.config.reward_name(), "cinematic finished, reward stage up");
                    Vec::new()
                }
                SceneOutcome::Idle => Vec::new(),
            },
        }
    }

    fn evade_directives(&self, outcome: &EvadeOutcome) -> Vec<Directive> {
        match outcome {
            EvadeOutcome::BatchStarted { index } => {
                vec![self.schedule(self.message_dwell(*index), TimerKind::MessageDwellElapsed)]
            }
            EvadeOutcome::Moved => Vec::new(),
        }
    }

    fn message_dwell(&self, index: usize) -> Duration {
        if index == CLOSING_INDEX {
            self.config.choreography.closing_interval()
        } else {
            self.config.choreography.message_interval()
        }
    }

    /// Full start-over: every component back to initial values, epoch
    /// bumped so in-flight timers die on arrival.
    pub fn reset(&mut self) -> Vec<Directive> {
        self.epoch += 1;
        self.screen = Screen::Gate;
        self.gate.reset();
        self.choreography.reset();
        self.cinematic.reset();
        self.gift.reset();
        vec![Directive::CancelTimers]
    }

    fn schedule(&self, after: Duration, kind: TimerKind) -> Directive {
        Directive::Schedule {
            after,
            event: TimerEvent {
                epoch: self.epoch,
                kind,
            },
        }
    }
}

impl Config {
    fn reward_name(&self) -> &'static str {
        match self.reward {
            RewardVariant::SurpriseLink => "surprise_link",
            RewardVariant::GiftIntake => "gift_intake",
        }
    }
}
