//! Async driver for the session.
//!
//! Owns the single event queue and interprets the session's directives:
//! scheduled transitions become sleeping tasks, `CancelTimers` swaps the
//! cancellation token so a whole run's timer chain dies together, and the
//! one delivery directive runs on its own task and feeds its outcome back
//! through the queue. All state transitions still happen on one consumer
//! (this struct), so the engine keeps its single-threaded, cooperative
//! semantics.
//!
//! Timer teardown is belt and braces: cancelled tasks never send, and the
//! session's epoch check drops anything that slipped through before the
//! cancellation landed.

use crate::gift::delivery::GiftCourier;
use crate::session::Session;
use crate::session::event::{Directive, Event};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub struct ExperienceRuntime {
    session: Session,
    courier: Arc<GiftCourier>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    timers: CancellationToken,
}

impl ExperienceRuntime {
    pub fn new(session: Session, courier: GiftCourier) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            session,
            courier: Arc::new(courier),
            events_tx,
            events_rx,
            timers: CancellationToken::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Feed a user-originated event straight into the session.
    pub fn dispatch(&mut self, event: Event) {
        let directives = self.session.handle(event, Instant::now());
        self.execute(directives);
    }

    /// Await the next queued event (timer expiry or delivery outcome) and
    /// dispatch it. Returns the event that was processed.
    pub async fn process_next(&mut self) -> Option<Event> {
        let event = self.events_rx.recv().await?;
        self.dispatch(event.clone());
        Some(event)
    }

    /// Dispatch every event already sitting in the queue without waiting.
    pub fn drain_ready(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
        }
    }

    /// Pending timers or an in-flight delivery can still wake us.
    pub fn has_pending_work(&self) -> bool {
        !self.events_rx.is_empty()
    }

    fn execute(&mut self, directives: Vec<Directive>) {
        for directive in directives {
            match directive {
                Directive::Schedule { after, event } => {
                    let tx = self.events_tx.clone();
                    let token = self.timers.clone();
                    tokio::spawn(async move {
                        tokio::select! {
                            () = token.cancelled() => {}
                            () = tokio::time::sleep(after) => {
                                let _ = tx.send(Event::Timer(event));
                            }
                        }
                    });
                }
                Directive::CancelTimers => {
                    self.timers.cancel();
                    self.timers = CancellationToken::new();
                }
                Directive::Deliver { epoch, wish } => {
                    let tx = self.events_tx.clone();
                    let courier = Arc::clone(&self.courier);
                    tokio::spawn(async move {
                        let outcome = courier.deliver(&wish).await;
                        let _ = tx.send(Event::GiftResolved { epoch, outcome });
                    });
                }
            }
        }
    }
}
