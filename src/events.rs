//! Cancellable plot events and the subscriber bus.
//!
//! External code observes every intercepted action through one event and may
//! set or clear its cancellation flag before policy applies its floor: a
//! subscriber can always veto more strictly, but can only relax a denial the
//! policy itself grants an authorization exception for.

use std::sync::Arc;

use crate::grid::{BlockPos, PlotCoord};
use crate::plot::Plot;
use crate::policy::ActionKind;

/// Internal cancelable event, dispatched once per intercepted action.
///
/// `cancelled` is seeded from the originating action's flag; whatever
/// subscribers leave in it is merged with the policy decision afterwards.
#[derive(Clone, Debug)]
pub struct PlotEvent {
    pub kind: ActionKind,
    pub world: String,
    /// Resolved grid cell, when the position maps to one.
    pub coord: Option<PlotCoord>,
    /// Resolved plot record, when the cell is claimed.
    pub plot: Option<Plot>,
    /// Acting player name, when the action has one.
    pub actor: Option<String>,
    pub position: BlockPos,
    pub cancelled: bool,
}

/// External subscriber hook. Handlers run synchronously on the thread that
/// delivered the action and may set or clear [`PlotEvent::cancelled`].
pub trait Subscriber: Send + Sync {
    fn handle(&self, event: &mut PlotEvent);
}

/// Dispatches plot events to registered subscribers in registration order.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Arc<dyn Subscriber>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, subscriber: Arc<dyn Subscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Run every subscriber over the event; the flag they leave behind is the
    /// subscribers' collective answer.
    pub fn dispatch(&self, event: &mut PlotEvent) {
        for subscriber in &self.subscribers {
            subscriber.handle(event);
        }
    }
}
