//! Bounded input event queue and the batching consumer that drains it.
//!
//! The generator blocks until one event arrives, then applies every event
//! already queued before deciding whether to regenerate. A burst of N pan or
//! zoom events therefore costs one evaluation rather than N.

use std::error::Error;
use std::fmt;
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};

use log::trace;

use crate::controllers::interactive::events::input::InputEvent;
use crate::controllers::interactive::view_state::ViewState;

#[derive(Debug, Clone, Copy)]
enum Signal {
    Event(InputEvent),
    Stop,
}

/// Creates an event queue holding at most `capacity` pending events.
#[must_use]
pub fn event_channel(capacity: usize) -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity);

    (EventSender { tx }, EventReceiver { rx })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSendError {
    /// The queue is at capacity; the event was dropped.
    Full,
    /// The generator has exited.
    Disconnected,
}

impl fmt::Display for EventSendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "event queue is full"),
            Self::Disconnected => write!(f, "event queue is disconnected"),
        }
    }
}

impl Error for EventSendError {}

#[derive(Debug, Clone)]
pub struct EventSender {
    tx: SyncSender<Signal>,
}

impl EventSender {
    /// Enqueues `event`, blocking while the queue is full.
    pub fn send(&self, event: InputEvent) -> Result<(), EventSendError> {
        self.tx
            .send(Signal::Event(event))
            .map_err(|_| EventSendError::Disconnected)
    }

    /// Enqueues `event` without blocking.
    pub fn try_send(&self, event: InputEvent) -> Result<(), EventSendError> {
        self.tx.try_send(Signal::Event(event)).map_err(|e| match e {
            TrySendError::Full(_) => EventSendError::Full,
            TrySendError::Disconnected(_) => EventSendError::Disconnected,
        })
    }

    /// A handle that wakes a consumer blocked on this queue and tells it to
    /// stop.
    #[must_use]
    pub fn stop_signal(&self) -> StopSignal {
        StopSignal {
            tx: self.tx.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StopSignal {
    tx: SyncSender<Signal>,
}

impl StopSignal {
    /// Never blocks. When the queue is full the consumer is not waiting on it
    /// and will see its stop token before blocking again.
    pub fn raise(&self) {
        let _ = self.tx.try_send(Signal::Stop);
    }
}

#[derive(Debug)]
pub struct EventReceiver {
    rx: Receiver<Signal>,
}

/// What one call to [`EventCoalescer::next_batch`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Batch {
    /// `events` events were applied to the view state.
    Applied { events: usize },
    /// A stop was requested or every sender is gone.
    Stopped,
}

#[derive(Debug)]
pub struct EventCoalescer {
    events: EventReceiver,
}

impl EventCoalescer {
    #[must_use]
    pub fn new(events: EventReceiver) -> Self {
        Self { events }
    }

    /// Blocks for one event, then applies it and everything already queued
    /// behind it, in arrival order.
    pub fn next_batch(&mut self, view: &mut ViewState) -> Batch {
        let first = match self.events.rx.recv() {
            Ok(Signal::Event(event)) => event,
            Ok(Signal::Stop) | Err(_) => return Batch::Stopped,
        };

        view.apply(&first);
        let mut applied = 1;

        loop {
            match self.events.rx.try_recv() {
                Ok(Signal::Event(event)) => {
                    view.apply(&event);
                    applied += 1;
                }
                Ok(Signal::Stop) => return Batch::Stopped,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        trace!("Applied {} queued events", applied);

        Batch::Applied { events: applied }
    }
}
