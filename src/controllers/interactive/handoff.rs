//! Single-slot rendezvous between the generator and the render loop.
//!
//! [`HandoffSender::send`] returns only once the receiver has taken the value,
//! so a published frame is never overwritten and never buffered behind a newer
//! one. The receiver polls with [`HandoffReceiver::try_recv`] and never blocks
//! the render thread.

use std::error::Error;
use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    closed: bool,
}

#[derive(Debug)]
struct Shared<T> {
    slot: Mutex<Slot<T>>,
    changed: Condvar,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn close(&self) {
        self.lock().closed = true;
        self.changed.notify_all();
    }
}

#[must_use]
pub fn handoff<T>() -> (HandoffSender<T>, HandoffReceiver<T>) {
    let shared = Arc::new(Shared {
        slot: Mutex::new(Slot {
            value: None,
            closed: false,
        }),
        changed: Condvar::new(),
    });

    (
        HandoffSender {
            shared: Arc::clone(&shared),
        },
        HandoffReceiver { shared },
    )
}

/// The other end is gone. Carries back the value that was not delivered.
#[derive(Debug, PartialEq, Eq)]
pub struct HandoffClosed<T>(pub T);

impl<T> fmt::Display for HandoffClosed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handoff closed before the value was taken")
    }
}

impl<T: fmt::Debug> Error for HandoffClosed<T> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryRecvError {
    Empty,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvTimeoutError {
    Timeout,
    Closed,
}

impl fmt::Display for TryRecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no value waiting in the handoff"),
            Self::Closed => write!(f, "handoff sender is gone"),
        }
    }
}

impl Error for TryRecvError {}

impl fmt::Display for RecvTimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timed out waiting on the handoff"),
            Self::Closed => write!(f, "handoff sender is gone"),
        }
    }
}

impl Error for RecvTimeoutError {}

#[derive(Debug)]
pub struct HandoffSender<T> {
    shared: Arc<Shared<T>>,
}

impl<T> HandoffSender<T> {
    /// Places `value` in the slot and blocks until the receiver takes it.
    ///
    /// Fails, returning the value, if the channel is closed before it is
    /// taken.
    pub fn send(&self, value: T) -> Result<(), HandoffClosed<T>> {
        let mut slot = self.shared.lock();

        while slot.value.is_some() && !slot.closed {
            slot = self.shared.changed.wait(slot).unwrap_or_else(PoisonError::into_inner);
        }

        if slot.closed {
            return Err(HandoffClosed(value));
        }

        slot.value = Some(value);
        self.shared.changed.notify_all();

        while slot.value.is_some() && !slot.closed {
            slot = self.shared.changed.wait(slot).unwrap_or_else(PoisonError::into_inner);
        }

        match slot.value.take() {
            Some(value) => Err(HandoffClosed(value)),
            None => Ok(()),
        }
    }

    /// A handle that can close the channel from another thread, releasing a
    /// blocked [`send`](Self::send).
    #[must_use]
    pub fn closer(&self) -> HandoffCloser<T> {
        HandoffCloser {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Drop for HandoffSender<T> {
    fn drop(&mut self) {
        self.shared.close();
    }
}

#[derive(Debug)]
pub struct HandoffCloser<T> {
    shared: Arc<Shared<T>>,
}

impl<T> HandoffCloser<T> {
    pub fn close(&self) {
        self.shared.close();
    }
}

#[derive(Debug)]
pub struct HandoffReceiver<T> {
    shared: Arc<Shared<T>>,
}

impl<T> HandoffReceiver<T> {
    /// Takes the waiting value, if any, without blocking.
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        let mut slot = self.shared.lock();

        if let Some(value) = slot.value.take() {
            self.shared.changed.notify_all();
            return Ok(value);
        }

        if slot.closed {
            Err(TryRecvError::Closed)
        } else {
            Err(TryRecvError::Empty)
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        let deadline = Instant::now() + timeout;
        let mut slot = self.shared.lock();

        loop {
            if let Some(value) = slot.value.take() {
                self.shared.changed.notify_all();
                return Ok(value);
            }

            if slot.closed {
                return Err(RecvTimeoutError::Closed);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(RecvTimeoutError::Timeout);
            }

            slot = self
                .shared
                .changed
                .wait_timeout(slot, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}

impl<T> Drop for HandoffReceiver<T> {
    fn drop(&mut self) {
        self.shared.close();
    }
}
