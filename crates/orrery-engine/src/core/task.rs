//! Message plumbing between asynchronous host work and the frame loop.
//!
//! Async completions never touch engine state directly. They post into a
//! [`Mailbox`], which only the frame loop drains.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};

/// Receiving end, owned by the frame loop.
pub struct Mailbox<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// A cloneable handle that async work can post through.
    pub fn postbox(&self) -> Postbox<T> {
        Postbox {
            sender: self.sender.clone(),
        }
    }

    /// Take every message posted so far, in posting order.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending end handed to async work.
pub struct Postbox<T> {
    sender: Sender<T>,
}

impl<T> Postbox<T> {
    /// Post a message. Returns false if the mailbox is gone.
    pub fn post(&self, message: T) -> bool {
        self.sender.send(message).is_ok()
    }
}

impl<T> Clone for Postbox<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Shared cancellation flag for one task.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
