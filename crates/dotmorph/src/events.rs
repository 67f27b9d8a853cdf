//! # DOTMORPH Event System
//!
//! Notifications from the effect to its host.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │ DottedText  │─────>│   Bounded   │─────>│    Host     │
//! │  (frames)   │      │   Channel   │      │ (UI, logs)  │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! Sends never block the frame loop: when the channel is full the event is
//! dropped.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::trace;

use crate::system::ReconcileReport;

/// Events emitted by a dotted text effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MorphEvent {
    /// The displayed text changed.
    TextChanged {
        /// Index into the rotation, or `None` for text set directly.
        index: Option<usize>,
        /// The new text.
        text: String,
        /// Number of target points sampled from it.
        target_count: usize,
    },

    /// Particles were reconciled against a new target set.
    Reconciled(ReconcileReport),

    /// The effect was stopped.
    Stopped,
}

/// Event bus between the effect and its host.
///
/// Pre-allocates a bounded channel so a slow consumer cannot grow memory.
pub struct EventBus {
    /// Sender end - held by the effect.
    sender: Sender<MorphEvent>,
    /// Receiver end - cloned for consumers.
    receiver: Receiver<MorphEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum events in flight before new ones are dropped.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle (clone for multiple consumers).
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }
}

/// Handle for sending events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<MorphEvent>,
}

impl EventSender {
    /// Sends an event (non-blocking).
    ///
    /// Returns `false` if the event was dropped.
    #[inline]
    pub fn send(&self, event: MorphEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                trace!(?event, "event channel full, dropping event");
                false
            }
            Err(TrySendError::Disconnected(event)) => {
                trace!(?event, "event channel disconnected, dropping event");
                false
            }
        }
    }
}

/// Handle for receiving events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<MorphEvent>,
}

impl EventReceiver {
    /// Receives all pending events (non-blocking).
    #[inline]
    pub fn drain(&self) -> Vec<MorphEvent> {
        let mut events = Vec::with_capacity(self.receiver.len());
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Receives one event (non-blocking).
    ///
    /// Returns `None` if no events pending.
    #[inline]
    pub fn try_recv(&self) -> Option<MorphEvent> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
