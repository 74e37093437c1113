//! Lock-free buffer between the transport and the frame loop
//!
//! Connection handlers push decoded events through cloned senders without
//! blocking; the frame loop drains everything pending at the start of each
//! frame. Uses a bounded crossbeam channel so a flooding controller exerts
//! backpressure instead of growing memory.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::net::protocol::InputEvent;

/// Bounded MPSC buffer of input events
pub struct EventBuffer {
    /// Sender side - cloned to each connection handler
    sender: Sender<InputEvent>,
    /// Receiver side - drained by the frame loop
    receiver: Receiver<InputEvent>,
    capacity: usize,
}

impl EventBuffer {
    /// Capacity should cover the burst of events that can arrive between two
    /// frames (a phone sends at most a few dozen samples per frame)
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// New sender handle for a connection
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Drain all pending events for this frame
    pub fn drain(&self) -> Vec<InputEvent> {
        self.receiver.try_iter().collect()
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBuffer {
    fn default() -> Self {
        // Generous headroom for a roomful of phones between two frames
        Self::new(1024)
    }
}

/// Clonable sender handle for connection handlers
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<InputEvent>,
}

impl EventSender {
    /// Submit an event (non-blocking)
    #[inline]
    pub fn try_send(&self, event: InputEvent) -> Result<(), EventBufferError> {
        self.sender.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => EventBufferError::Full,
            TrySendError::Disconnected(_) => EventBufferError::Disconnected,
        })
    }
}

/// Event buffer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventBufferError {
    /// Buffer is full (backpressure)
    Full,
    /// Channel disconnected (frame loop stopped)
    Disconnected,
}
