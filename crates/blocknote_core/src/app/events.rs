//! Controller change notifications.
//!
//! Delivery is fire-and-forget: subscribers whose receiver was dropped are
//! pruned on the next emit, and nothing waits for acknowledgement.

use crate::model::note::NoteId;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Severity of a transient user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
}

/// Transient toast-style message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }
}

/// State change emitted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The note collection changed (content, order or membership).
    NotesChanged,
    /// The selected note changed to the given id, or to none.
    SelectionChanged(Option<NoteId>),
    Notification(Notification),
}

/// Fan-out of controller events to subscribed views.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<ControllerEvent>>,
}

impl EventBus {
    pub fn subscribe(&mut self) -> Receiver<ControllerEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn emit(&mut self, event: ControllerEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
