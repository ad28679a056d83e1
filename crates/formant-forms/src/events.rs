//! Form event dispatch
//!
//! A minimal in-process publish/subscribe mechanism: listeners are held in a
//! registration-ordered list and invoked synchronously on every emit. A
//! failing listener is logged and skipped; it never prevents delivery to the
//! listeners after it and never disturbs form state.
//!
//! [`EventDispatcher::subscribe`] hands back a [`Subscription`] guard that
//! detaches the listener when dropped, so a binding layer can tie listener
//! lifetime to component lifetime.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Events emitted by a form manager over its interactive lifetime.
#[derive(Debug, Clone)]
pub enum FormEvent {
	/// A single field's value changed.
	FieldChanged { name: String },
	/// Several field values changed in one bulk operation.
	FieldsChanged { names: Vec<String> },
	/// A field's touched flag was recorded.
	FieldBlurred { name: String },
	/// A validation sweep left the form invalid; carries the full error map.
	ValidationFailed {
		errors: HashMap<String, Vec<String>>,
	},
	SubmissionStarted,
	SubmissionSucceeded,
	SubmissionFailed,
	FormReset,
}

/// Failure reported by an event listener.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct EventError(String);

impl EventError {
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}
}

type ListenerFn = Arc<dyn Fn(&FormEvent) -> Result<(), EventError> + Send + Sync>;

#[derive(Clone)]
struct ListenerEntry {
	id: u64,
	listener: ListenerFn,
}

/// Synchronous, registration-ordered event fan-out.
#[derive(Clone)]
pub struct EventDispatcher {
	listeners: Arc<RwLock<Vec<ListenerEntry>>>,
	next_id: Arc<AtomicU64>,
}

impl EventDispatcher {
	pub fn new() -> Self {
		Self {
			listeners: Arc::new(RwLock::new(Vec::new())),
			next_id: Arc::new(AtomicU64::new(1)),
		}
	}

	/// Registers a listener and returns the guard that detaches it.
	///
	/// # Examples
	///
	/// ```
	/// use formant_forms::events::{EventDispatcher, FormEvent};
	/// use std::sync::Arc;
	/// use std::sync::atomic::{AtomicUsize, Ordering};
	///
	/// let dispatcher = EventDispatcher::new();
	/// let seen = Arc::new(AtomicUsize::new(0));
	/// let counter = Arc::clone(&seen);
	///
	/// let subscription = dispatcher.subscribe(move |_event| {
	/// 	counter.fetch_add(1, Ordering::SeqCst);
	/// 	Ok(())
	/// });
	///
	/// dispatcher.emit(&FormEvent::SubmissionStarted);
	/// assert_eq!(seen.load(Ordering::SeqCst), 1);
	///
	/// drop(subscription);
	/// dispatcher.emit(&FormEvent::SubmissionStarted);
	/// assert_eq!(seen.load(Ordering::SeqCst), 1);
	/// ```
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: Fn(&FormEvent) -> Result<(), EventError> + Send + Sync + 'static,
	{
		let id = self.next_id.fetch_add(1, Ordering::SeqCst);
		self.listeners.write().push(ListenerEntry {
			id,
			listener: Arc::new(listener),
		});
		Subscription {
			id,
			listeners: Arc::downgrade(&self.listeners),
		}
	}

	/// Delivers an event to every listener, in registration order.
	///
	/// The listener list is cloned out of the lock before delivery so that a
	/// listener may subscribe or unsubscribe without deadlocking.
	pub fn emit(&self, event: &FormEvent) {
		let entries: Vec<ListenerEntry> = self.listeners.read().clone();
		for entry in entries {
			if let Err(error) = (entry.listener)(event) {
				tracing::warn!(listener = entry.id, %error, "form event listener failed");
			}
		}
	}

	pub fn listener_count(&self) -> usize {
		self.listeners.read().len()
	}
}

impl Default for EventDispatcher {
	fn default() -> Self {
		Self::new()
	}
}

/// Guard for a registered listener; dropping it detaches the listener.
pub struct Subscription {
	id: u64,
	listeners: Weak<RwLock<Vec<ListenerEntry>>>,
}

impl Subscription {
	/// Explicitly detaches the listener. Equivalent to dropping the guard.
	pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(listeners) = self.listeners.upgrade() {
			listeners.write().retain(|entry| entry.id != self.id);
		}
	}
}
