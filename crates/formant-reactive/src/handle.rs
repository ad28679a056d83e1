//! Whole-form binding handle
//!
//! [`FormHandle`] bridges a [`FormManager`] to a reactive consumer. It owns
//! an event subscription for the manager's whole lifetime and turns every
//! event into a bump of a version counter the consumer can await, so UI code
//! re-reads the state snapshot exactly when something changed.
//!
//! Handles are `Clone`; clones address the same manager and each clone
//! tracks its own notification cursor. Dropping the last clone detaches the
//! subscription.

use formant_core::{FieldValue, ValueMap};
use formant_forms::{
	FormManager, FormResult, FormState, SubmissionOutcome, Subscription,
};
use std::sync::Arc;
use tokio::sync::watch;

/// Binds one form manager to a reactive consumer.
///
/// # Examples
///
/// ```
/// use formant_forms::{FieldSpec, FormManager, FormSchema, InputKind};
/// use formant_reactive::FormHandle;
///
/// # tokio_test::block_on(async {
/// let schema = FormSchema::new()
/// 	.with_field(FieldSpec::new("title", InputKind::Text));
/// let manager = FormManager::new(schema).await;
/// let mut handle = FormHandle::new(manager);
///
/// handle.set_value("title", "Dune").await;
/// handle.changed().await;
/// assert_eq!(handle.snapshot().values["title"].as_str(), Some("Dune"));
/// # });
/// ```
pub struct FormHandle {
	manager: FormManager,
	_subscription: Arc<Subscription>,
	version: watch::Receiver<u64>,
}

impl Clone for FormHandle {
	fn clone(&self) -> Self {
		Self {
			manager: self.manager.clone(),
			_subscription: Arc::clone(&self._subscription),
			version: self.version.clone(),
		}
	}
}

impl FormHandle {
	/// Binds to a manager, subscribing for its events.
	pub fn new(manager: FormManager) -> Self {
		let (notify, version) = watch::channel(0u64);
		let subscription = manager.subscribe(move |_event| {
			notify.send_modify(|v| *v += 1);
			Ok(())
		});
		Self {
			manager,
			_subscription: Arc::new(subscription),
			version,
		}
	}

	/// The underlying manager, for operations the handle does not forward.
	pub fn manager(&self) -> &FormManager {
		&self.manager
	}

	/// A read-only clone of the current form state.
	pub fn snapshot(&self) -> FormState {
		self.manager.snapshot()
	}

	/// Waits until the form emits an event this handle has not yet observed.
	pub async fn changed(&mut self) {
		let _ = self.version.changed().await;
	}

	/// Whether an unobserved event is pending.
	pub fn has_changed(&self) -> bool {
		self.version.has_changed().unwrap_or(false)
	}

	pub async fn set_value(&self, name: &str, value: impl Into<FieldValue>) {
		self.manager.set_field_value(name, value).await;
	}

	pub async fn touch(&self, name: &str) {
		self.manager.set_field_touched(name, true).await;
	}

	pub async fn submit(&self) -> FormResult<SubmissionOutcome> {
		self.manager.submit().await
	}

	pub async fn reset(&self) {
		self.manager.reset().await;
	}

	pub fn values(&self) -> ValueMap {
		self.manager.values()
	}

	pub fn is_valid(&self) -> bool {
		self.manager.is_valid()
	}

	pub fn is_submitting(&self) -> bool {
		self.manager.is_submitting()
	}

	pub fn field_errors(&self, name: &str) -> Vec<String> {
		self.manager.field_errors(name)
	}
}
