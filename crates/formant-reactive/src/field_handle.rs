//! Field-scoped binding handle
//!
//! In a large form, re-rendering every input on every keystroke is wasted
//! work. [`FieldHandle`] subscribes to a single named field: it reacts to
//! change and blur events for that name (including bulk changes containing
//! it), to every validation sweep, and to a form reset — and stays quiet for
//! everything else.

use formant_core::FieldValue;
use formant_forms::{FormEvent, FormManager, Subscription};
use std::sync::Arc;
use tokio::sync::watch;

/// Binds one named field of a form to a reactive consumer.
///
/// # Examples
///
/// ```
/// use formant_forms::{FieldSpec, FormManager, FormSchema, InputKind};
/// use formant_reactive::FieldHandle;
///
/// # tokio_test::block_on(async {
/// let schema = FormSchema::new()
/// 	.with_field(FieldSpec::new("title", InputKind::Text))
/// 	.with_field(FieldSpec::new("author", InputKind::Text));
/// let manager = FormManager::new(schema).await;
/// let title = FieldHandle::new(manager.clone(), "title");
///
/// manager.set_field_value("author", "Herbert").await;
/// assert!(!title.has_changed());
///
/// manager.set_field_value("title", "Dune").await;
/// assert!(title.has_changed());
/// # });
/// ```
pub struct FieldHandle {
	manager: FormManager,
	name: String,
	_subscription: Arc<Subscription>,
	version: watch::Receiver<u64>,
}

impl Clone for FieldHandle {
	fn clone(&self) -> Self {
		Self {
			manager: self.manager.clone(),
			name: self.name.clone(),
			_subscription: Arc::clone(&self._subscription),
			version: self.version.clone(),
		}
	}
}

impl FieldHandle {
	pub fn new(manager: FormManager, name: impl Into<String>) -> Self {
		let name = name.into();
		let (notify, version) = watch::channel(0u64);
		let filter_name = name.clone();
		let subscription = manager.subscribe(move |event| {
			let relevant = match event {
				FormEvent::FieldChanged { name } | FormEvent::FieldBlurred { name } => {
					*name == filter_name
				}
				FormEvent::FieldsChanged { names } => names.iter().any(|n| *n == filter_name),
				FormEvent::ValidationFailed { .. } | FormEvent::FormReset => true,
				FormEvent::SubmissionStarted
				| FormEvent::SubmissionSucceeded
				| FormEvent::SubmissionFailed => false,
			};
			if relevant {
				notify.send_modify(|v| *v += 1);
			}
			Ok(())
		});
		Self {
			manager,
			name,
			_subscription: Arc::new(subscription),
			version,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn value(&self) -> Option<FieldValue> {
		self.manager.field_value(&self.name)
	}

	pub fn errors(&self) -> Vec<String> {
		self.manager.field_errors(&self.name)
	}

	pub fn is_touched(&self) -> bool {
		self.manager.is_touched(&self.name)
	}

	/// Stores a new value for this field.
	pub async fn set(&self, value: impl Into<FieldValue>) {
		self.manager.set_field_value(&self.name, value).await;
	}

	/// Marks this field touched, as on input blur.
	pub async fn blur(&self) {
		self.manager.set_field_touched(&self.name, true).await;
	}

	/// Waits until an event relevant to this field arrives.
	pub async fn changed(&mut self) {
		let _ = self.version.changed().await;
	}

	/// Whether an unobserved relevant event is pending.
	pub fn has_changed(&self) -> bool {
		self.version.has_changed().unwrap_or(false)
	}
}
