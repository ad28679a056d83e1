//! The form manager
//!
//! [`FormManager`] is the single source of truth for one form instance: it
//! owns the state, mediates every read and write, drives validation timing,
//! and runs the submission lifecycle. Managers are cheap to clone; clones
//! address the same underlying form.
//!
//! Expected runtime conditions (an empty required field, a server-rejected
//! submit) are reported as values, never as errors. The `Err` channel of
//! [`FormResult`] is reserved for contract violations by the caller.

use crate::events::{EventDispatcher, EventError, FormEvent, Subscription};
use crate::schema::{FieldSpec, FormOptions, FormSchema, ValidationMode};
use crate::state::{ALL_FIELDS_KEY, FormState};
use crate::submission::{SubmissionErrors, SubmissionHandler, SubmissionOutcome};
use formant_core::{FieldValue, ValueMap, run_rules};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	/// `submit()` was called on a valid form with no handler configured.
	#[error("no submission handler provided")]
	MissingSubmissionHandler,
	/// `submit()` was called while an earlier submit is still in flight.
	#[error("a submission is already in progress")]
	SubmissionInProgress,
}

pub type FormResult<T> = Result<T, FormError>;

/// Stateful engine owning one form instance's live state and behavior.
///
/// # Examples
///
/// ```
/// use formant_forms::{FieldSpec, FormManager, FormSchema, InputKind};
///
/// # tokio_test::block_on(async {
/// let schema = FormSchema::new()
/// 	.with_field(FieldSpec::new("title", InputKind::Text).required());
/// let manager = FormManager::new(schema).await;
///
/// manager.set_field_value("title", "Dune").await;
/// assert!(manager.validate_form().await);
/// # });
/// ```
#[derive(Clone)]
pub struct FormManager {
	/// Pristine schema kept for resets.
	schema: Arc<FormSchema>,
	state: Arc<RwLock<FormState>>,
	dispatcher: EventDispatcher,
	handler: Option<SubmissionHandler>,
}

impl FormManager {
	/// Creates a manager with no submission handler.
	///
	/// If the schema sets `validate_on_mount`, the full validation sweep runs
	/// before the manager is returned.
	pub async fn new(schema: FormSchema) -> Self {
		Self::build(schema, None).await
	}

	/// Creates a manager with a submission handler.
	pub async fn with_handler(schema: FormSchema, handler: SubmissionHandler) -> Self {
		Self::build(schema, Some(handler)).await
	}

	async fn build(schema: FormSchema, handler: Option<SubmissionHandler>) -> Self {
		let state = FormState::from_schema(&schema);
		let manager = Self {
			schema: Arc::new(schema),
			state: Arc::new(RwLock::new(state)),
			dispatcher: EventDispatcher::new(),
			handler,
		};
		if manager.schema.options.validate_on_mount {
			manager.validate_form().await;
		}
		manager
	}

	/// Registers an event listener; the returned guard detaches it on drop.
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: Fn(&FormEvent) -> Result<(), EventError> + Send + Sync + 'static,
	{
		self.dispatcher.subscribe(listener)
	}

	pub fn options(&self) -> FormOptions {
		self.schema.options
	}

	/// A read-only clone of the current state.
	pub fn snapshot(&self) -> FormState {
		self.state.read().clone()
	}

	pub fn values(&self) -> ValueMap {
		self.state.read().values.clone()
	}

	pub fn field_value(&self, name: &str) -> Option<FieldValue> {
		self.state.read().values.get(name).cloned()
	}

	pub fn field_errors(&self, name: &str) -> Vec<String> {
		self.state.read().field_errors(name).to_vec()
	}

	/// Form-level errors recorded under the reserved `_all` key.
	pub fn form_errors(&self) -> Vec<String> {
		self.field_errors(ALL_FIELDS_KEY)
	}

	pub fn is_valid(&self) -> bool {
		self.state.read().is_valid
	}

	pub fn is_dirty(&self) -> bool {
		self.state.read().is_dirty
	}

	pub fn is_submitting(&self) -> bool {
		self.state.read().is_submitting
	}

	pub fn is_touched(&self, name: &str) -> bool {
		self.state.read().is_touched(name)
	}

	pub fn submit_count(&self) -> u32 {
		self.state.read().submit_count
	}

	pub fn last_submission(&self) -> Option<SubmissionOutcome> {
		self.state.read().last_submission.clone()
	}

	/// Stores a new value for a field and emits a change event.
	///
	/// An unknown field name is logged and ignored: a late UI event for a
	/// field that has since been removed must not crash the form. The field
	/// is validated immediately when the validation mode is `OnChange`, or
	/// when it already carries errors and the revalidate mode is `OnChange`.
	///
	/// # Examples
	///
	/// ```
	/// use formant_forms::{FieldSpec, FormManager, FormSchema, InputKind};
	///
	/// # tokio_test::block_on(async {
	/// let schema = FormSchema::new()
	/// 	.with_field(FieldSpec::new("title", InputKind::Text));
	/// let manager = FormManager::new(schema).await;
	///
	/// manager.set_field_value("title", "Dune").await;
	/// manager.set_field_value("unknown", "ignored").await;
	///
	/// assert_eq!(manager.field_value("unknown"), None);
	/// # });
	/// ```
	pub async fn set_field_value(&self, name: &str, value: impl Into<FieldValue>) {
		let value = value.into();
		let had_errors;
		{
			let mut state = self.state.write();
			match state.field_mut(name) {
				Some(field) => field.value = Some(value.clone()),
				None => {
					tracing::warn!(field = name, "ignoring value for unknown field");
					return;
				}
			}
			state.values.insert(name.to_string(), value);
			state.is_dirty = true;
			had_errors = !state.field_errors(name).is_empty();
		}
		self.dispatcher.emit(&FormEvent::FieldChanged {
			name: name.to_string(),
		});

		let options = self.schema.options;
		if options.validation_mode == ValidationMode::OnChange
			|| (had_errors && options.revalidate_mode == ValidationMode::OnChange)
		{
			self.validate_field(name).await;
		}
	}

	/// Records a field's touched flag and emits a blur event.
	///
	/// When the flag is set and the validation mode is `OnBlur` (or the field
	/// already carries errors and the revalidate mode is `OnBlur`), the field
	/// is validated.
	pub async fn set_field_touched(&self, name: &str, touched: bool) {
		let had_errors;
		{
			let mut state = self.state.write();
			if state.field(name).is_none() {
				tracing::warn!(field = name, "ignoring touch for unknown field");
				return;
			}
			state.touched.insert(name.to_string(), touched);
			had_errors = !state.field_errors(name).is_empty();
		}
		self.dispatcher.emit(&FormEvent::FieldBlurred {
			name: name.to_string(),
		});

		let options = self.schema.options;
		if touched
			&& (options.validation_mode == ValidationMode::OnBlur
				|| (had_errors && options.revalidate_mode == ValidationMode::OnBlur))
		{
			self.validate_field(name).await;
		}
	}

	/// Directly replaces one field's error list, e.g. with server-side
	/// validation results. An empty list clears the entry. Accepts the
	/// reserved form-level key as well as any known field.
	pub fn set_field_error(&self, name: &str, errors: Vec<String>) {
		let mut state = self.state.write();
		if name != ALL_FIELDS_KEY && state.field(name).is_none() {
			tracing::warn!(field = name, "ignoring errors for unknown field");
			return;
		}
		state.set_field_errors(name, errors);
	}

	/// Validates one field against the current values and records the
	/// result. Returns whether the field passed.
	pub async fn validate_field(&self, name: &str) -> bool {
		let (rules, value, values) = {
			let state = self.state.read();
			let Some(field) = state.field(name) else {
				tracing::warn!(field = name, "cannot validate unknown field");
				return true;
			};
			(
				field.rules.clone(),
				state.values.get(name).cloned(),
				state.values.clone(),
			)
		};

		let errors = run_rules(&rules, value.as_ref(), &values).await;
		let passed = errors.is_empty();
		self.state.write().set_field_errors(name, errors);
		passed
	}

	/// Validates every field and replaces the entire error map in one step,
	/// so aggregate validity never passes through an inconsistent
	/// intermediate. Emits a validation event when the form is invalid.
	/// Returns the aggregate validity.
	pub async fn validate_form(&self) -> bool {
		let (fields, values) = {
			let state = self.state.read();
			(state.fields.clone(), state.values.clone())
		};

		let mut errors: HashMap<String, Vec<String>> = HashMap::new();
		for field in &fields {
			let messages = run_rules(&field.rules, values.get(&field.name), &values).await;
			if !messages.is_empty() {
				errors.insert(field.name.clone(), messages);
			}
		}

		let is_valid = errors.is_empty();
		{
			let mut state = self.state.write();
			state.errors = errors.clone();
			state.recompute_validity();
		}
		if !is_valid {
			self.dispatcher.emit(&FormEvent::ValidationFailed { errors });
		}
		is_valid
	}

	/// Runs the submission lifecycle.
	///
	/// Validation failures and handler failures are reported through the
	/// returned [`SubmissionOutcome`], never raised. The `Err` channel fires
	/// only for caller bugs: submitting a valid form with no handler
	/// configured, or submitting while a submit is already in flight.
	///
	/// On handler success the outcome is stored and, when the schema sets
	/// `reset_on_submit`, the form resets to its defaults (the stored outcome
	/// survives the reset). On handler failure, structured field errors from
	/// the handler are merged into the live error map.
	pub async fn submit(&self) -> FormResult<SubmissionOutcome> {
		{
			let mut state = self.state.write();
			if state.is_submitting {
				return Err(FormError::SubmissionInProgress);
			}
			state.is_submitting = true;
			state.submit_count += 1;
		}
		self.dispatcher.emit(&FormEvent::SubmissionStarted);
		tracing::debug!(submit_count = self.submit_count(), "submission started");

		if !self.validate_form().await {
			let errors = self.state.read().errors.clone();
			let outcome = SubmissionOutcome::failed_with_fields(errors);
			{
				let mut state = self.state.write();
				state.last_submission = Some(outcome.clone());
				state.is_submitting = false;
			}
			self.dispatcher.emit(&FormEvent::SubmissionFailed);
			return Ok(outcome);
		}

		let Some(handler) = self.handler.clone() else {
			self.state.write().is_submitting = false;
			return Err(FormError::MissingSubmissionHandler);
		};

		let values = self.values();
		let outcome = match handler(values).await {
			Ok(outcome) => outcome,
			Err(error) => {
				tracing::debug!(%error, "submission handler returned an error");
				SubmissionOutcome::failed_with_message(error.to_string())
			}
		};

		if outcome.success {
			{
				let mut state = self.state.write();
				state.last_submission = Some(outcome.clone());
				state.is_submitting = false;
			}
			self.dispatcher.emit(&FormEvent::SubmissionSucceeded);
			if self.schema.options.reset_on_submit {
				self.reset_internal(true).await;
			}
		} else {
			{
				let mut state = self.state.write();
				state.last_submission = Some(outcome.clone());
				state.is_submitting = false;
				if let Some(SubmissionErrors::Fields(fields)) = &outcome.errors {
					for (name, messages) in fields {
						state
							.errors
							.entry(name.clone())
							.or_default()
							.extend(messages.iter().cloned());
					}
					state.recompute_validity();
				}
			}
			self.dispatcher.emit(&FormEvent::SubmissionFailed);
		}
		Ok(outcome)
	}

	/// Discards all interactive state and rebuilds from the schema, as if
	/// the manager had just been constructed. Clears the stored submission
	/// outcome; the automatic reset after a successful submit keeps it so
	/// the caller can still read the result.
	pub async fn reset(&self) {
		self.reset_internal(false).await;
	}

	async fn reset_internal(&self, preserve_last_submission: bool) {
		{
			let mut state = self.state.write();
			let last_submission = state.last_submission.take();
			*state = FormState::from_schema(&self.schema);
			if preserve_last_submission {
				state.last_submission = last_submission;
			}
		}
		self.dispatcher.emit(&FormEvent::FormReset);
		if self.schema.options.validate_on_mount {
			self.validate_form().await;
		}
	}

	/// Applies several field values at once, with a single event emission.
	/// Unknown names are logged and skipped.
	pub fn set_values(&self, entries: ValueMap) {
		let mut applied = Vec::new();
		{
			let mut state = self.state.write();
			for (name, value) in entries {
				match state.field_mut(&name) {
					Some(field) => field.value = Some(value.clone()),
					None => {
						tracing::warn!(field = %name, "ignoring value for unknown field");
						continue;
					}
				}
				state.values.insert(name.clone(), value);
				applied.push(name);
			}
			if !applied.is_empty() {
				state.is_dirty = true;
			}
			state.recompute_validity();
		}
		if !applied.is_empty() {
			self.dispatcher
				.emit(&FormEvent::FieldsChanged { names: applied });
		}
	}

	/// Applies several error lists at once (empty lists clear their entries)
	/// and emits a single validation event with the resulting error map.
	pub fn set_errors(&self, entries: HashMap<String, Vec<String>>) {
		let errors = {
			let mut state = self.state.write();
			for (name, messages) in entries {
				if name != ALL_FIELDS_KEY && state.field(&name).is_none() {
					tracing::warn!(field = %name, "ignoring errors for unknown field");
					continue;
				}
				state.set_field_errors(&name, messages);
			}
			state.errors.clone()
		};
		self.dispatcher.emit(&FormEvent::ValidationFailed { errors });
	}

	/// Inserts a new field at runtime, seeding its value. The field is
	/// validated immediately when it arrives with a declared value and rules.
	/// A duplicate name is logged and ignored.
	pub async fn add_field(&self, field: FieldSpec) {
		let name = field.name.clone();
		let validate_now = field.value.is_some() && !field.rules.is_empty();
		{
			let mut state = self.state.write();
			if state.field(&name).is_some() {
				tracing::warn!(field = %name, "cannot add duplicate field");
				return;
			}
			let mut field = field;
			if let Some(seed) = field.seed_value() {
				field.value = Some(seed.clone());
				state.values.insert(name.clone(), seed);
			}
			state.fields.push(field);
		}
		if validate_now {
			self.validate_field(&name).await;
		}
	}

	/// Removes a field together with its value, errors, and touched entries,
	/// and recomputes aggregate validity. Returns the removed field.
	pub fn remove_field(&self, name: &str) -> Option<FieldSpec> {
		let mut state = self.state.write();
		let Some(position) = state.fields.iter().position(|f| f.name == name) else {
			tracing::warn!(field = name, "cannot remove unknown field");
			return None;
		};
		let field = state.fields.remove(position);
		state.values.remove(name);
		state.errors.remove(name);
		state.touched.remove(name);
		state.recompute_validity();
		Some(field)
	}

	/// Applies partial attribute updates to an existing field. The values
	/// map is synchronized when the update changes the field's value; the
	/// field's name is not updatable.
	pub fn update_field(&self, name: &str, update: impl FnOnce(&mut FieldSpec)) {
		let mut state = self.state.write();
		let Some(field) = state.field_mut(name) else {
			tracing::warn!(field = name, "cannot update unknown field");
			return;
		};
		let before = field.value.clone();
		update(field);
		field.name = name.to_string();
		let after = field.value.clone();
		if after != before {
			match after {
				Some(value) => {
					state.values.insert(name.to_string(), value);
				}
				None => {
					state.values.remove(name);
				}
			}
		}
	}
}
