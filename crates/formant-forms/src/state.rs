//! Interactive form state
//!
//! [`FormState`] is the mutable snapshot a manager owns: the live fields,
//! their values, errors, and touched flags, plus the aggregate bookkeeping
//! (validity, dirtiness, submission lifecycle). Consumers only ever see
//! clones handed out by the manager; they never mutate state directly.

use crate::schema::{FieldSpec, FormSchema};
use crate::submission::SubmissionOutcome;
use formant_core::ValueMap;
use std::collections::HashMap;

/// Reserved key for form-level errors that target no single field.
///
/// Cross-field messages (and structured server errors addressed to the whole
/// form) land under this key in the error map.
pub const ALL_FIELDS_KEY: &str = "_all";

/// The complete state of one form instance at a point in time.
#[derive(Debug, Clone)]
pub struct FormState {
	/// Live fields, in declaration order.
	pub fields: Vec<FieldSpec>,
	/// Current value per field name.
	pub values: ValueMap,
	/// Error messages per field name; a field without errors has no entry.
	pub errors: HashMap<String, Vec<String>>,
	/// Touched flag per field name.
	pub touched: HashMap<String, bool>,
	/// True iff no field carries a non-empty error list.
	pub is_valid: bool,
	/// True once any value has been mutated since construction or reset.
	pub is_dirty: bool,
	pub is_submitting: bool,
	pub submit_count: u32,
	/// Outcome of the most recent submit attempt.
	pub last_submission: Option<SubmissionOutcome>,
}

impl FormState {
	/// Builds the initial state for a schema: fields seeded with their
	/// declared value-or-default, no errors, nothing touched.
	pub(crate) fn from_schema(schema: &FormSchema) -> Self {
		let mut fields = schema.fields.clone();
		let mut values = ValueMap::new();
		for field in &mut fields {
			if let Some(seed) = field.seed_value() {
				field.value = Some(seed.clone());
				values.insert(field.name.clone(), seed);
			}
		}
		Self {
			fields,
			values,
			errors: HashMap::new(),
			touched: HashMap::new(),
			is_valid: true,
			is_dirty: false,
			is_submitting: false,
			submit_count: 0,
			last_submission: None,
		}
	}

	pub fn field(&self, name: &str) -> Option<&FieldSpec> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut FieldSpec> {
		self.fields.iter_mut().find(|f| f.name == name)
	}

	/// Error messages for one field; empty when the field is valid.
	pub fn field_errors(&self, name: &str) -> &[String] {
		self.errors.get(name).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn is_touched(&self, name: &str) -> bool {
		self.touched.get(name).copied().unwrap_or(false)
	}

	/// Replaces one field's error entry. An empty list removes the entry so
	/// that presence checks on the map stay simple. Aggregate validity is
	/// recomputed on every call.
	pub(crate) fn set_field_errors(&mut self, name: &str, errors: Vec<String>) {
		if errors.is_empty() {
			self.errors.remove(name);
		} else {
			self.errors.insert(name.to_string(), errors);
		}
		self.recompute_validity();
	}

	pub(crate) fn recompute_validity(&mut self) {
		self.is_valid = self.errors.values().all(|errors| errors.is_empty());
	}
}
