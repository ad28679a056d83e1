//! Serializable form metadata
//!
//! A live [`FormManager`](crate::FormManager) holds closures (custom rule
//! predicates, the submission handler) and cannot be serialized. Rendering
//! layers that only need to *describe* the form — a client, a template, a
//! debug view — extract a plain-data [`FormMetadata`] instead: field
//! descriptors, rule descriptors without predicates, and the current errors.

use crate::manager::FormManager;
use crate::schema::InputKind;
use formant_core::{FieldValue, ValidationRule};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Plain-data descriptor of one validation rule.
///
/// Carries everything about a rule except a custom rule's predicate, which
/// cannot leave the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleMetadata {
	Required { message: String },
	Email { message: String },
	Url { message: String },
	MinLength { min: usize, message: String },
	MaxLength { max: usize, message: String },
	Pattern { pattern: String, message: String },
	Min { limit: f64, message: String },
	Max { limit: f64, message: String },
	Custom { message: String },
}

impl From<&ValidationRule> for RuleMetadata {
	fn from(rule: &ValidationRule) -> Self {
		match rule {
			ValidationRule::Required { message } => Self::Required {
				message: message.clone(),
			},
			ValidationRule::Email { message } => Self::Email {
				message: message.clone(),
			},
			ValidationRule::Url { message } => Self::Url {
				message: message.clone(),
			},
			ValidationRule::MinLength { min, message } => Self::MinLength {
				min: *min,
				message: message.clone(),
			},
			ValidationRule::MaxLength { max, message } => Self::MaxLength {
				max: *max,
				message: message.clone(),
			},
			ValidationRule::Pattern { pattern, message } => Self::Pattern {
				pattern: pattern.clone(),
				message: message.clone(),
			},
			ValidationRule::Min { limit, message } => Self::Min {
				limit: *limit,
				message: message.clone(),
			},
			ValidationRule::Max { limit, message } => Self::Max {
				limit: *limit,
				message: message.clone(),
			},
			ValidationRule::Custom { message, .. } => Self::Custom {
				message: message.clone(),
			},
		}
	}
}

/// Serializable descriptor of one field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMetadata {
	pub name: String,
	pub label: Option<String>,
	pub kind: InputKind,
	pub required: bool,
	pub help_text: Option<String>,
	pub value: Option<FieldValue>,
	pub rules: Vec<RuleMetadata>,
}

/// Serializable snapshot of a form's shape and current validation status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormMetadata {
	pub fields: Vec<FieldMetadata>,
	pub errors: HashMap<String, Vec<String>>,
	pub is_valid: bool,
	pub is_dirty: bool,
	pub submit_count: u32,
}

impl FormManager {
	/// Extracts a serializable description of the form.
	///
	/// # Examples
	///
	/// ```
	/// use formant_forms::{FieldSpec, FormManager, FormSchema, InputKind};
	///
	/// # tokio_test::block_on(async {
	/// let schema = FormSchema::new()
	/// 	.with_field(FieldSpec::new("email", InputKind::Email).required());
	/// let manager = FormManager::new(schema).await;
	///
	/// let metadata = manager.metadata();
	/// assert_eq!(metadata.fields.len(), 1);
	/// assert_eq!(metadata.fields[0].name, "email");
	///
	/// let json = serde_json::to_string(&metadata).expect("serializable");
	/// assert!(json.contains("\"email\""));
	/// # });
	/// ```
	pub fn metadata(&self) -> FormMetadata {
		let state = self.snapshot();
		let fields = state
			.fields
			.iter()
			.map(|field| FieldMetadata {
				name: field.name.clone(),
				label: field.label.clone(),
				kind: field.kind,
				required: field.required,
				help_text: field.help_text.clone(),
				value: state.values.get(&field.name).cloned(),
				rules: field.rules.iter().map(RuleMetadata::from).collect(),
			})
			.collect();

		FormMetadata {
			fields,
			errors: state.errors.clone(),
			is_valid: state.is_valid,
			is_dirty: state.is_dirty,
			submit_count: state.submit_count,
		}
	}
}
