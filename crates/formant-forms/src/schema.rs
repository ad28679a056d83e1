//! Form schemas
//!
//! A [`FormSchema`] is the static declaration a form instance is built from:
//! an ordered list of [`FieldSpec`]s plus the [`FormOptions`] mode flags.
//! Schemas are plain values; the interactive state derived from them lives in
//! the manager.

use formant_core::{FieldValue, ValidationRule};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static FIELD_ID_ALLOCATOR: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier for a field, stable across the field's lifetime.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldId(pub u64);

impl FieldId {
	pub fn next() -> Self {
		Self(FIELD_ID_ALLOCATOR.fetch_add(1, Ordering::SeqCst))
	}
}

/// Input control kind for a field.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
	Text,
	Email,
	Password,
	Number,
	Date,
	Select,
	TextArea,
	Checkbox,
	Radio,
}

impl InputKind {
	// String-backed kinds seed an empty string so that text inputs start
	// bound; checkboxes start unchecked; numbers and dates start unset.
	fn empty_value(self) -> Option<FieldValue> {
		match self {
			InputKind::Text
			| InputKind::Email
			| InputKind::Password
			| InputKind::Select
			| InputKind::TextArea
			| InputKind::Radio => Some(FieldValue::Text(String::new())),
			InputKind::Checkbox => Some(FieldValue::Bool(false)),
			InputKind::Number | InputKind::Date => None,
		}
	}
}

/// One editable input slot in a form.
///
/// # Examples
///
/// ```
/// use formant_core::ValidationRule;
/// use formant_forms::{FieldSpec, InputKind};
///
/// let field = FieldSpec::new("email", InputKind::Email)
/// 	.with_label("Email address")
/// 	.required()
/// 	.with_rule(ValidationRule::email("Enter a valid email address"));
///
/// assert_eq!(field.name, "email");
/// assert!(field.required);
/// assert_eq!(field.rules.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FieldSpec {
	pub id: FieldId,
	pub name: String,
	pub label: Option<String>,
	pub kind: InputKind,
	/// Current value; mutated on every edit once the field is live.
	pub value: Option<FieldValue>,
	/// Declared default, used when no explicit value is set.
	pub default: Option<FieldValue>,
	pub required: bool,
	pub rules: Vec<ValidationRule>,
	pub help_text: Option<String>,
}

impl FieldSpec {
	pub fn new(name: impl Into<String>, kind: InputKind) -> Self {
		Self {
			id: FieldId::next(),
			name: name.into(),
			label: None,
			kind,
			value: None,
			default: None,
			required: false,
			rules: Vec::new(),
			help_text: None,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_default(mut self, default: impl Into<FieldValue>) -> Self {
		self.default = Some(default.into());
		self
	}

	pub fn with_value(mut self, value: impl Into<FieldValue>) -> Self {
		self.value = Some(value.into());
		self
	}

	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn with_rule(mut self, rule: ValidationRule) -> Self {
		self.rules.push(rule);
		self
	}

	pub fn with_rules(mut self, rules: impl IntoIterator<Item = ValidationRule>) -> Self {
		self.rules.extend(rules);
		self
	}

	/// Marks the field required and attaches the presence rule.
	pub fn required(self) -> Self {
		self.required_with_message("This field is required")
	}

	/// Marks the field required with a custom presence message.
	///
	/// # Examples
	///
	/// ```
	/// use formant_forms::{FieldSpec, InputKind};
	///
	/// let field = FieldSpec::new("title", InputKind::Text)
	/// 	.required_with_message("Every book needs a title");
	/// assert!(field.required);
	/// ```
	pub fn required_with_message(mut self, message: impl Into<String>) -> Self {
		self.required = true;
		self.rules.push(ValidationRule::required(message));
		self
	}

	/// The value this field starts with: its declared value, else its
	/// default, else the kind's empty value.
	pub fn seed_value(&self) -> Option<FieldValue> {
		self.value
			.clone()
			.or_else(|| self.default.clone())
			.or_else(|| self.kind.empty_value())
	}
}

/// When automatic validation runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
	OnChange,
	OnBlur,
	OnSubmit,
}

/// Mode flags governing a form's validation timing and submit behavior.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FormOptions {
	/// When a pristine field is first validated automatically.
	pub validation_mode: ValidationMode,
	/// When a field that already carries errors is re-validated. Defaults to
	/// `OnChange` so feedback clears as soon as the user fixes the input.
	pub revalidate_mode: ValidationMode,
	/// Reset the form to its schema defaults after a successful submit.
	pub reset_on_submit: bool,
	/// Run a full validation sweep at construction time.
	pub validate_on_mount: bool,
}

impl Default for FormOptions {
	fn default() -> Self {
		Self {
			validation_mode: ValidationMode::OnSubmit,
			revalidate_mode: ValidationMode::OnChange,
			reset_on_submit: false,
			validate_on_mount: false,
		}
	}
}

/// Static declaration of a form: ordered fields plus mode flags.
///
/// Field names must be unique; a duplicate is logged and ignored.
///
/// # Examples
///
/// ```
/// use formant_forms::{FieldSpec, FormSchema, InputKind};
///
/// let schema = FormSchema::new()
/// 	.with_field(FieldSpec::new("title", InputKind::Text).required())
/// 	.with_field(FieldSpec::new("rating", InputKind::Number));
///
/// assert_eq!(schema.len(), 2);
/// assert!(schema.field("title").is_some());
/// assert!(schema.field("missing").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
	pub fields: Vec<FieldSpec>,
	pub options: FormOptions,
}

impl FormSchema {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_field(mut self, field: FieldSpec) -> Self {
		if self.field(&field.name).is_some() {
			tracing::warn!(field = %field.name, "duplicate field name in schema; ignoring");
			return self;
		}
		self.fields.push(field);
		self
	}

	pub fn with_options(mut self, options: FormOptions) -> Self {
		self.options = options;
		self
	}

	pub fn field(&self, name: &str) -> Option<&FieldSpec> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}
