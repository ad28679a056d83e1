//! Rule evaluation engine
//!
//! Evaluates [`ValidationRule`]s against a field's value and the full value
//! map, producing human-readable failure messages. Presence is enforced only
//! by the `Required` kind: every other rule passes on an absent or empty
//! value, so optional fields validate cleanly until they are filled in.
//!
//! Rules are never short-circuited. Every failing rule contributes its
//! message, in declaration order, so a UI can show several violations at
//! once.

use crate::rules::ValidationRule;
use crate::value::{FieldValue, ValueMap};
use regex::Regex;
use std::sync::LazyLock;

// Email shape: one `@`, no whitespace, and a dotted domain.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

// HTTP/HTTPS URL pattern.
//
// Validates URLs with:
// - http or https scheme only
// - Valid domain labels (no leading/trailing hyphens)
// - Optional port number (1-5 digits)
// - Optional path, query string, and fragment
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^https?://[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9\-]*[a-zA-Z0-9])?)*(:[0-9]{1,5})?(/[^\s?#]*)?(\?[^\s#]*)?(#[^\s]*)?$",
	)
	.expect("URL_REGEX: invalid regex pattern")
});

/// Evaluates every rule for a field and collects the failure messages.
///
/// An empty result means the value is valid.
///
/// # Examples
///
/// ```
/// use formant_core::{FieldValue, ValidationRule, run_rules};
/// use std::collections::HashMap;
///
/// # tokio_test::block_on(async {
/// let rules = vec![
/// 	ValidationRule::required("Name is required"),
/// 	ValidationRule::min_length(3, "Name is too short"),
/// ];
/// let values = HashMap::new();
///
/// let errors = run_rules(&rules, Some(&FieldValue::from("ab")), &values).await;
/// assert_eq!(errors, vec!["Name is too short".to_string()]);
///
/// let errors = run_rules(&rules, None, &values).await;
/// assert_eq!(errors, vec!["Name is required".to_string()]);
/// # });
/// ```
pub async fn run_rules(
	rules: &[ValidationRule],
	value: Option<&FieldValue>,
	values: &ValueMap,
) -> Vec<String> {
	let mut errors = Vec::new();
	for rule in rules {
		if let Some(message) = check_rule(rule, value, values).await {
			errors.push(message);
		}
	}
	errors
}

/// Evaluates a single rule, returning its failure message when the value
/// does not satisfy it.
pub async fn check_rule(
	rule: &ValidationRule,
	value: Option<&FieldValue>,
	values: &ValueMap,
) -> Option<String> {
	match rule {
		ValidationRule::Required { message } => {
			let present = value.is_some_and(|v| !v.is_blank());
			(!present).then(|| message.clone())
		}
		ValidationRule::Email { message } => check_shape(value, message, &EMAIL_REGEX),
		ValidationRule::Url { message } => check_shape(value, message, &URL_REGEX),
		ValidationRule::MinLength { min, message } => {
			let Some(text) = value.and_then(FieldValue::as_str) else {
				return None;
			};
			if text.is_empty() {
				return None;
			}
			(text.chars().count() < *min).then(|| message.clone())
		}
		ValidationRule::MaxLength { max, message } => {
			let Some(text) = value.and_then(FieldValue::as_str) else {
				return None;
			};
			if text.is_empty() {
				return None;
			}
			(text.chars().count() > *max).then(|| message.clone())
		}
		ValidationRule::Pattern { pattern, message } => {
			let Some(text) = value.and_then(FieldValue::as_str) else {
				return None;
			};
			if text.is_empty() {
				return None;
			}
			match Regex::new(pattern) {
				Ok(regex) => (!regex.is_match(text)).then(|| message.clone()),
				Err(error) => {
					tracing::warn!(%pattern, %error, "pattern rule failed to compile; failing closed");
					Some(message.clone())
				}
			}
		}
		ValidationRule::Min { limit, message } => check_bound(value, message, |n| n >= *limit),
		ValidationRule::Max { limit, message } => check_bound(value, message, |n| n <= *limit),
		ValidationRule::Custom { predicate, message } => {
			match predicate.check(value.cloned(), values.clone()).await {
				Ok(true) => None,
				Ok(false) => Some(message.clone()),
				Err(error) => {
					tracing::warn!(%error, "custom rule predicate failed; treating value as invalid");
					Some(message.clone())
				}
			}
		}
	}
}

// Shared shape check for email/URL rules: absent, null, or empty values
// pass (only `Required` enforces presence); non-text values cannot match.
fn check_shape(value: Option<&FieldValue>, message: &str, regex: &Regex) -> Option<String> {
	let value = value?;
	if value.is_null() {
		return None;
	}
	match value.as_str() {
		Some(text) if text.trim().is_empty() => None,
		Some(text) => (!regex.is_match(text)).then(|| message.to_string()),
		None => Some(message.to_string()),
	}
}

// Shared bound check for min/max rules. Numbers, numeric strings, and dates
// (epoch millis) are compared; absent, null, and blank values pass; values
// with no numeric reading fail.
fn check_bound(
	value: Option<&FieldValue>,
	message: &str,
	within: impl Fn(f64) -> bool,
) -> Option<String> {
	let value = value?;
	if value.is_null() {
		return None;
	}
	match value.as_number() {
		Some(n) => (!within(n)).then(|| message.to_string()),
		None if value.is_blank() => None,
		None => Some(message.to_string()),
	}
}
