//! Declarative validation rules
//!
//! A [`ValidationRule`] describes one constraint on one field. Rules are plain
//! data apart from the `Custom` kind, which carries a caller-supplied
//! predicate evaluated against the field's value and the whole value map
//! (cross-field rules such as password confirmation need the latter).
//!
//! The module also ships rule bundles for inputs that recur across forms:
//! password strength, password confirmation, ISBN, rating, and publication
//! year.

use crate::isbn::IsbnValidator;
use crate::value::{FieldValue, ValueMap};
use chrono::{Datelike, Utc};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by a custom rule predicate.
pub type PredicateFuture = Pin<Box<dyn Future<Output = anyhow::Result<bool>> + Send>>;

type PredicateFn = Arc<dyn Fn(Option<FieldValue>, ValueMap) -> PredicateFuture + Send + Sync>;

/// Caller-supplied predicate for [`ValidationRule::Custom`].
///
/// Predicates receive the field's current value (absent when the field was
/// never set) and a snapshot of the full value map. They resolve to
/// `Ok(true)` when the value is acceptable. An `Err` is treated as a failed
/// check by the evaluator, never propagated.
#[derive(Clone)]
pub struct CustomPredicate(PredicateFn);

impl CustomPredicate {
	/// Wraps an asynchronous predicate.
	pub fn new<F>(predicate: F) -> Self
	where
		F: Fn(Option<FieldValue>, ValueMap) -> PredicateFuture + Send + Sync + 'static,
	{
		Self(Arc::new(predicate))
	}

	/// Wraps a synchronous predicate.
	///
	/// # Examples
	///
	/// ```
	/// use formant_core::{CustomPredicate, FieldValue};
	///
	/// let non_negative = CustomPredicate::sync(|value, _values| {
	/// 	value.and_then(FieldValue::as_number).is_none_or(|n| n >= 0.0)
	/// });
	/// ```
	pub fn sync<F>(predicate: F) -> Self
	where
		F: Fn(Option<&FieldValue>, &ValueMap) -> bool + Send + Sync + 'static,
	{
		let predicate = Arc::new(predicate);
		let wrapped: PredicateFn = Arc::new(move |value, values| {
			let predicate = Arc::clone(&predicate);
			Box::pin(async move { Ok(predicate(value.as_ref(), &values)) })
		});
		Self(wrapped)
	}

	/// Runs the predicate against a value and the full value map.
	pub async fn check(&self, value: Option<FieldValue>, values: ValueMap) -> anyhow::Result<bool> {
		(self.0)(value, values).await
	}
}

impl fmt::Debug for CustomPredicate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("CustomPredicate(..)")
	}
}

/// One constraint attached to a field, with its failure message.
///
/// # Examples
///
/// ```
/// use formant_core::ValidationRule;
///
/// let rule = ValidationRule::min_length(3, "Use at least 3 characters");
/// assert_eq!(rule.message(), "Use at least 3 characters");
/// ```
#[derive(Debug, Clone)]
pub enum ValidationRule {
	Required { message: String },
	Email { message: String },
	Url { message: String },
	MinLength { min: usize, message: String },
	MaxLength { max: usize, message: String },
	Pattern { pattern: String, message: String },
	Min { limit: f64, message: String },
	Max { limit: f64, message: String },
	Custom { predicate: CustomPredicate, message: String },
}

impl ValidationRule {
	pub fn required(message: impl Into<String>) -> Self {
		Self::Required {
			message: message.into(),
		}
	}

	pub fn email(message: impl Into<String>) -> Self {
		Self::Email {
			message: message.into(),
		}
	}

	pub fn url(message: impl Into<String>) -> Self {
		Self::Url {
			message: message.into(),
		}
	}

	pub fn min_length(min: usize, message: impl Into<String>) -> Self {
		Self::MinLength {
			min,
			message: message.into(),
		}
	}

	pub fn max_length(max: usize, message: impl Into<String>) -> Self {
		Self::MaxLength {
			max,
			message: message.into(),
		}
	}

	/// A rule matching string values against a regular expression.
	///
	/// The pattern is compiled when the rule is evaluated; a pattern that
	/// fails to compile makes the rule fail closed.
	pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Pattern {
			pattern: pattern.into(),
			message: message.into(),
		}
	}

	pub fn min(limit: f64, message: impl Into<String>) -> Self {
		Self::Min {
			limit,
			message: message.into(),
		}
	}

	pub fn max(limit: f64, message: impl Into<String>) -> Self {
		Self::Max {
			limit,
			message: message.into(),
		}
	}

	pub fn custom(predicate: CustomPredicate, message: impl Into<String>) -> Self {
		Self::Custom {
			predicate,
			message: message.into(),
		}
	}

	/// The human-readable message reported when this rule fails.
	pub fn message(&self) -> &str {
		match self {
			Self::Required { message }
			| Self::Email { message }
			| Self::Url { message }
			| Self::MinLength { message, .. }
			| Self::MaxLength { message, .. }
			| Self::Pattern { message, .. }
			| Self::Min { message, .. }
			| Self::Max { message, .. }
			| Self::Custom { message, .. } => message,
		}
	}
}

/// Password strength: required, at least 8 characters, and a mix of
/// lowercase, uppercase, and digits.
///
/// The complexity check is a custom predicate because it needs three
/// independent character-class tests.
pub fn password_rules() -> Vec<ValidationRule> {
	let complexity = CustomPredicate::sync(|value, _values| {
		let Some(text) = value.and_then(FieldValue::as_str) else {
			return true;
		};
		if text.trim().is_empty() {
			return true;
		}
		text.chars().any(|c| c.is_ascii_lowercase())
			&& text.chars().any(|c| c.is_ascii_uppercase())
			&& text.chars().any(|c| c.is_ascii_digit())
	});
	vec![
		ValidationRule::required("Password is required"),
		ValidationRule::min_length(8, "Password must be at least 8 characters"),
		ValidationRule::custom(
			complexity,
			"Password must contain a lowercase letter, an uppercase letter, and a digit",
		),
	]
}

/// Password confirmation: required, and equal to the named password field.
///
/// # Examples
///
/// ```
/// use formant_core::{FieldValue, confirm_password_rules, run_rules};
/// use std::collections::HashMap;
///
/// # tokio_test::block_on(async {
/// let rules = confirm_password_rules("password");
/// let mut values = HashMap::new();
/// values.insert("password".to_string(), FieldValue::from("Abc12345"));
/// values.insert("confirm_password".to_string(), FieldValue::from("Abc1234"));
///
/// let errors = run_rules(&rules, values.get("confirm_password"), &values).await;
/// assert_eq!(errors, vec!["Passwords do not match".to_string()]);
/// # });
/// ```
pub fn confirm_password_rules(password_field: impl Into<String>) -> Vec<ValidationRule> {
	let password_field = password_field.into();
	let matches_password = CustomPredicate::sync(move |value, values| {
		let Some(value) = value else {
			return true;
		};
		if value.is_blank() {
			return true;
		}
		values.get(&password_field) == Some(value)
	});
	vec![
		ValidationRule::required("Please confirm your password"),
		ValidationRule::custom(matches_password, "Passwords do not match"),
	]
}

/// ISBN input: digits and hyphens in a 10- or 13-digit grouping, with a
/// valid check digit.
pub fn isbn_rules() -> Vec<ValidationRule> {
	let validator = IsbnValidator::new();
	let checksum = CustomPredicate::sync(move |value, _values| {
		let Some(text) = value.and_then(FieldValue::as_str) else {
			return true;
		};
		if text.trim().is_empty() {
			return true;
		}
		validator.validate(text).is_ok()
	});
	vec![
		ValidationRule::pattern(
			crate::isbn::ISBN_PATTERN,
			"Enter an ISBN as 10 or 13 digits, with optional hyphens",
		),
		ValidationRule::custom(checksum, "Enter a valid ISBN"),
	]
}

/// Rating input bounded to 1..=5.
pub fn rating_rules() -> Vec<ValidationRule> {
	vec![
		ValidationRule::min(1.0, "Rating must be at least 1"),
		ValidationRule::max(5.0, "Rating must be at most 5"),
	]
}

/// Publication year bounded to 1000..=(current year + 1).
///
/// The upper bound admits next year so that forthcoming titles validate.
pub fn publication_year_rules() -> Vec<ValidationRule> {
	let next_year = Utc::now().year() + 1;
	vec![
		ValidationRule::min(1000.0, "Year must be 1000 or later"),
		ValidationRule::max(
			next_year as f64,
			format!("Year must be no later than {next_year}"),
		),
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_message_accessor_covers_every_kind() {
		let rules = vec![
			ValidationRule::required("a"),
			ValidationRule::email("b"),
			ValidationRule::url("c"),
			ValidationRule::min_length(1, "d"),
			ValidationRule::max_length(2, "e"),
			ValidationRule::pattern("^x$", "f"),
			ValidationRule::min(0.0, "g"),
			ValidationRule::max(1.0, "h"),
			ValidationRule::custom(CustomPredicate::sync(|_, _| true), "i"),
		];

		let messages: Vec<&str> = rules.iter().map(|r| r.message()).collect();
		assert_eq!(messages, vec!["a", "b", "c", "d", "e", "f", "g", "h", "i"]);
	}

	#[tokio::test]
	async fn test_sync_predicate_sees_value_and_map() {
		// Arrange
		let predicate = CustomPredicate::sync(|value, values| {
			value.and_then(|v| v.as_str().map(str::to_string))
				== values.get("peer").and_then(|v| v.as_str().map(str::to_string))
		});
		let mut values = ValueMap::new();
		values.insert("peer".to_string(), FieldValue::from("same"));

		// Act
		let matched = predicate
			.check(Some(FieldValue::from("same")), values.clone())
			.await
			.expect("predicate runs");
		let mismatched = predicate
			.check(Some(FieldValue::from("other")), values)
			.await
			.expect("predicate runs");

		// Assert
		assert!(matched);
		assert!(!mismatched);
	}

	#[tokio::test]
	async fn test_async_predicate_error_surfaces_as_err() {
		let predicate = CustomPredicate::new(|_value, _values| {
			Box::pin(async { Err(anyhow::anyhow!("lookup failed")) })
		});

		let result = predicate.check(None, ValueMap::new()).await;
		assert!(result.is_err());
	}

	#[rstest]
	fn test_publication_year_upper_bound_tracks_current_year() {
		let rules = publication_year_rules();

		let ValidationRule::Max { limit, .. } = &rules[1] else {
			panic!("expected a max rule");
		};
		assert_eq!(*limit, (Utc::now().year() + 1) as f64);
	}
}
