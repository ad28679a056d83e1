//! Typed field values
//!
//! Form inputs carry one of a small set of value kinds. [`FieldValue`] models
//! them explicitly instead of reusing raw JSON so that dates order correctly
//! and numeric coercion stays in one place. An absent entry in a [`ValueMap`]
//! means the field has never been given a value; [`FieldValue::Null`] means it
//! was explicitly cleared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Map from field name to its current value.
pub type ValueMap = HashMap<String, FieldValue>;

/// A single form input value.
///
/// # Examples
///
/// ```
/// use formant_core::FieldValue;
///
/// let value = FieldValue::from("hello");
/// assert_eq!(value.as_str(), Some("hello"));
/// assert!(!value.is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
	Null,
	Bool(bool),
	Number(f64),
	Text(String),
	Date(DateTime<Utc>),
}

impl FieldValue {
	/// Returns `true` for the explicit null value.
	pub fn is_null(&self) -> bool {
		matches!(self, FieldValue::Null)
	}

	/// Returns `true` when the value counts as missing for presence checks:
	/// null, a string that is empty after trimming, or a NaN number.
	/// Booleans and dates are never blank.
	///
	/// # Examples
	///
	/// ```
	/// use formant_core::FieldValue;
	///
	/// assert!(FieldValue::Null.is_blank());
	/// assert!(FieldValue::Text("   ".to_string()).is_blank());
	/// assert!(FieldValue::Number(f64::NAN).is_blank());
	/// assert!(!FieldValue::Bool(false).is_blank());
	/// ```
	pub fn is_blank(&self) -> bool {
		match self {
			FieldValue::Null => true,
			FieldValue::Text(s) => s.trim().is_empty(),
			FieldValue::Number(n) => n.is_nan(),
			FieldValue::Bool(_) | FieldValue::Date(_) => false,
		}
	}

	/// Borrows the inner string, if this is a text value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			FieldValue::Text(s) => Some(s.as_str()),
			_ => None,
		}
	}

	/// Coerces the value to a number for range comparisons.
	///
	/// Numbers pass through, numeric-parseable strings are parsed, and dates
	/// compare via their epoch-millisecond timestamp. Everything else (null,
	/// booleans, non-numeric strings) yields `None`.
	///
	/// # Examples
	///
	/// ```
	/// use chrono::{TimeZone, Utc};
	/// use formant_core::FieldValue;
	///
	/// assert_eq!(FieldValue::Number(4.0).as_number(), Some(4.0));
	/// assert_eq!(FieldValue::Text("12.5".to_string()).as_number(), Some(12.5));
	/// assert_eq!(FieldValue::Text("abc".to_string()).as_number(), None);
	///
	/// let date = Utc.timestamp_millis_opt(86_400_000).unwrap();
	/// assert_eq!(FieldValue::Date(date).as_number(), Some(86_400_000.0));
	/// ```
	pub fn as_number(&self) -> Option<f64> {
		match self {
			FieldValue::Number(n) => Some(*n),
			FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
			FieldValue::Date(d) => Some(d.timestamp_millis() as f64),
			FieldValue::Null | FieldValue::Bool(_) => None,
		}
	}

	/// Character count of a text value (characters, not bytes, so multi-byte
	/// input counts correctly).
	pub fn char_len(&self) -> Option<usize> {
		self.as_str().map(|s| s.chars().count())
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		FieldValue::Text(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		FieldValue::Text(value)
	}
}

impl From<f64> for FieldValue {
	fn from(value: f64) -> Self {
		FieldValue::Number(value)
	}
}

impl From<i64> for FieldValue {
	fn from(value: i64) -> Self {
		FieldValue::Number(value as f64)
	}
}

impl From<bool> for FieldValue {
	fn from(value: bool) -> Self {
		FieldValue::Bool(value)
	}
}

impl From<DateTime<Utc>> for FieldValue {
	fn from(value: DateTime<Utc>) -> Self {
		FieldValue::Date(value)
	}
}
