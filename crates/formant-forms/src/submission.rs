//! Submission outcomes and handlers
//!
//! A submit attempt always produces a [`SubmissionOutcome`], whether the
//! handler succeeded, reported a failure, or returned an error. The caller of
//! `submit()` reads one uniform success/failure value instead of catching
//! anything.

use chrono::{DateTime, Utc};
use formant_core::ValueMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by a submission handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = anyhow::Result<SubmissionOutcome>> + Send>>;

/// Caller-supplied async function that performs the actual side effect of a
/// valid form and reports the result.
///
/// An `Err` return is normalized by the manager into a failed
/// [`SubmissionOutcome`] carrying the error message.
pub type SubmissionHandler = Arc<dyn Fn(ValueMap) -> HandlerFuture + Send + Sync>;

/// Wraps an async closure into a [`SubmissionHandler`].
///
/// # Examples
///
/// ```
/// use formant_forms::{SubmissionOutcome, submission_handler};
///
/// let handler = submission_handler(|values| async move {
/// 	let _ = values;
/// 	Ok(SubmissionOutcome::succeeded())
/// });
/// ```
pub fn submission_handler<F, Fut>(f: F) -> SubmissionHandler
where
	F: Fn(ValueMap) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = anyhow::Result<SubmissionOutcome>> + Send + 'static,
{
	let handler: SubmissionHandler = Arc::new(move |values| Box::pin(f(values)));
	handler
}

/// Errors reported by a failed submission: either a single message or a
/// structured field→messages map the manager can merge back into the live
/// error map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmissionErrors {
	Message(String),
	Fields(HashMap<String, Vec<String>>),
}

/// Outcome of one submit attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionOutcome {
	pub success: bool,
	/// Opaque payload supplied by a successful handler.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<serde_json::Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub errors: Option<SubmissionErrors>,
	pub timestamp: DateTime<Utc>,
}

impl SubmissionOutcome {
	/// A successful outcome with no payload.
	pub fn succeeded() -> Self {
		Self {
			success: true,
			data: None,
			errors: None,
			timestamp: Utc::now(),
		}
	}

	/// A successful outcome carrying a data payload.
	pub fn succeeded_with(data: serde_json::Value) -> Self {
		Self {
			success: true,
			data: Some(data),
			errors: None,
			timestamp: Utc::now(),
		}
	}

	pub fn failed(errors: SubmissionErrors) -> Self {
		Self {
			success: false,
			data: None,
			errors: Some(errors),
			timestamp: Utc::now(),
		}
	}

	/// A failed outcome with a single message.
	pub fn failed_with_message(message: impl Into<String>) -> Self {
		Self::failed(SubmissionErrors::Message(message.into()))
	}

	/// A failed outcome with per-field errors.
	pub fn failed_with_fields(fields: HashMap<String, Vec<String>>) -> Self {
		Self::failed(SubmissionErrors::Fields(fields))
	}
}
