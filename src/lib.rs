//! # Formant
//!
//! A schema-driven form state and validation engine.
//!
//! Formant keeps one form's interactive life — values, validation, errors,
//! touched flags, submission — behind a single source of truth that any UI
//! layer can bind to. Schemas are declarative, validation is async-capable,
//! and every state transition is observable through a synchronous event
//! model.
//!
//! ## Core pieces
//!
//! - **Schema** ([`forms::FormSchema`], [`forms::FieldSpec`]): the static
//!   declaration of a form's fields, defaults, and validation rules.
//! - **Rules** ([`core::ValidationRule`]): declarative constraints with
//!   per-rule messages, including async custom predicates for cross-field
//!   checks.
//! - **Manager** ([`forms::FormManager`]): owns the live state, drives
//!   validation timing, and runs the submission lifecycle with uniform
//!   outcome reporting.
//! - **Binding layer** ([`reactive::FormHandle`], [`reactive::FieldHandle`],
//!   [`reactive::Autosave`], behind the `reactive` feature): bridges the
//!   manager to reactive consumers with awaitable change notification and
//!   debounced persistence.
//!
//! ## Quick example
//!
//! ```
//! use formant::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let schema = FormSchema::new()
//! 	.with_field(
//! 		FieldSpec::new("email", InputKind::Email)
//! 			.required_with_message("Email is required")
//! 			.with_rule(ValidationRule::email("Enter a valid email address")),
//! 	)
//! 	.with_field(FieldSpec::new("password", InputKind::Password).with_rules(password_rules()));
//!
//! let handler = submission_handler(|_values| async move {
//! 	Ok(SubmissionOutcome::succeeded())
//! });
//! let manager = FormManager::with_handler(schema, handler).await;
//!
//! manager.set_field_value("email", "reader@example.com").await;
//! manager.set_field_value("password", "Abc12345").await;
//!
//! let outcome = manager.submit().await.expect("handler is configured");
//! assert!(outcome.success);
//! # });
//! ```

pub use formant_core as core;
pub use formant_forms as forms;
#[cfg(feature = "reactive")]
pub use formant_reactive as reactive;

pub mod prelude;
