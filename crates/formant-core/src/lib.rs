//! Core building blocks for form validation
//!
//! This crate provides the pieces every form component shares:
//! - A typed [`FieldValue`] model covering the value kinds a form input can hold
//! - Declarative [`ValidationRule`]s with per-rule failure messages
//! - A rule evaluation engine ([`validator`]) with optional-field semantics
//! - Reusable validators such as [`IsbnValidator`]
//! - Derived rule bundles for common inputs (passwords, ratings, ISBNs)

pub mod error;
pub mod isbn;
pub mod rules;
pub mod validator;
pub mod value;

pub use error::{FieldError, FieldResult};
pub use isbn::IsbnValidator;
pub use rules::{
	CustomPredicate, PredicateFuture, ValidationRule, confirm_password_rules, isbn_rules,
	password_rules, publication_year_rules, rating_rules,
};
pub use validator::{check_rule, run_rules};
pub use value::{FieldValue, ValueMap};
