//! Convenient imports for building and driving forms.
//!
//! ```
//! use formant::prelude::*;
//! ```

pub use formant_core::{
	CustomPredicate, FieldValue, IsbnValidator, ValidationRule, ValueMap, confirm_password_rules,
	isbn_rules, password_rules, publication_year_rules, rating_rules,
};
pub use formant_forms::{
	ALL_FIELDS_KEY, FieldSpec, FormError, FormEvent, FormManager, FormOptions, FormResult,
	FormSchema, FormState, InputKind, SubmissionErrors, SubmissionOutcome, ValidationMode,
	submission_handler,
};
#[cfg(feature = "reactive")]
pub use formant_reactive::{Autosave, FieldHandle, FormHandle, save_fn};
