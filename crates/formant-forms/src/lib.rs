//! Form schema, state, and lifecycle
//!
//! This crate provides the stateful half of the form engine:
//! - Declarative [`FormSchema`]s built from [`FieldSpec`]s
//! - The [`FormManager`], single source of truth for one form instance
//! - A synchronous [`events`] model with drop-to-detach subscriptions
//! - The submission lifecycle with uniform [`SubmissionOutcome`] reporting
//! - Serializable [`metadata`] extraction for rendering layers
//!
//! The value model and rule evaluation live in `formant-core`.

pub mod events;
pub mod manager;
pub mod metadata;
pub mod schema;
pub mod state;
pub mod submission;

pub use events::{EventDispatcher, EventError, FormEvent, Subscription};
pub use manager::{FormError, FormManager, FormResult};
pub use metadata::{FieldMetadata, FormMetadata, RuleMetadata};
pub use schema::{FieldId, FieldSpec, FormOptions, FormSchema, InputKind, ValidationMode};
pub use state::{ALL_FIELDS_KEY, FormState};
pub use submission::{
	HandlerFuture, SubmissionErrors, SubmissionHandler, SubmissionOutcome, submission_handler,
};
