//! Error types shared by the core validators

/// Validation failure reported by a standalone validator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FieldError {
	#[error("{0}")]
	Validation(String),
}

pub type FieldResult<T> = Result<T, FieldError>;
