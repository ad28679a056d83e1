//! ISBN validation
//!
//! Validates International Standard Book Numbers in both the 10-digit and
//! 13-digit forms, including their check digits. Hyphens and whitespace are
//! ignored, so user input like `978-0-306-40615-7` is accepted.

use crate::error::{FieldError, FieldResult};

/// Shape-level pattern for ISBN input: digits and hyphens, starting with a
/// digit and ending with a digit or the ISBN-10 check character `X`.
///
/// This pattern gates obviously malformed input; the check digit itself is
/// verified by [`IsbnValidator`].
pub const ISBN_PATTERN: &str = r"^\d[\d-]{8,15}[\dXx]$";

/// Validates that a string value is a well-formed ISBN-10 or ISBN-13.
///
/// # Examples
///
/// ```
/// use formant_core::IsbnValidator;
///
/// let validator = IsbnValidator::new();
/// assert!(validator.validate("0-306-40615-2").is_ok());
/// assert!(validator.validate("978-0-306-40615-7").is_ok());
/// assert!(validator.validate("978-0-306-40615-8").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct IsbnValidator {
	/// Optional custom error message shown on validation failure
	message: Option<String>,
}

impl IsbnValidator {
	pub fn new() -> Self {
		Self { message: None }
	}

	/// Sets a custom error message returned on validation failure.
	///
	/// # Examples
	///
	/// ```
	/// use formant_core::IsbnValidator;
	///
	/// let validator = IsbnValidator::new().with_message("That ISBN does not check out");
	/// assert!(validator.validate("123").is_err());
	/// ```
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	/// Validates the given string slice as an ISBN.
	///
	/// Hyphens and whitespace are stripped before checking. Returns `Ok(())`
	/// for a 10- or 13-digit number with a correct check digit, or a
	/// [`FieldError::Validation`] otherwise.
	pub fn validate(&self, value: &str) -> FieldResult<()> {
		let normalized: String = value
			.chars()
			.filter(|c| *c != '-' && !c.is_whitespace())
			.collect();

		let valid = match normalized.len() {
			10 => isbn10_checksum(&normalized),
			13 => isbn13_checksum(&normalized),
			_ => false,
		};

		if valid {
			Ok(())
		} else {
			let msg = self.message.as_deref().unwrap_or("Enter a valid ISBN");
			Err(FieldError::Validation(msg.to_string()))
		}
	}
}

impl Default for IsbnValidator {
	fn default() -> Self {
		Self::new()
	}
}

// ISBN-10: sum of digits weighted 10..=1 must be divisible by 11.
// The final position may be `X`, standing for 10.
fn isbn10_checksum(digits: &str) -> bool {
	let mut sum = 0u32;
	for (index, c) in digits.chars().enumerate() {
		let digit = match c {
			'0'..='9' => c as u32 - '0' as u32,
			'X' | 'x' if index == 9 => 10,
			_ => return false,
		};
		sum += (10 - index as u32) * digit;
	}
	sum % 11 == 0
}

// ISBN-13 (EAN): digits weighted alternately 1 and 3 must sum to a
// multiple of 10.
fn isbn13_checksum(digits: &str) -> bool {
	let mut sum = 0u32;
	for (index, c) in digits.chars().enumerate() {
		let Some(digit) = c.to_digit(10) else {
			return false;
		};
		let weight = if index % 2 == 0 { 1 } else { 3 };
		sum += weight * digit;
	}
	sum % 10 == 0
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("0306406152")]
	#[case("0-306-40615-2")]
	#[case("080442957X")]
	#[case("0 8044 2957 X")]
	#[case("9780306406157")]
	#[case("978-0-306-40615-7")]
	fn test_isbn_validator_valid(#[case] isbn: &str) {
		// Arrange
		let validator = IsbnValidator::new();

		// Act
		let result = validator.validate(isbn);

		// Assert
		assert!(result.is_ok(), "Expected '{isbn}' to be a valid ISBN");
	}

	#[rstest]
	#[case("")]
	#[case("123")]
	#[case("0306406153")]
	#[case("978-0-306-40615-8")]
	#[case("03064061.2")]
	#[case("030640615X2")]
	#[case("not-an-isbn")]
	fn test_isbn_validator_invalid(#[case] isbn: &str) {
		// Arrange
		let validator = IsbnValidator::new();

		// Act
		let result = validator.validate(isbn);

		// Assert
		assert!(result.is_err(), "Expected '{isbn}' to be an invalid ISBN");
	}

	#[rstest]
	fn test_isbn_validator_x_only_valid_in_final_position() {
		let validator = IsbnValidator::new();
		assert!(validator.validate("X306406152").is_err());
	}

	#[rstest]
	fn test_isbn_validator_custom_message() {
		// Arrange
		let validator = IsbnValidator::new().with_message("Custom ISBN error");

		// Act
		let result = validator.validate("bad");

		// Assert
		match result {
			Err(FieldError::Validation(msg)) => assert_eq!(msg, "Custom ISBN error"),
			_ => panic!("Expected Validation error with custom message"),
		}
	}
}
