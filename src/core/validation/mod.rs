//! Record validation
//!
//! A record may enter (or stay in) a store only if every rule passes:
//!
//! - `id` is present
//! - `description` is present and at most [`MAX_DESCRIPTION_CHARS`] characters
//! - `author` is not blank
//! - `guestsCount`, when set, is not negative
//!
//! Type rules (strings are strings, timestamps parse) are enforced when a
//! record is decoded, see [`crate::core::record::Record`].

pub mod validators;

use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::record::Record;

/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Check every rule and report all failures
pub fn validate(record: &Record) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    collect(&mut errors, "id", validators::required()("id", record.id.as_str()));
    collect(
        &mut errors,
        "description",
        validators::required()("description", record.description.as_str()),
    );
    collect(
        &mut errors,
        "description",
        validators::max_chars(MAX_DESCRIPTION_CHARS)("description", record.description.as_str()),
    );
    collect(
        &mut errors,
        "author",
        validators::not_blank()("author", record.author.as_str()),
    );
    if let Some(count) = record.guests_count {
        collect(
            &mut errors,
            "guestsCount",
            validators::non_negative()("guestsCount", count),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::FieldErrors(errors))
    }
}

/// Boolean form of [`validate`]; failures are logged at debug level
pub fn is_valid(record: &Record) -> bool {
    match validate(record) {
        Ok(()) => true,
        Err(error) => {
            tracing::debug!(record_id = %record.id, %error, "record failed validation");
            false
        }
    }
}

fn collect(errors: &mut Vec<FieldValidationError>, field: &str, result: Result<(), String>) {
    if let Err(message) = result {
        errors.push(FieldValidationError {
            field: field.to_string(),
            message,
        });
    }
}
