//! Field rules shared by the DTOs.

use std::borrow::Cow;

use validator::ValidationError;

/// Rejects values that are empty once whitespace is ignored. Names feed the
/// derived username and email, which strip every whitespace character.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(char::is_whitespace) {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("value must not be blank")));
    }
    Ok(())
}
