pub mod batch;
pub mod capture;
pub mod crop;

use shadershot_common::error::{ShadershotError, ShadershotResult};

/// Parse a separator flag into its single character.
pub(crate) fn single_char(value: &str) -> ShadershotResult<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ShadershotError::validation(format!(
            "sep accepts only 1 character: {value}"
        ))),
    }
}
