//! Bridges `validator` derive output into [`CoreError`].

use validator::Validate;

use crate::error::CoreError;

/// Validate every row in a batch, reporting the first failing row by index.
///
/// `entity` names the row type in the error message (e.g. `"contact submission"`).
pub fn validate_batch<T: Validate>(entity: &str, rows: &[T]) -> Result<(), CoreError> {
    for (index, row) in rows.iter().enumerate() {
        row.validate().map_err(|errors| {
            CoreError::Validation(format!("{entity} #{index} is invalid: {errors}"))
        })?;
    }
    Ok(())
}
