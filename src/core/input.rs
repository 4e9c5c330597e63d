use std::io::BufRead;

use crate::core::models::TaskInput;
use crate::errors::ResourceError;

/// Reads the resource input from the first line of `reader`.
///
/// # Errors
///
/// Returns `ResourceError::Input` if there is no line to read or it is not a
/// valid input document.
pub fn read_input<R: BufRead>(reader: R) -> Result<TaskInput, ResourceError> {
    let line = reader
        .lines()
        .next()
        .ok_or_else(|| ResourceError::Input("no input received".to_string()))?
        .map_err(|e| ResourceError::Input(e.to_string()))?;

    serde_json::from_str(&line).map_err(|e| ResourceError::Input(e.to_string()))
}
