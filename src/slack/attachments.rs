//! Attachment source resolution for `chat.postMessage`.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::core::models::Attachment;
use crate::errors::ResourceError;

/// Returns the raw attachment string, either `attachments` itself or the
/// contents of `attachments_file`. Exactly one of the two must be non-empty.
///
/// # Errors
///
/// `Validation` when both or neither are supplied or the file is empty,
/// `Io` when the file cannot be read.
pub fn resolve_attachments(
    attachments: &str,
    attachments_file: &str,
) -> Result<String, ResourceError> {
    match (attachments.is_empty(), attachments_file.is_empty()) {
        (false, false) => Err(ResourceError::Validation(
            "cannot supply both attachments_file and attachments for chat.postMessage".to_string(),
        )),
        (true, true) => Err(ResourceError::Validation(
            "must supply one of attachments_file or attachments for chat.postMessage".to_string(),
        )),
        (false, true) => Ok(attachments.to_string()),
        (true, false) => read_attachments_file(Path::new(attachments_file)),
    }
}

fn read_attachments_file(path: &Path) -> Result<String, ResourceError> {
    let bytes = fs::read(path)
        .map_err(|e| ResourceError::Io(format!("{}: {e}", path.display())))?;
    if bytes.is_empty() {
        return Err(ResourceError::Validation(format!(
            "attachments file {} is empty",
            path.display()
        )));
    }
    // Invalid UTF-8 sequences are replaced with U+FFFD.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// True when `raw` is a non-empty JSON list of attachments none of which has
/// a `text` or `title`. Anything that does not parse is not considered empty.
#[must_use]
pub fn is_meaningless(raw: &str) -> bool {
    let Ok(entries) = serde_json::from_str::<Vec<Option<Map<String, Value>>>>(raw) else {
        return false;
    };
    let attachments: Option<Vec<Attachment>> = entries
        .iter()
        .map(|entry| Attachment::from_entry(entry.as_ref()))
        .collect();

    match attachments {
        Some(list) => !list.is_empty() && list.iter().all(|a| !a.has_text()),
        None => false,
    }
}
