//! Supported Slack API operations and request dispatch.

use std::fmt;

use crate::core::models::TaskInput;
use crate::errors::ResourceError;
use crate::slack::request_builder::{Payload, build_files_upload, build_post_message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FilesUpload,
    ChatPostMessage,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::FilesUpload, Operation::ChatPostMessage];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Operation::FilesUpload => "files.upload",
            Operation::ChatPostMessage => "chat.postMessage",
        }
    }

    /// Path relative to the Slack API base URL.
    #[must_use]
    pub fn api_path(self) -> &'static str {
        match self {
            Operation::FilesUpload => "api/files.upload",
            Operation::ChatPostMessage => "api/chat.postMessage",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated request ready for delivery.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub operation: Operation,
    pub payload: Payload,
    /// Nothing worth posting; delivery should be skipped.
    pub empty: bool,
}

/// Validates `input` and builds the request for its operation.
///
/// # Errors
///
/// `Validation` for an unknown operation, otherwise whatever the operation's
/// builder reports.
pub fn dispatch(input: &TaskInput) -> Result<PreparedRequest, ResourceError> {
    let operation = Operation::from_name(&input.source.operation).ok_or_else(|| {
        ResourceError::Validation(format!(
            "Operation '{}' does not exist",
            input.source.operation
        ))
    })?;

    let (payload, empty) = match operation {
        Operation::FilesUpload => (build_files_upload(input)?, false),
        Operation::ChatPostMessage => build_post_message(input)?,
    };

    Ok(PreparedRequest {
        operation,
        payload,
        empty,
    })
}
