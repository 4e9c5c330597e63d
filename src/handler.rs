use tracing::info;

use crate::core::models::{ResourceOutput, TaskInput};
use crate::errors::ResourceError;
use crate::slack::SlackClient;
use crate::slack::operation::dispatch;

/// Runs one resource invocation: validate and build the request, deliver it
/// unless there is nothing to say, and produce the output document.
///
/// # Errors
///
/// Any validation, I/O or delivery error from the pipeline.
pub async fn handle(
    input: &TaskInput,
    client: &SlackClient,
) -> Result<ResourceOutput, ResourceError> {
    let request = dispatch(input)?;

    if request.empty {
        info!(
            "Message for {} has no text or title in any attachment, skipping",
            request.operation
        );
        return Ok(ResourceOutput::none());
    }

    let response = client
        .deliver(
            request.operation.api_path(),
            request.payload,
            &input.params.fallback_channel,
            true,
        )
        .await?;

    match response.file {
        Some(file) if !file.id.is_empty() => {
            info!("{} succeeded, file id {}", request.operation, file.id);
        }
        _ => info!("{} succeeded", request.operation),
    }

    Ok(ResourceOutput::none())
}
