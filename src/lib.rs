/// slack-post-resource - a pipeline "out" step that posts to Slack.
///
/// The binary reads one JSON document from stdin describing either a
/// `chat.postMessage` or a `files.upload` call, validates it, builds the form
/// payload and posts it to the Slack Web API. When Slack reports that the
/// destination channel is unusable, the request is repeated once against a
/// configured fallback channel.
///
/// # Example
///
/// ```no_run
/// use slack_post_resource::core::config::AppConfig;
/// use slack_post_resource::core::models::TaskInput;
/// use slack_post_resource::slack::SlackClient;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     slack_post_resource::setup_logging();
///
///     let input: TaskInput = serde_json::from_str(
///         r##"{"source":{"token":"xoxb-...","operation":"chat.postMessage"},
///             "params":{"channel":"#builds","attachments":"[{\"text\":\"green\"}]"}}"##,
///     )?;
///     let client = SlackClient::new(&AppConfig::from_env()?)?;
///     let output = slack_post_resource::handler::handle(&input, &client).await?;
///     println!("{}", serde_json::to_string(&output)?);
///     Ok(())
/// }
/// ```
pub mod core;
pub mod errors;
pub mod handler;
pub mod slack;
pub mod utils;

/// Configure logging to stderr; stdout is reserved for the resource output.
///
/// The filter is taken from `RUST_LOG` and defaults to `info`. Calling this
/// more than once is harmless.
///
/// # Example
///
/// ```
/// slack_post_resource::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
