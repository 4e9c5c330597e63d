use std::env;
use std::io;
use std::process::ExitCode;

use anyhow::Context;
use slack_post_resource::core::config::AppConfig;
use slack_post_resource::core::input::read_input;
use slack_post_resource::errors::ResourceError;
use slack_post_resource::handler::handle;
use slack_post_resource::slack::SlackClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<String> {
    // Pipelines pass the build's source directory as the first argument.
    if let Some(dir) = env::args().nth(1) {
        env::set_current_dir(&dir)
            .with_context(|| format!("Error changing working directory to {dir}"))?;
    }

    slack_post_resource::setup_logging();

    let config = AppConfig::from_env().context("Error loading configuration")?;
    let client = SlackClient::new(&config).context("Error creating Slack client")?;

    let input = read_input(io::stdin().lock()).context("Error getting input")?;

    let output = handle(&input, &client).await.map_err(|e| {
        let context = match &e {
            ResourceError::Validation(_) | ResourceError::Io(_) => "Error while validating input",
            _ => "Error while posting to slack",
        };
        anyhow::Error::new(e).context(context)
    })?;

    Ok(serde_json::to_string(&output)?)
}
