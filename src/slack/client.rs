//! Slack Web API delivery client
//!
//! Posts form payloads and interprets the `{"ok": ..., "error": ...}` envelope,
//! redirecting once to a fallback channel when the original destination is
//! unusable.

use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing::{error, info, warn};
use url::Url;

use crate::core::config::AppConfig;
use crate::core::models::SlackResponse;
use crate::errors::ResourceError;
use crate::slack::request_builder::Payload;

/// Slack error codes meaning the destination itself is unusable.
///
/// Matched by exact string equality; new codes Slack introduces for the same
/// condition will not trigger the fallback.
pub const FALLBACK_ERROR_CODES: [&str; 3] = ["channel_not_found", "invalid_channel", "is_archived"];

/// One request to the destination, plus at most one to the fallback.
pub const MAX_DELIVERY_ATTEMPTS: u32 = 2;

#[must_use]
pub fn is_fallback_error(code: &str) -> bool {
    FALLBACK_ERROR_CODES.contains(&code)
}

/// HTTP client bound to a Slack API base URL.
pub struct SlackClient {
    http: Client,
    base_url: Url,
}

impl SlackClient {
    /// # Errors
    ///
    /// Returns `ResourceError::Config` if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, ResourceError> {
        let base_url = Url::parse(&config.slack_api_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ResourceError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, api_path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(api_path);
        url
    }

    /// Sends `payload` to `api_path`. If Slack rejects the destination and a
    /// non-blank `fallback_destination` is given while `allow_fallback` is
    /// set, the request is repeated once against the fallback.
    ///
    /// # Errors
    ///
    /// `Network` on transport failure, `Protocol` on a non-200 status,
    /// `Decode` when the body is not a Slack envelope and `Api` when Slack
    /// answers `ok: false` and no fallback applies.
    pub async fn deliver(
        &self,
        api_path: &str,
        mut payload: Payload,
        fallback_destination: &str,
        allow_fallback: bool,
    ) -> Result<SlackResponse, ResourceError> {
        let fallback = fallback_destination.trim();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let (response, body) = self.post_form(api_path, &payload).await?;
            if response.ok {
                return Ok(response);
            }

            let code = response.error.unwrap_or_default();
            let may_retry = allow_fallback
                && attempt < MAX_DELIVERY_ATTEMPTS
                && is_fallback_error(&code)
                && !fallback.is_empty();

            if may_retry && payload.replace_destination(fallback_destination) {
                warn!(
                    "Slack rejected destination ({}), retrying {} with fallback channel {}",
                    code, api_path, fallback_destination
                );
                continue;
            }

            error!("Slack API returned ok=false: {}", body);
            return Err(ResourceError::Api { code, body });
        }
    }

    async fn post_form(
        &self,
        api_path: &str,
        payload: &Payload,
    ) -> Result<(SlackResponse, String), ResourceError> {
        let url = self.endpoint(api_path);
        info!("POST {}", url);

        let response = self
            .http
            .post(url)
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .form(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            error!("Slack API responded with status {}: {}", status, body);
            return Err(ResourceError::Protocol {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SlackResponse = serde_json::from_str(&body)?;
        Ok((parsed, body))
    }
}
