//! Form payload builders for the supported Slack API operations.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use tracing::warn;

use crate::core::models::TaskInput;
use crate::errors::ResourceError;
use crate::slack::attachments::{is_meaningless, resolve_attachments};
use crate::utils::env_expand::expand;

/// Attachment posted in place of the user's when their attachments could not
/// be resolved, so the failure is still visible in the channel.
pub const INTERNAL_ERROR_ATTACHMENTS: &str =
    r#"[{"title": "[INTERNAL ERROR] Failed to parse string to post to slack", "color": "danger"}]"#;

/// Form fields sent to the Slack API, URL-encoded on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, String>);

impl Payload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replaces the destination field (`channel`, else `channels`) with
    /// `destination`. Returns false if the payload has no destination.
    pub fn replace_destination(&mut self, destination: &str) -> bool {
        for key in ["channel", "channels"] {
            if let Some(current) = self.0.get_mut(key) {
                if !current.is_empty() {
                    *current = destination.to_string();
                    return true;
                }
            }
        }
        false
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Builds the `chat.postMessage` form. The returned flag is true when the
/// attachments carry no text or title, in which case nothing should be sent.
///
/// # Errors
///
/// `Validation` when the token or channel is missing. Problems resolving the
/// attachments are logged and replaced by [`INTERNAL_ERROR_ATTACHMENTS`].
pub fn build_post_message(input: &TaskInput) -> Result<(Payload, bool), ResourceError> {
    let params = &input.params;

    let raw = resolve_attachments(&params.attachments, &params.attachments_file)
        .unwrap_or_else(|e| {
            warn!("Error validating attachments contents: {}", e);
            INTERNAL_ERROR_ATTACHMENTS.to_string()
        });
    let attachments = expand(&raw);

    if input.source.token.is_empty() {
        return Err(ResourceError::Validation(
            "Token is a required param".to_string(),
        ));
    }
    if params.channel.is_empty() {
        return Err(ResourceError::Validation(
            "Channel is a required param".to_string(),
        ));
    }

    if is_meaningless(&attachments) {
        return Ok((Payload::new(), true));
    }

    let mut payload = Payload::new();
    payload.set("attachments", attachments);
    payload.set("token", input.source.token.as_str());
    payload.set("channel", params.channel.as_str());
    payload.set("link_names", params.link_names.to_string());

    if !params.icon_url.is_empty() {
        payload.set("icon_url", params.icon_url.as_str());
    }
    if !params.username.is_empty() {
        payload.set("username", params.username.as_str());
    }

    Ok((payload, false))
}

/// Builds the `files.upload` form from inline `content` or a `file` path.
///
/// # Errors
///
/// `Validation` when both or neither of `content` and `file` are given, `Io`
/// when the file cannot be read.
pub fn build_files_upload(input: &TaskInput) -> Result<Payload, ResourceError> {
    let params = &input.params;

    let content = match (params.file.is_empty(), params.content.is_empty()) {
        (false, false) => {
            return Err(ResourceError::Validation(
                "cannot supply both file and content for files.upload".to_string(),
            ));
        }
        (true, true) => {
            return Err(ResourceError::Validation(
                "must supply one of file or content for files.upload".to_string(),
            ));
        }
        (false, true) => {
            let bytes = fs::read(&params.file)
                .map_err(|e| ResourceError::Io(format!("{}: {e}", params.file)))?;
            // Invalid UTF-8 sequences are replaced with U+FFFD.
            String::from_utf8_lossy(&bytes).into_owned()
        }
        (true, false) => params.content.clone(),
    };

    let mut payload = Payload::new();
    payload.set("content", content);
    payload.set("token", input.source.token.as_str());
    payload.set("channels", params.channels.as_str());
    payload.set("title", params.title.as_str());
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{ResourceParams, ResourceSource};
    use std::io::Write;

    fn post_message_input(attachments: &str) -> TaskInput {
        TaskInput {
            source: ResourceSource {
                token: "validToken".to_string(),
                operation: "chat.postMessage".to_string(),
            },
            params: ResourceParams {
                channel: "#builds".to_string(),
                attachments: attachments.to_string(),
                ..ResourceParams::default()
            },
            ..TaskInput::default()
        }
    }

    fn files_upload_input(content: &str, file: &str) -> TaskInput {
        TaskInput {
            source: ResourceSource {
                token: "validToken".to_string(),
                operation: "files.upload".to_string(),
            },
            params: ResourceParams {
                content: content.to_string(),
                file: file.to_string(),
                title: "my title".to_string(),
                channels: "mychannel1,mychannel2".to_string(),
                ..ResourceParams::default()
            },
            ..TaskInput::default()
        }
    }

    #[test]
    fn test_post_message_payload_fields() {
        let (payload, empty) =
            build_post_message(&post_message_input(r#"[{"text":"deployed"}]"#)).unwrap();

        assert!(!empty);
        assert_eq!(payload.get("attachments"), Some(r#"[{"text":"deployed"}]"#));
        assert_eq!(payload.get("token"), Some("validToken"));
        assert_eq!(payload.get("channel"), Some("#builds"));
        assert_eq!(payload.get("link_names"), Some("0"));
        assert_eq!(payload.get("icon_url"), None);
        assert_eq!(payload.get("username"), None);
        assert_eq!(payload.len(), 4);
    }

    #[test]
    fn test_post_message_optional_fields() {
        let mut input = post_message_input(r#"[{"title":"T"}]"#);
        input.params.icon_url = "https://example.com/icon.png".to_string();
        input.params.username = "ci-bot".to_string();
        input.params.link_names = 1;

        let (payload, _) = build_post_message(&input).unwrap();
        assert_eq!(payload.get("icon_url"), Some("https://example.com/icon.png"));
        assert_eq!(payload.get("username"), Some("ci-bot"));
        assert_eq!(payload.get("link_names"), Some("1"));
    }

    #[test]
    fn test_post_message_all_blank_attachments_is_empty() {
        let (payload, empty) = build_post_message(&post_message_input(
            r#"[{"text":"","title":""},{"color":"good"}]"#,
        ))
        .unwrap();

        assert!(empty);
        assert!(payload.is_empty());
    }

    #[test]
    fn test_post_message_malformed_attachments_forwarded() {
        let (payload, empty) = build_post_message(&post_message_input("[{'text':'fun'}]")).unwrap();
        assert!(!empty);
        assert_eq!(payload.get("attachments"), Some("[{'text':'fun'}]"));
    }

    #[test]
    fn test_post_message_unresolvable_attachments_fall_back_to_error_attachment() {
        let (payload, empty) = build_post_message(&post_message_input("")).unwrap();
        assert!(!empty);
        assert_eq!(payload.get("attachments"), Some(INTERNAL_ERROR_ATTACHMENTS));
    }

    #[test]
    fn test_post_message_requires_token() {
        let mut input = post_message_input(r#"[{"text":"x"}]"#);
        input.source.token.clear();

        let err = build_post_message(&input).unwrap_err();
        assert!(matches!(err, ResourceError::Validation(msg) if msg.contains("Token")));
    }

    #[test]
    fn test_post_message_requires_channel() {
        let mut input = post_message_input(r#"[{"text":"x"}]"#);
        input.params.channel.clear();

        let err = build_post_message(&input).unwrap_err();
        assert!(matches!(err, ResourceError::Validation(msg) if msg.contains("Channel")));
    }

    #[test]
    fn test_files_upload_with_content() {
        let payload = build_files_upload(&files_upload_input("my content", "")).unwrap();

        let expected: Payload = [
            ("content", "my content"),
            ("token", "validToken"),
            ("channels", "mychannel1,mychannel2"),
            ("title", "my title"),
        ]
        .into_iter()
        .collect();
        assert_eq!(payload, expected);
    }

    #[test]
    fn test_files_upload_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "line one\nline two").unwrap();

        let input = files_upload_input("", file.path().to_str().unwrap());
        let payload = build_files_upload(&input).unwrap();
        assert_eq!(payload.get("content"), Some("line one\nline two"));
    }

    #[test]
    fn test_files_upload_rejects_both_sources() {
        let err = build_files_upload(&files_upload_input("c", "f")).unwrap_err();
        assert!(matches!(err, ResourceError::Validation(msg) if msg.contains("cannot supply both")));
    }

    #[test]
    fn test_files_upload_rejects_no_source() {
        let err = build_files_upload(&files_upload_input("", "")).unwrap_err();
        assert!(matches!(err, ResourceError::Validation(msg) if msg.contains("must supply one of")));
    }

    #[test]
    fn test_files_upload_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let err = build_files_upload(&files_upload_input("", missing.to_str().unwrap()))
            .unwrap_err();
        assert!(matches!(err, ResourceError::Io(_)));
    }

    #[test]
    fn test_replace_destination_prefers_channel() {
        let mut payload: Payload = [("channel", "C1"), ("channels", "C2")].into_iter().collect();
        assert!(payload.replace_destination("FB"));
        assert_eq!(payload.get("channel"), Some("FB"));
        assert_eq!(payload.get("channels"), Some("C2"));
    }

    #[test]
    fn test_replace_destination_uses_channels() {
        let mut payload: Payload = [("channel", ""), ("channels", "C2")].into_iter().collect();
        assert!(payload.replace_destination("FB"));
        assert_eq!(payload.get("channels"), Some("FB"));
    }

    #[test]
    fn test_replace_destination_without_destination() {
        let mut payload: Payload = [("token", "T")].into_iter().collect();
        assert!(!payload.replace_destination("FB"));
    }
}
