use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `source` stanza of the resource input.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourceSource {
    pub token: String,
    #[serde(alias = "method")]
    pub operation: String,
}

/// The `params` stanza of the resource input. Which fields matter depends on
/// the operation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourceParams {
    #[serde(alias = "fallbackChannel")]
    pub fallback_channel: String,

    // files.upload
    pub content: String,
    pub file: String,
    pub title: String,
    pub channels: String,

    // chat.postMessage
    pub channel: String,
    #[serde(alias = "attachmentsFile")]
    pub attachments_file: String,
    pub attachments: String,
    #[serde(alias = "iconUrl")]
    pub icon_url: String,
    pub username: String,
    #[serde(alias = "linkNames")]
    pub link_names: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourceVersion {
    #[serde(rename = "ref")]
    pub reference: String,
}

/// Full document read from stdin.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TaskInput {
    pub source: ResourceSource,
    pub params: ResourceParams,
    pub version: ResourceVersion,
}

/// One element of a `chat.postMessage` attachment list. Only the fields that
/// decide whether a message is worth sending are read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachment {
    pub text: Option<String>,
    pub title: Option<String>,
}

impl Attachment {
    /// Reads `text` and `title` from a decoded list entry, matching keys
    /// case-insensitively. A `null` entry is an empty attachment. Returns
    /// `None` when either field holds something other than a string or null.
    #[must_use]
    pub fn from_entry(entry: Option<&Map<String, Value>>) -> Option<Self> {
        let mut attachment = Attachment::default();
        for (key, value) in entry.into_iter().flatten() {
            let slot = if key.eq_ignore_ascii_case("text") {
                &mut attachment.text
            } else if key.eq_ignore_ascii_case("title") {
                &mut attachment.title
            } else {
                continue;
            };
            match value {
                Value::String(s) => *slot = Some(s.clone()),
                Value::Null => {}
                _ => return None,
            }
        }
        Some(attachment)
    }

    #[must_use]
    pub fn has_text(&self) -> bool {
        let non_empty = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.is_empty());
        non_empty(&self.text) || non_empty(&self.title)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackFile {
    #[serde(default)]
    pub id: String,
}

/// Response envelope shared by `chat.postMessage` and `files.upload`.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub file: Option<SlackFile>,
}

/// Document written to stdout on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceOutput {
    pub version: ResourceVersion,
}

impl ResourceOutput {
    #[must_use]
    pub fn none() -> Self {
        Self {
            version: ResourceVersion {
                reference: "none".to_string(),
            },
        }
    }
}
