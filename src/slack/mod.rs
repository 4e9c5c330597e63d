//! All Slack-specific functionality

pub mod attachments;
pub mod client;
pub mod operation;
pub mod request_builder;

// Re-export main types for convenience
pub use client::SlackClient;
pub use operation::{Operation, PreparedRequest, dispatch};
pub use request_builder::Payload;
