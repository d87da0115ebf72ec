use std::fmt;

use serde::{Deserialize, Serialize};

/// The three server-side mailboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mailbox {
    Inbox,
    Sent,
    Archive,
}

impl Mailbox {
    /// Path segment used in `GET /emails/{mailbox}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mailbox::Inbox => "inbox",
            Mailbox::Sent => "sent",
            Mailbox::Archive => "archive",
        }
    }

    /// Panel title.
    pub fn title(&self) -> &'static str {
        match self {
            Mailbox::Inbox => "Inbox",
            Mailbox::Sent => "Sent",
            Mailbox::Archive => "Archive",
        }
    }

    pub fn parse(s: &str) -> Option<Mailbox> {
        match s {
            "inbox" => Some(Mailbox::Inbox),
            "sent" => Some(Mailbox::Sent),
            "archive" => Some(Mailbox::Archive),
            _ => None,
        }
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a mailbox listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageSummary {
    pub id: u64,
    pub sender: String,
    pub subject: String,
    pub timestamp: String,
    pub read: bool,
    pub archived: bool,
}

/// A full message, fetched one at a time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageDetail {
    pub id: u64,
    pub sender: String,
    pub recipients: String,
    pub subject: String,
    pub timestamp: String,
    pub body: String,
    pub read: bool,
    pub archived: bool,
    /// Status note the server includes alongside the payload, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /emails`.
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingMessage {
    pub recipients: String,
    pub subject: String,
    pub body: String,
}

/// Body of a successful `POST /emails`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendReceipt {
    pub id: u64,
}

/// Partial update for `PUT /emails/{id}`. Only the set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Error payload the server attaches to non-success responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
