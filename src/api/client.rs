use reqwest::blocking::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{
    ErrorBody, Mailbox, MessageDetail, MessagePatch, MessageSummary, OutgoingMessage, SendReceipt,
};

/// Transport failures and server-reported application errors, normalized to
/// a single human-readable message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success response carrying a server-supplied message.
    #[error("{0}")]
    Server(String),

    /// The request never produced a usable response.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Blocking client for the mail server. One HTTP call per method; no
/// retries, no pagination.
#[derive(Clone)]
pub struct Client {
    http: HttpClient,
    base: String,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: HttpClient::new(),
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    /// `GET /emails/{mailbox}`, summaries in the order the server returns them.
    pub fn list_mailbox(&self, mailbox: Mailbox) -> Result<Vec<MessageSummary>> {
        let resp = self
            .http
            .get(self.url(&format!("emails/{}", mailbox.as_str())))
            .send()?;
        read_json(resp)
    }

    /// `GET /emails/{id}`, one full message.
    pub fn message(&self, id: u64) -> Result<MessageDetail> {
        let resp = self.http.get(self.url(&format!("emails/{id}"))).send()?;
        read_json(resp)
    }

    /// `POST /emails`, submit a composed message.
    pub fn send(&self, outgoing: &OutgoingMessage) -> Result<SendReceipt> {
        let resp = self.http.post(self.url("emails")).json(outgoing).send()?;
        read_json(resp)
    }

    /// `PUT /emails/{id}` with `{"read": true}`.
    pub fn mark_read(&self, id: u64) -> Result<()> {
        self.patch(
            id,
            &MessagePatch {
                read: Some(true),
                ..Default::default()
            },
        )
    }

    /// `PUT /emails/{id}` with `{"archived": ...}`.
    pub fn set_archived(&self, id: u64, archived: bool) -> Result<()> {
        self.patch(
            id,
            &MessagePatch {
                archived: Some(archived),
                ..Default::default()
            },
        )
    }

    fn patch(&self, id: u64, patch: &MessagePatch) -> Result<()> {
        let resp = self
            .http
            .put(self.url(&format!("emails/{id}")))
            .json(patch)
            .send()?;
        // Success bodies of PUT are not interpreted.
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(server_error(resp))
        }
    }
}

fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    if resp.status().is_success() {
        Ok(resp.json()?)
    } else {
        Err(server_error(resp))
    }
}

/// Pull the `{error}` payload out of a non-success response, falling back to
/// the status line when the body is not the expected JSON.
fn server_error(resp: Response) -> ApiError {
    let status = resp.status();
    let message = resp
        .text()
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .map(|b| b.error)
        .unwrap_or_else(|| format!("server returned {status}"));
    ApiError::Server(message)
}
