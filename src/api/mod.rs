mod client;
mod types;

pub use client::{ApiError, Client};
pub use types::{
    ErrorBody, Mailbox, MessageDetail, MessagePatch, MessageSummary, OutgoingMessage, SendReceipt,
};
