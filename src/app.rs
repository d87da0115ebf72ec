use ratatui::widgets::ListState;

use crate::api::{Client, Mailbox, MessageDetail, MessageSummary, OutgoingMessage};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    List,
    Reader,
    Compose,
}

/// A message opened in the reader, together with the mailbox it was opened
/// from. The origin decides which archive action the reader exposes and is
/// captured at open time, so a later mailbox switch cannot change it.
#[derive(Debug, Clone)]
pub struct OpenMessage {
    pub origin: Mailbox,
    pub detail: MessageDetail,
}

impl OpenMessage {
    pub fn can_archive(&self) -> bool {
        self.origin == Mailbox::Inbox && !self.detail.archived
    }

    pub fn can_unarchive(&self) -> bool {
        self.origin == Mailbox::Archive && self.detail.archived
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposeState {
    pub recipients: String,
    pub subject: String,
    pub body: String,
}

impl ComposeState {
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty() && self.subject.is_empty() && self.body.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertKind {
    Success,
    Error,
}

/// Single dismissible status message. A new alert replaces the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
}

pub struct App {
    pub view: View,
    /// Mailbox whose listing is currently loaded.
    pub mailbox: Mailbox,
    /// Listing rows, in the order the server returned them.
    pub messages: Vec<MessageSummary>,
    pub list_state: ListState,
    pub open: Option<OpenMessage>,
    pub body_scroll: u16,
    pub compose: ComposeState,
    pub alert: Option<Alert>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            view: View::List,
            mailbox: Mailbox::Inbox,
            messages: Vec::new(),
            list_state: ListState::default(),
            open: None,
            body_scroll: 0,
            compose: ComposeState::default(),
            alert: None,
            should_quit: false,
        }
    }

    // ----- Listing -----

    /// Load a mailbox and show its listing. The previous rows are cleared
    /// before the fetch; a failed fetch is logged and leaves the panel empty.
    pub fn open_mailbox(&mut self, client: &Client, mailbox: Mailbox) {
        self.view = View::List;
        self.mailbox = mailbox;
        self.messages.clear();
        self.list_state.select(None);
        self.open = None;

        match client.list_mailbox(mailbox) {
            Ok(messages) => {
                self.messages = messages;
                if !self.messages.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            Err(e) => log::error!("failed to load {mailbox}: {e}"),
        }
    }

    pub fn selected_message(&self) -> Option<&MessageSummary> {
        self.list_state
            .selected()
            .and_then(|i| self.messages.get(i))
    }

    pub fn next(&mut self) {
        if self.messages.is_empty() {
            return;
        }
        let max = self.messages.len() - 1;
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(max),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.messages.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    // ----- Reader -----

    pub fn open_selected(&mut self, client: &Client) {
        if let Some(id) = self.selected_message().map(|m| m.id) {
            self.open_message(client, id);
        }
    }

    /// Fetch one message and show it in the reader. Opening an unread message
    /// fires a best-effort mark-as-read off the UI thread; the listing stays
    /// stale until the next fetch. A failed fetch keeps the current panel and
    /// surfaces the error.
    pub fn open_message(&mut self, client: &Client, id: u64) {
        match client.message(id) {
            Ok(detail) => {
                if !detail.read {
                    let client = client.clone();
                    std::thread::spawn(move || {
                        if let Err(e) = client.mark_read(id) {
                            log::warn!("failed to mark message {id} read: {e}");
                        }
                    });
                }
                match detail.message.clone() {
                    Some(note) => self.show_alert(AlertKind::Success, note),
                    None => self.clear_alert(),
                }
                self.open = Some(OpenMessage {
                    origin: self.mailbox,
                    detail,
                });
                self.body_scroll = 0;
                self.view = View::Reader;
            }
            Err(e) => self.show_alert(AlertKind::Error, e.to_string()),
        }
    }

    pub fn close_reader(&mut self) {
        self.view = View::List;
        self.open = None;
        self.body_scroll = 0;
    }

    pub fn scroll_body(&mut self, delta: i32) {
        if delta < 0 {
            self.body_scroll = self.body_scroll.saturating_sub((-delta) as u16);
        } else {
            self.body_scroll = self.body_scroll.saturating_add(delta as u16);
        }
    }

    // ----- Compose -----

    /// Open the compose panel with an empty draft.
    pub fn compose_new(&mut self) {
        self.compose = ComposeState::default();
        self.clear_alert();
        self.view = View::Compose;
    }

    /// Open the compose panel pre-filled as a reply to the open message.
    pub fn compose_reply(&mut self) {
        let Some(open) = &self.open else { return };
        let d = &open.detail;
        self.compose = ComposeState {
            recipients: d.sender.clone(),
            subject: reply_subject(&d.subject),
            body: quote_original(&d.timestamp, &d.sender, &d.body),
        };
        self.clear_alert();
        self.view = View::Compose;
    }

    /// Post the draft. Success discards it and lands on the sent listing;
    /// failure keeps the draft and the panel so the user can correct and
    /// resubmit.
    pub fn submit_compose(&mut self, client: &Client) {
        let outgoing = OutgoingMessage {
            recipients: self.compose.recipients.clone(),
            subject: self.compose.subject.clone(),
            body: self.compose.body.clone(),
        };
        match client.send(&outgoing) {
            Ok(receipt) => {
                log::info!("message {} accepted", receipt.id);
                self.compose = ComposeState::default();
                self.clear_alert();
                self.open_mailbox(client, Mailbox::Sent);
            }
            Err(e) => self.show_alert(AlertKind::Error, e.to_string()),
        }
    }

    pub fn discard_compose(&mut self) {
        self.compose = ComposeState::default();
        self.clear_alert();
        self.view = View::List;
    }

    // ----- Archive -----

    pub fn archive_open(&mut self, client: &Client) {
        if self.open.as_ref().is_some_and(OpenMessage::can_archive) {
            self.set_archived_open(client, true);
        }
    }

    pub fn unarchive_open(&mut self, client: &Client) {
        if self.open.as_ref().is_some_and(OpenMessage::can_unarchive) {
            self.set_archived_open(client, false);
        }
    }

    /// Flip the archived flag and return to the inbox whether or not the
    /// mutation landed.
    fn set_archived_open(&mut self, client: &Client, archived: bool) {
        let Some(open) = &self.open else { return };
        let id = open.detail.id;
        if let Err(e) = client.set_archived(id, archived) {
            log::debug!("archived={archived} for message {id} not applied: {e}");
        }
        self.open_mailbox(client, Mailbox::Inbox);
    }

    // ----- Alerts -----

    pub fn show_alert(&mut self, kind: AlertKind, text: impl Into<String>) {
        self.alert = Some(Alert {
            kind,
            text: text.into(),
        });
    }

    pub fn clear_alert(&mut self) {
        self.alert = None;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Reply subject, prefixed unless the original already was.
pub fn reply_subject(subject: &str) -> String {
    if subject.starts_with("Re:") {
        subject.to_string()
    } else {
        format!("Re: {subject}")
    }
}

/// Reply body: attribution line, blank line, original text.
pub fn quote_original(timestamp: &str, sender: &str, body: &str) -> String {
    format!("On {timestamp} {sender} wrote:\n\n{body}")
}
