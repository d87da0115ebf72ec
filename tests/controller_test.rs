//! End-to-end tests for the view controller: each test points the
//! controller at the fake mail server and checks panel transitions,
//! listing contents and the requests that reach the server.

mod fake_server;

use std::time::Duration;

use fake_server::FakeMailServer;
use postbox::api::{Client, Mailbox};
use postbox::app::{AlertKind, App, ComposeState, View};
use serde_json::json;

fn summary_json(id: u64, read: bool, archived: bool) -> serde_json::Value {
    json!({
        "id": id,
        "sender": "a@x.com",
        "subject": "Hi",
        "timestamp": "t1",
        "read": read,
        "archived": archived,
    })
}

fn detail_json(id: u64, read: bool, archived: bool) -> serde_json::Value {
    json!({
        "id": id,
        "sender": "a@x.com",
        "recipients": "me@x.com",
        "subject": "Hi",
        "timestamp": "t1",
        "body": "Hello there.",
        "read": read,
        "archived": archived,
    })
}

#[test]
fn open_mailbox_shows_the_listing_in_server_order() {
    let server = FakeMailServer::start();
    server.route(
        "GET",
        "/emails/inbox",
        200,
        json!([summary_json(2, true, false), summary_json(1, false, false)]),
    );

    let client = Client::new(server.base_url());
    let mut app = App::new();
    app.open_mailbox(&client, Mailbox::Inbox);

    assert_eq!(app.view, View::List);
    assert_eq!(app.mailbox, Mailbox::Inbox);
    let ids: Vec<u64> = app.messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(app.list_state.selected(), Some(0));
}

#[test]
fn listing_failure_leaves_the_panel_empty_without_an_alert() {
    let server = FakeMailServer::start();
    server.route("GET", "/emails/inbox", 500, json!({"error": "boom"}));

    let client = Client::new(server.base_url());
    let mut app = App::new();
    app.open_mailbox(&client, Mailbox::Inbox);

    assert_eq!(app.view, View::List);
    assert!(app.messages.is_empty());
    assert_eq!(app.list_state.selected(), None);
    assert!(app.alert.is_none());
}

#[test]
fn opening_an_unread_message_issues_exactly_one_mark_read() {
    let server = FakeMailServer::start();
    server.route(
        "GET",
        "/emails/inbox",
        200,
        json!([summary_json(1, false, false)]),
    );
    server.route("GET", "/emails/1", 200, detail_json(1, false, false));
    server.route("PUT", "/emails/1", 204, json!({}));

    let client = Client::new(server.base_url());
    let mut app = App::new();
    app.open_mailbox(&client, Mailbox::Inbox);
    app.open_selected(&client);

    // The reader is already up; the mark-read runs in the background.
    assert_eq!(app.view, View::Reader);
    assert!(server.wait_for("PUT", "/emails/1", Duration::from_secs(2)));

    let puts = server.requests_matching("PUT", "/emails/1");
    assert_eq!(puts.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&puts[0].body).unwrap();
    assert_eq!(body, json!({"read": true}));
}

#[test]
fn opening_a_read_message_issues_no_mark_read() {
    let server = FakeMailServer::start();
    server.route("GET", "/emails/5", 200, detail_json(5, true, false));

    let client = Client::new(server.base_url());
    let mut app = App::new();
    app.open_message(&client, 5);

    assert_eq!(app.view, View::Reader);
    assert!(!server.wait_for("PUT", "/emails/5", Duration::from_millis(200)));
}

#[test]
fn message_load_failure_keeps_the_panel_and_surfaces_the_error() {
    let server = FakeMailServer::start();
    server.route("GET", "/emails/1", 404, json!({"error": "Email not found."}));

    let client = Client::new(server.base_url());
    let mut app = App::new();
    app.open_message(&client, 1);

    assert_eq!(app.view, View::List);
    assert!(app.open.is_none());
    let alert = app.alert.expect("load failure shows an alert");
    assert_eq!(alert.kind, AlertKind::Error);
    assert_eq!(alert.text, "Email not found.");
}

#[test]
fn server_note_shows_as_a_success_alert() {
    let server = FakeMailServer::start();
    let mut detail = detail_json(3, true, false);
    detail["message"] = json!("Email opened.");
    server.route("GET", "/emails/3", 200, detail);

    let client = Client::new(server.base_url());
    let mut app = App::new();
    app.open_message(&client, 3);

    let alert = app.alert.expect("server note shows as alert");
    assert_eq!(alert.kind, AlertKind::Success);
    assert_eq!(alert.text, "Email opened.");
}

#[test]
fn archive_returns_to_the_inbox_even_when_the_mutation_fails() {
    let server = FakeMailServer::start();
    server.route("GET", "/emails/archive", 200, json!([]));
    server.route("GET", "/emails/1", 200, detail_json(1, true, false));
    server.route("PUT", "/emails/1", 500, json!({"error": "boom"}));
    server.route(
        "GET",
        "/emails/inbox",
        200,
        json!([summary_json(2, false, false)]),
    );

    let client = Client::new(server.base_url());
    let mut app = App::new();
    app.mailbox = Mailbox::Inbox;
    app.open_message(&client, 1);
    assert!(app.open.as_ref().unwrap().can_archive());

    app.archive_open(&client);

    assert_eq!(app.view, View::List);
    assert_eq!(app.mailbox, Mailbox::Inbox);
    let puts = server.requests_matching("PUT", "/emails/1");
    assert_eq!(puts.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&puts[0].body).unwrap();
    assert_eq!(body, json!({"archived": true}));
    // The failure is not surfaced.
    assert!(app.alert.is_none());
}

#[test]
fn unarchive_from_the_archive_listing_lands_back_in_the_inbox() {
    let server = FakeMailServer::start();
    server.route(
        "GET",
        "/emails/archive",
        200,
        json!([summary_json(9, true, true)]),
    );
    server.route("GET", "/emails/9", 200, detail_json(9, true, true));
    server.route("PUT", "/emails/9", 204, json!({}));
    server.route("GET", "/emails/inbox", 200, json!([]));

    let client = Client::new(server.base_url());
    let mut app = App::new();
    app.open_mailbox(&client, Mailbox::Archive);
    app.open_selected(&client);

    let open = app.open.as_ref().unwrap();
    assert!(open.can_unarchive());
    assert!(!open.can_archive());

    app.unarchive_open(&client);

    assert_eq!(app.view, View::List);
    assert_eq!(app.mailbox, Mailbox::Inbox);
    let body: serde_json::Value =
        serde_json::from_str(&server.requests_matching("PUT", "/emails/9")[0].body).unwrap();
    assert_eq!(body, json!({"archived": false}));
}

#[test]
fn archive_is_not_offered_from_the_sent_listing() {
    let server = FakeMailServer::start();
    server.route("GET", "/emails/2", 200, detail_json(2, true, false));

    let client = Client::new(server.base_url());
    let mut app = App::new();
    app.mailbox = Mailbox::Sent;
    app.open_message(&client, 2);

    let open = app.open.as_ref().unwrap();
    assert!(!open.can_archive());
    assert!(!open.can_unarchive());

    // The guard makes the action a no-op: no mutation, no transition.
    app.archive_open(&client);
    assert_eq!(app.view, View::Reader);
    assert!(server.requests_matching("PUT", "/emails/2").is_empty());
}

#[test]
fn submit_failure_keeps_the_draft_and_shows_the_server_message() {
    let server = FakeMailServer::start();
    server.route(
        "POST",
        "/emails",
        400,
        json!({"error": "At least one recipient required."}),
    );

    let client = Client::new(server.base_url());
    let mut app = App::new();
    app.compose_new();
    app.compose = ComposeState {
        recipients: String::new(),
        subject: "Hi".to_string(),
        body: "Hello".to_string(),
    };

    app.submit_compose(&client);

    assert_eq!(app.view, View::Compose);
    assert_eq!(app.compose.subject, "Hi");
    assert_eq!(app.compose.body, "Hello");
    let alert = app.alert.expect("submit failure shows an alert");
    assert_eq!(alert.kind, AlertKind::Error);
    assert_eq!(alert.text, "At least one recipient required.");
}

#[test]
fn submit_success_discards_the_draft_and_opens_sent() {
    let server = FakeMailServer::start();
    server.route("POST", "/emails", 200, json!({"id": 5}));
    server.route(
        "GET",
        "/emails/sent",
        200,
        json!([summary_json(5, true, false)]),
    );

    let client = Client::new(server.base_url());
    let mut app = App::new();
    app.compose_new();
    app.compose = ComposeState {
        recipients: "bob@x.com".to_string(),
        subject: "Hi".to_string(),
        body: "Hello".to_string(),
    };

    app.submit_compose(&client);

    assert_eq!(app.view, View::List);
    assert_eq!(app.mailbox, Mailbox::Sent);
    assert!(app.compose.is_empty());
    assert_eq!(app.messages.len(), 1);
    assert!(app.alert.is_none());
}

#[test]
fn reply_from_the_reader_prefills_the_compose_panel() {
    let server = FakeMailServer::start();
    server.route("GET", "/emails/1", 200, detail_json(1, true, false));

    let client = Client::new(server.base_url());
    let mut app = App::new();
    app.open_message(&client, 1);
    app.compose_reply();

    assert_eq!(app.view, View::Compose);
    assert_eq!(app.compose.recipients, "a@x.com");
    assert_eq!(app.compose.subject, "Re: Hi");
    assert_eq!(app.compose.body, "On t1 a@x.com wrote:\n\nHello there.");
}
