use anyhow::{Result, anyhow};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io;
use std::process::Command;

use postbox::api::{Client, Mailbox};
use postbox::app::{App, ComposeState, View};
use postbox::config::Config;
use postbox::ui::{render_compose, render_listing, render_reader, render_statusbar};

#[derive(Parser)]
#[command(name = "postbox")]
#[command(about = "Terminal client for a REST webmail server", long_about = None)]
struct Cli {
    /// Base URL of the mail server (overrides the config file)
    #[arg(long)]
    server: Option<String>,

    /// Mailbox to open at startup
    #[arg(long, default_value = "inbox")]
    mailbox: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load();

    let server = cli.server.unwrap_or_else(|| config.server.clone());
    let initial = Mailbox::parse(&cli.mailbox)
        .ok_or_else(|| anyhow!("unknown mailbox: {} (expected inbox, sent or archive)", cli.mailbox))?;
    let client = Client::new(&server);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    app.open_mailbox(&client, initial);

    // Main loop
    loop {
        terminal.draw(|f| render(&mut app, f, &config))?;

        // Poll with timeout so we redraw on resize even without input
        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                app.clear_alert();
                match app.view {
                    View::List => match key.code {
                        KeyCode::Char('q') => app.should_quit = true,
                        KeyCode::Char('j') | KeyCode::Down => app.next(),
                        KeyCode::Char('k') | KeyCode::Up => app.previous(),
                        KeyCode::Enter => app.open_selected(&client),
                        KeyCode::Char('i') => app.open_mailbox(&client, Mailbox::Inbox),
                        KeyCode::Char('s') => app.open_mailbox(&client, Mailbox::Sent),
                        KeyCode::Char('a') => app.open_mailbox(&client, Mailbox::Archive),
                        KeyCode::Char('c') => app.compose_new(),
                        KeyCode::Char('R') => {
                            let mailbox = app.mailbox;
                            app.open_mailbox(&client, mailbox);
                        }
                        _ => {}
                    },
                    View::Reader => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.close_reader(),
                        KeyCode::Char('j') | KeyCode::Down => app.scroll_body(3),
                        KeyCode::Char('k') | KeyCode::Up => app.scroll_body(-3),
                        KeyCode::Char('r') => app.compose_reply(),
                        KeyCode::Char('e') => app.archive_open(&client),
                        KeyCode::Char('u') => app.unarchive_open(&client),
                        KeyCode::Char('i') => app.open_mailbox(&client, Mailbox::Inbox),
                        KeyCode::Char('s') => app.open_mailbox(&client, Mailbox::Sent),
                        KeyCode::Char('a') => app.open_mailbox(&client, Mailbox::Archive),
                        _ => {}
                    },
                    View::Compose => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.discard_compose(),
                        KeyCode::Char('e') => {
                            if let Some(draft) = edit_draft(&app.compose)? {
                                app.compose = draft;
                            }
                            terminal.clear()?;
                        }
                        KeyCode::Char('s') | KeyCode::Enter => app.submit_compose(&client),
                        _ => {}
                    },
                }
            }
            Event::Resize(_, _) => {
                // Redrawn on the next loop iteration
            }
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn render(app: &mut App, f: &mut Frame, config: &Config) {
    let area = f.area();
    let theme = &config.theme;

    // Split into main area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    match app.view {
        View::List => {
            render_listing(
                f,
                chunks[0],
                &app.messages,
                &mut app.list_state,
                app.mailbox.title(),
                &config.layout,
                theme,
            );
        }
        View::Reader => {
            if let Some(open) = &app.open {
                render_reader(f, chunks[0], open, app.body_scroll, theme);
            }
        }
        View::Compose => {
            render_compose(f, chunks[0], &app.compose, theme);
        }
    }

    render_statusbar(
        f,
        chunks[1],
        app.view,
        app.open.as_ref(),
        app.alert.as_ref(),
        theme,
    );
}

/// Round-trip the draft through `$EDITOR`: headers plus body out, parsed
/// back on exit. An aborted edit or an empty To line leaves the draft alone.
fn edit_draft(compose: &ComposeState) -> Result<Option<ComposeState>> {
    use std::io::Write;

    let mut temp_file = tempfile::NamedTempFile::new()?;
    writeln!(temp_file, "To: {}", compose.recipients)?;
    writeln!(temp_file, "Subject: {}", compose.subject)?;
    writeln!(temp_file)?;
    write!(temp_file, "{}", compose.body)?;
    temp_file.flush()?;

    let path = temp_file.path().to_owned();

    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen)?;

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = Command::new(&editor).arg(&path).status()?;

    enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen)?;

    if !status.success() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    let mut recipients = String::new();
    let mut subject = String::new();
    let mut in_headers = true;
    let mut body_lines = Vec::new();

    for line in content.lines() {
        if in_headers {
            if line.is_empty() {
                in_headers = false;
            } else if let Some(val) = line.strip_prefix("To: ") {
                recipients = val.to_string();
            } else if let Some(val) = line.strip_prefix("Subject: ") {
                subject = val.to_string();
            }
        } else {
            body_lines.push(line);
        }
    }

    if recipients.is_empty() {
        return Ok(None);
    }

    Ok(Some(ComposeState {
        recipients,
        subject,
        body: body_lines.join("\n"),
    }))
}
