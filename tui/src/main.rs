//! Terminal client for the user registry service.
//!
//! A form plus list over the REST API: register users, browse the collection,
//! and remove entries behind a confirmation modal. Network calls run on
//! spawned tasks and report back over a channel so the render loop never
//! blocks.

mod api;
mod app;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use api::{ApiClient, User};
use app::{App, Focus};

#[derive(Parser, Debug)]
#[command(name = "registry-tui", about = "Terminal client for the user registry")]
struct Args {
    /// Base URL of the registry service
    #[arg(long, env = "REGISTRY_API_URL", default_value = "http://127.0.0.1:4001")]
    api_url: String,
}

/// Completion notices from spawned network tasks.
enum ApiEvent {
    Loaded(Result<Vec<User>, String>),
    Created(Result<User, String>),
    Deleted { id: i32, result: Result<(), String> },
}

fn spawn_list(client: &ApiClient, tx: &mpsc::UnboundedSender<ApiEvent>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.list().await.map_err(|err| err.to_string());
        let _ = tx.send(ApiEvent::Loaded(result));
    });
}

fn spawn_create(client: &ApiClient, tx: &mpsc::UnboundedSender<ApiEvent>, draft: api::NewUser) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.create(&draft).await.map_err(|err| err.to_string());
        let _ = tx.send(ApiEvent::Created(result));
    });
}

fn spawn_delete(client: &ApiClient, tx: &mpsc::UnboundedSender<ApiEvent>, id: i32) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.delete(id).await.map_err(|err| err.to_string());
        let _ = tx.send(ApiEvent::Deleted { id, result });
    });
}

fn apply_api_event(app: &mut App, event: ApiEvent) {
    match event {
        ApiEvent::Loaded(result) => {
            if let Err(message) = &result {
                tracing::error!(%message, "list request failed");
            }
            app.apply_loaded(result);
        }
        ApiEvent::Created(result) => {
            if let Err(message) = &result {
                tracing::error!(%message, "create request failed");
            }
            app.apply_created(result);
        }
        ApiEvent::Deleted { id, result } => {
            if let Err(message) = &result {
                tracing::error!(id, %message, "delete request failed");
            }
            app.apply_deleted(id, result);
        }
    }
}

/// Handle a key press. Returns false when the application should quit.
fn handle_key(
    app: &mut App,
    client: &ApiClient,
    tx: &mpsc::UnboundedSender<ApiEvent>,
    key: KeyEvent,
) -> bool {
    if key.kind != KeyEventKind::Press {
        return true;
    }

    // The confirmation modal swallows every key until answered.
    if app.pending_delete.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(id) = app.confirm_delete() {
                    spawn_delete(client, tx, id);
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        }
        return true;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => return false,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
            app.begin_load();
            spawn_list(client, tx);
        }
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => app.request_delete(),
        (KeyCode::Tab, _) => app.focus = app.focus.next(),
        (KeyCode::BackTab, _) => app.focus = app.focus.prev(),
        (KeyCode::Enter, _) => {
            if let Some(draft) = app.create_request() {
                spawn_create(client, tx, draft);
            }
        }
        (KeyCode::Up, _) => app.select_prev(),
        (KeyCode::Down, _) => app.select_next(),
        _ => {
            app.focused_input_mut().handle_event(&Event::Key(key));
        }
    }
    true
}

fn input_block(title: &str, focused: bool) -> Block<'_> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().fg(Color::Yellow))
    } else {
        block
    }
}

fn render_input(f: &mut Frame, area: Rect, input: &Input, title: &str, focused: bool) {
    let widget = Paragraph::new(input.value()).block(input_block(title, focused));
    f.render_widget(widget, area);
    if focused {
        f.set_cursor_position((area.x + input.visual_cursor() as u16 + 1, area.y + 1));
    }
}

/// Centered popup area for the confirmation modal.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Form
            Constraint::Min(3),    // User list
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Key help
        ])
        .split(f.area());

    let form = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ])
        .split(chunks[0]);

    render_input(f, form[0], &app.name, "Name", app.focus == Focus::Name);
    render_input(f, form[1], &app.age, "Age", app.focus == Focus::Age);
    render_input(f, form[2], &app.email, "Email", app.focus == Focus::Email);

    let items: Vec<ListItem> = app
        .users
        .iter()
        .map(|user| {
            ListItem::new(Line::from(format!(
                "{:>4}  {}  ({})  {}",
                user.id, user.name, user.age, user.email
            )))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Users"))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    let mut list_state = ListState::default();
    list_state.select(app.selected);
    f.render_stateful_widget(list, chunks[1], &mut list_state);

    let (status_text, status_style) = if let Some(alert) = &app.alert {
        (format!(" {alert} "), Style::default().fg(Color::Red))
    } else if let Some(error) = &app.error {
        (format!(" {error} "), Style::default().fg(Color::Red))
    } else if app.loading {
        (" Loading... ".to_owned(), Style::default().fg(Color::Yellow))
    } else {
        (
            format!(" {} users ", app.users.len()),
            Style::default().fg(Color::DarkGray),
        )
    };
    f.render_widget(Paragraph::new(status_text).style(status_style), chunks[2]);

    let help = Paragraph::new(
        " Tab: next field | Enter: add | Up/Down: select | Ctrl-D: delete | Ctrl-R: refresh | Esc: quit ",
    )
    .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(help, chunks[3]);

    if let Some(id) = app.pending_delete {
        let area = centered_rect(36, 3, f.area());
        f.render_widget(Clear, area);
        let modal = Paragraph::new(format!("Remove user {id}? (y/n)"))
            .block(Block::default().borders(Borders::ALL).title("Confirm"));
        f.render_widget(modal, area);
    }
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: &ApiClient,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut app = App::default();
    app.begin_load();
    spawn_list(client, &tx);

    loop {
        terminal.draw(|f| ui(f, &app))?;

        while let Ok(api_event) = rx.try_recv() {
            apply_api_event(&mut app, api_event);
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if !handle_key(&mut app, client, &tx, key) {
                    return Ok(());
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logging goes to a file: stdout belongs to the terminal UI.
    let log_file = {
        let path = PathBuf::from("./registry-tui.log");
        let _ = std::fs::remove_file(&path);
        std::fs::File::create(&path)?
    };
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    tracing::info!(api_url = %args.api_url, "starting registry client");
    let client = ApiClient::new(args.api_url);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &client).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
