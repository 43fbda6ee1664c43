//! Browser TUI main loop.
//!
//! A `tokio::mpsc` channel carries messages into the event loop:
//! terminal input forwarded by a blocking reader task, and completed
//! catalog fetches tagged with their target pane and liveness token.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use super::state::{ActiveTab, BrowserState, FetchTarget, InputMode};
use super::ui;
use tvsurf_api::catalog::{CatalogClient, LocalCatalogApi, SearchEntry};

/// Channel capacity for app messages.
const CHANNEL_CAPACITY: usize = 64;

/// Messages delivered to the event loop.
enum AppMessage {
    /// Terminal input event.
    Input(Event),
    /// A catalog fetch completed.
    Fetched {
        /// Pane the fetch was issued for.
        target: FetchTarget,
        /// Liveness token handed out when the fetch started.
        generation: u64,
        /// Entries in server-supplied order, or the failure.
        result: Result<Vec<SearchEntry>>,
    },
}

/// Runs the browser TUI.
///
/// `listing_query` is fetched once, when the Home listing activates.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser(client: CatalogClient, listing_query: String) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, Arc::new(client), listing_query).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: Arc<CatalogClient>,
    listing_query: String,
) -> Result<()> {
    let mut state = BrowserState::new();
    let (tx, mut rx) = mpsc::channel::<AppMessage>(CHANNEL_CAPACITY);

    // Terminal input is blocking; a dedicated task forwards it.
    let input_tx = tx.clone();
    tokio::task::spawn_blocking(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if input_tx.blocking_send(AppMessage::Input(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    // The Home listing issues its single fetch on activation.
    let generation = state.home.begin_fetch();
    spawn_fetch(&client, &tx, FetchTarget::Listing, generation, listing_query);

    let mut main_area_height: u16 = 0;

    loop {
        terminal
            .draw(|frame| {
                main_area_height = ui::draw(frame, &mut state);
            })
            .context("failed to draw TUI")?;

        let page_size = usize::from(main_area_height.saturating_sub(4));

        let Some(message) = rx.recv().await else {
            return Ok(());
        };

        match message {
            AppMessage::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                match state.input_mode {
                    InputMode::Query => {
                        if handle_query_input(&mut state, &client, &tx, key.code) {
                            return Ok(());
                        }
                    }
                    InputMode::Normal => {
                        if handle_normal_input(
                            &mut state,
                            &client,
                            &tx,
                            key.code,
                            key.modifiers,
                            page_size,
                        ) {
                            return Ok(());
                        }
                    }
                }
            }
            AppMessage::Input(_) => {}
            AppMessage::Fetched {
                target,
                generation,
                result,
            } => apply_fetch(&mut state, target, generation, result),
        }
    }
}

/// Spawns one catalog fetch; its result flows back through the channel.
///
/// The task is never cancelled: if the issuing pane has moved on by the
/// time it resolves, the stale token makes the result discardable.
fn spawn_fetch(
    client: &Arc<CatalogClient>,
    tx: &mpsc::Sender<AppMessage>,
    target: FetchTarget,
    generation: u64,
    query: String,
) {
    let client = Arc::clone(client);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.search_shows(&query).await;
        let _ = tx
            .send(AppMessage::Fetched {
                target,
                generation,
                result,
            })
            .await;
    });
}

/// Commits or discards a completed fetch.
///
/// Failures are logged and leave the pane untouched: the Home listing
/// stays empty, Search keeps its prior results.
fn apply_fetch(
    state: &mut BrowserState,
    target: FetchTarget,
    generation: u64,
    result: Result<Vec<SearchEntry>>,
) {
    match result {
        Ok(entries) => {
            let committed = state.list_for(target).commit(generation, entries);
            if !committed {
                tracing::debug!(?target, generation, "discarded stale catalog response");
            }
        }
        Err(error) => {
            tracing::error!(?target, generation, %error, "catalog fetch failed");
        }
    }
}

/// Starts a search for the current query text, passed through verbatim.
fn run_search(state: &mut BrowserState, client: &Arc<CatalogClient>, tx: &mpsc::Sender<AppMessage>) {
    let generation = state.search.begin_fetch();
    let query = state.query.clone();
    spawn_fetch(client, tx, FetchTarget::Search, generation, query);
}

/// Opens the public catalog page for the current show.
fn open_show_page(state: &BrowserState) {
    let record = if state.in_detail() {
        state.detail.as_ref()
    } else {
        state.active_list().current_row().map(|row| &row.record)
    };
    if let Some(record) = record
        && let Some(url) = &record.url
    {
        let _ = open::that(url);
    }
}

/// Handles key input in query mode. Returns `true` to exit.
fn handle_query_input(
    state: &mut BrowserState,
    client: &Arc<CatalogClient>,
    tx: &mpsc::Sender<AppMessage>,
    key: KeyCode,
) -> bool {
    match key {
        KeyCode::Esc => {
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            state.input_mode = InputMode::Normal;
            run_search(state, client, tx);
        }
        KeyCode::Backspace => {
            state.query_pop();
        }
        KeyCode::Char(c) => {
            state.query_push(c);
        }
        _ => {}
    }
    false
}

/// Handles key input in normal mode. Returns `true` to exit.
fn handle_normal_input(
    state: &mut BrowserState,
    client: &Arc<CatalogClient>,
    tx: &mpsc::Sender<AppMessage>,
    key: KeyCode,
    modifiers: KeyModifiers,
    page_size: usize,
) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Tab | KeyCode::BackTab => state.switch_tab(),
        KeyCode::Up | KeyCode::Char('k') => {
            if !state.in_detail() {
                state.active_list_mut().move_up();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if !state.in_detail() {
                state.active_list_mut().move_down();
            }
        }
        KeyCode::PageUp => {
            if !state.in_detail() {
                state.active_list_mut().page_up(page_size);
            }
        }
        KeyCode::PageDown => {
            if !state.in_detail() {
                state.active_list_mut().page_down(page_size);
            }
        }
        KeyCode::Enter => match state.active_tab {
            ActiveTab::Home => state.open_detail(),
            ActiveTab::Search => run_search(state, client, tx),
        },
        KeyCode::Esc | KeyCode::Backspace => state.close_detail(),
        KeyCode::Char('/') => {
            if state.active_tab == ActiveTab::Search {
                state.input_mode = InputMode::Query;
            }
        }
        KeyCode::Char('o') => open_show_page(state),
        _ => {}
    }
    false
}
