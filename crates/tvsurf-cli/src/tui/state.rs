//! Browser TUI state management.

use ratatui::widgets::TableState;

use tvsurf_api::catalog::text::teaser;
use tvsurf_api::catalog::{SearchEntry, ShowRecord};

/// Maximum teaser length for list rows.
const TEASER_MAX_CHARS: usize = 96;

/// Identifies which tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    /// Home tab: the all-shows listing with a detail overlay.
    Home,
    /// Search tab: query input plus results.
    Search,
}

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Query text input mode (Search tab).
    Query,
}

/// Which list pane a fetch result is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    /// The Home listing.
    Listing,
    /// The Search results.
    Search,
}

/// A show row for display.
#[derive(Debug, Clone)]
pub struct ShowRow {
    /// Single-line sanitized summary teaser.
    pub teaser: String,
    /// The full record, kept for the detail view hand-off.
    pub record: ShowRecord,
}

impl From<ShowRecord> for ShowRow {
    fn from(record: ShowRecord) -> Self {
        let teaser = record
            .summary
            .as_deref()
            .map_or_else(String::new, |s| teaser(s, TEASER_MAX_CHARS));
        Self { teaser, record }
    }
}

/// One scrollable show list with its fetch bookkeeping.
///
/// `generation` is the liveness token for in-flight reads: a fetch
/// started later invalidates every earlier one, and results are only
/// committed when their token still matches.
#[derive(Debug)]
pub struct ShowListState {
    /// Rows in server-supplied order.
    pub rows: Vec<ShowRow>,
    /// Table state (handles selection and scroll).
    pub table_state: TableState,
    /// Token of the most recently started fetch.
    generation: u64,
    /// Whether any fetch has committed yet.
    received: bool,
}

impl ShowListState {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            table_state: TableState::default(),
            generation: 0,
            received: false,
        }
    }

    /// Starts a new fetch and returns its liveness token.
    pub const fn begin_fetch(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Commits fetched entries if `generation` is still current.
    ///
    /// Replaces the rows with the entries in server-supplied order and
    /// returns `true`; a stale token leaves the state untouched and
    /// returns `false`.
    pub fn commit(&mut self, generation: u64, entries: Vec<SearchEntry>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.rows = entries.into_iter().map(|e| ShowRow::from(e.show)).collect();
        self.received = true;
        if self.rows.is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(0));
        }
        true
    }

    /// Whether no fetch has committed yet ("awaiting data").
    #[must_use]
    pub const fn awaiting_data(&self) -> bool {
        !self.received
    }

    /// Returns the cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Returns the row under the cursor (if any).
    #[must_use]
    pub fn current_row(&self) -> Option<&ShowRow> {
        self.rows.get(self.cursor())
    }

    /// Moves the cursor up.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_up(&mut self) {
        let current = self.cursor();
        if current > 0 {
            self.table_state.select(Some(current - 1));
        }
    }

    /// Moves the cursor down.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        let current = self.cursor();
        if current + 1 < self.rows.len() {
            self.table_state.select(Some(current + 1));
        }
    }

    /// Scrolls up by a page.
    pub fn page_up(&mut self, page_size: usize) {
        let current = self.cursor();
        self.table_state
            .select(Some(current.saturating_sub(page_size)));
    }

    /// Scrolls down by a page.
    pub fn page_down(&mut self, page_size: usize) {
        let max = self.rows.len().saturating_sub(1);
        let current = self.cursor();
        self.table_state
            .select(Some(current.saturating_add(page_size).min(max)));
    }
}

impl Default for ShowListState {
    fn default() -> Self {
        Self::new()
    }
}

/// State for the browser TUI.
#[derive(Debug)]
pub struct BrowserState {
    /// Active tab.
    pub active_tab: ActiveTab,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search query text.
    pub query: String,
    /// Home listing pane.
    pub home: ShowListState,
    /// Search results pane.
    pub search: ShowListState,
    /// Detail overlay record (pushed from the Home list).
    pub detail: Option<ShowRecord>,
}

impl BrowserState {
    /// Creates the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active_tab: ActiveTab::Home,
            input_mode: InputMode::Normal,
            query: String::new(),
            home: ShowListState::new(),
            search: ShowListState::new(),
            detail: None,
        }
    }

    /// Returns the list pane for the active tab.
    #[must_use]
    pub fn active_list(&self) -> &ShowListState {
        match self.active_tab {
            ActiveTab::Home => &self.home,
            ActiveTab::Search => &self.search,
        }
    }

    /// Returns the mutable list pane for the active tab.
    pub fn active_list_mut(&mut self) -> &mut ShowListState {
        match self.active_tab {
            ActiveTab::Home => &mut self.home,
            ActiveTab::Search => &mut self.search,
        }
    }

    /// Returns the mutable list pane a fetch result targets.
    pub fn list_for(&mut self, target: FetchTarget) -> &mut ShowListState {
        match target {
            FetchTarget::Listing => &mut self.home,
            FetchTarget::Search => &mut self.search,
        }
    }

    /// Switches between the Home and Search tabs.
    pub const fn switch_tab(&mut self) {
        self.active_tab = match self.active_tab {
            ActiveTab::Home => ActiveTab::Search,
            ActiveTab::Search => ActiveTab::Home,
        };
    }

    /// Pushes the detail view for the current Home row.
    ///
    /// The record is handed over by value; Search results have no
    /// detail action.
    pub fn open_detail(&mut self) {
        if self.active_tab != ActiveTab::Home {
            return;
        }
        if let Some(row) = self.home.current_row() {
            self.detail = Some(row.record.clone());
        }
    }

    /// Pops the detail view.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Whether the detail view is currently shown.
    #[must_use]
    pub const fn in_detail(&self) -> bool {
        self.detail.is_some() && matches!(self.active_tab, ActiveTab::Home)
    }

    /// Appends a character to the query.
    pub fn query_push(&mut self, ch: char) {
        self.query.push(ch);
    }

    /// Removes the last character from the query.
    pub fn query_pop(&mut self) {
        self.query.pop();
    }
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}
