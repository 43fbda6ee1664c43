//! TUI rendering logic for the browser.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Tabs, Wrap};

use tvsurf_api::catalog::ShowRecord;
use tvsurf_api::catalog::text::strip_tags;

use super::state::{ActiveTab, BrowserState, InputMode, ShowListState};

/// Draws the browser UI. Returns the main content area height for page size calculation.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut BrowserState) -> u16 {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);

    let main_area = chunks[1];
    match state.active_tab {
        ActiveTab::Home => draw_home(frame, main_area, state),
        ActiveTab::Search => draw_search(frame, main_area, state),
    }

    draw_footer(frame, chunks[2], state);

    main_area.height
}

/// Draws the header with the tab bar and show count.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let selected = match state.active_tab {
        ActiveTab::Home => 0,
        ActiveTab::Search => 1,
    };
    let tabs = Tabs::new(vec![" Home ", " Search "])
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title(" tvsurf "));
    frame.render_widget(tabs, header_chunks[0]);

    let count_text = format!("{} shows", state.active_list().rows.len());
    let count = Paragraph::new(count_text)
        .block(Block::default().borders(Borders::ALL).title(" Catalog "));
    frame.render_widget(count, header_chunks[1]);
}

/// Draws the Home tab: the show list, or the detail overlay.
fn draw_home(frame: &mut Frame, area: Rect, state: &mut BrowserState) {
    if let Some(record) = &state.detail {
        draw_detail(frame, area, record);
    } else {
        draw_show_table(frame, area, &mut state.home, " Shows ");
    }
}

/// Draws the Search tab: query input above the results list.
#[allow(clippy::indexing_slicing)]
fn draw_search(frame: &mut Frame, area: Rect, state: &mut BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let query_style = if state.input_mode == InputMode::Query {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let query = Paragraph::new(state.query.clone())
        .style(query_style)
        .block(Block::default().borders(Borders::ALL).title(" Query: / "));
    frame.render_widget(query, chunks[0]);

    draw_show_table(frame, chunks[1], &mut state.search, " Results ");
}

/// Draws a show list table.
fn draw_show_table(frame: &mut Frame, area: Rect, list: &mut ShowListState, title: &str) {
    let header = Row::new(vec!["ID", "Name", "Premiered", "Rating", "Summary"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = list
        .rows
        .iter()
        .map(|r| {
            Row::new(vec![
                r.record.id.to_string(),
                r.record.name.clone(),
                r.record
                    .premiered
                    .clone()
                    .unwrap_or_else(|| String::from("--")),
                rating_label(&r.record),
                r.teaser.clone(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Min(18),
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Min(24),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(String::from(title)),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, &mut list.table_state);
}

/// Builds a rating label from a record.
fn rating_label(record: &ShowRecord) -> String {
    record
        .rating
        .as_ref()
        .and_then(|r| r.average)
        .map_or_else(|| String::from("--"), |avg| format!("{avg:.1}"))
}

/// Draws the detail view for a single record.
///
/// Pure render of a record already in memory; the summary is shown with
/// all inline markup stripped, a missing summary as empty text.
fn draw_detail(frame: &mut Frame, area: Rect, record: &ShowRecord) {
    let meta = format!(
        "{}  |  Premiered: {}  |  Rating: {}",
        record.status.as_deref().unwrap_or("--"),
        record.premiered.as_deref().unwrap_or("--"),
        rating_label(record),
    );
    let genres = if record.genres.is_empty() {
        String::from("--")
    } else {
        record.genres.join(", ")
    };
    let image = record
        .image
        .as_ref()
        .and_then(|img| img.original.as_deref().or(img.medium.as_deref()))
        .map_or_else(
            || String::from("(no image)"),
            |url| format!("Image: {url}"),
        );
    let summary = strip_tags(record.summary.as_deref().unwrap_or_default());

    let lines = vec![
        Line::styled(
            record.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(meta),
        Line::from(format!("Genres: {genres}")),
        Line::from(image),
        Line::from(""),
        Line::from(summary),
    ];

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    frame.render_widget(detail, area);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let help_text = if state.input_mode == InputMode::Query {
        "Type to edit query | Enter: search | Esc: cancel"
    } else if state.in_detail() {
        "Esc: back  o: open page  Tab: tab switch  q: quit"
    } else if state.active_tab == ActiveTab::Search {
        "Tab: tab switch  \u{2191}\u{2193}/j/k: move  /: edit query  Enter: search  o: open page  q: quit"
    } else {
        "Tab: tab switch  \u{2191}\u{2193}/j/k: move  PgUp/PgDn: page  Enter: details  o: open page  q: quit"
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
