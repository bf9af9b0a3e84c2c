pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use engine::{SortDirection, SortKey};

use crate::app::{AppState, FetchStatus};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

use components::hints::{self, common};

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    // Main layout: info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);

    // The overlay hides the body entirely; the picker hides the table.
    if state.show_error {
        components::error_overlay::render(frame, layout[1]);
    } else if state.date_picker.open {
        screens::date_picker::render(frame, layout[1], state);
    } else {
        screens::transactions::render(frame, layout[1], state);
    }

    render_bottom_bar(frame, layout[2], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let range = state
        .ledger
        .range()
        .map(|range| range.label(state.timezone))
        .unwrap_or_else(|| "All".to_string());
    let sort = match state.ledger.sort() {
        Some(sort) => {
            let key = match sort.key {
                SortKey::Date => "date",
                SortKey::Amount => "amount",
            };
            let direction = match sort.direction {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            };
            format!("{key} {direction}")
        }
        None => "-".to_string(),
    };
    let refresh = state
        .last_refresh
        .map(|dt| {
            dt.with_timezone(&state.timezone)
                .format("%H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string());
    let status_style = match state.fetch {
        FetchStatus::Loaded => Style::default().fg(theme.positive),
        FetchStatus::Failed => Style::default().fg(theme.error),
        FetchStatus::Idle | FetchStatus::Loading => Style::default().fg(theme.dim),
    };

    let line = Line::from(vec![
        Span::styled("Source", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.source)),
        Span::styled("Dates", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {range}  ")),
        Span::styled("Sort", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {sort}  ")),
        Span::styled("Refresh", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(state.fetch.label(), status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let context = if state.show_error {
        common::error_overlay()
    } else if state.date_picker.open {
        common::date_picker()
    } else {
        common::table()
    };

    let mut parts = hints::hints_to_spans(&context, theme);
    parts.push(hints::hint_separator(theme));
    parts.extend(hints::hints_to_spans(&common::global(), theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
