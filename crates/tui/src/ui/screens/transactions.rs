use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use engine::{Sort, SortDirection, SortKey};

use crate::{
    app::{AppState, FetchStatus},
    ui::{components::money, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Table
            Constraint::Length(1), // Summary
            Constraint::Length(1), // Pagination
        ])
        .split(area);

    let view = state.ledger.view();

    render_table(frame, layout[0], state, &theme);

    let summary = Line::from(vec![
        Span::styled("Showing", Style::default().fg(theme.dim)),
        Span::raw(format!(" {} transactions  ·  ", view.summary.count)),
        Span::styled("Total", Style::default().fg(theme.dim)),
        Span::raw(" "),
        money::styled_amount_bold(view.summary.total, state.currency, &theme),
    ]);
    frame.render_widget(Paragraph::new(summary), layout[1]);

    let pagination = Line::from(vec![
        Span::styled(
            format!("Page {} of {}", view.page, view.page_count),
            Style::default().fg(theme.accent),
        ),
        Span::styled("  ·  page size ", Style::default().fg(theme.dim)),
        Span::raw(state.ledger.page_size().rows().to_string()),
    ]);
    frame.render_widget(
        Paragraph::new(pagination).alignment(Alignment::Right),
        layout[2],
    );
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Transactions ");

    let view = state.ledger.view();
    if view.rows.is_empty() {
        let message = match state.fetch {
            FetchStatus::Loading => "Loading transactions…",
            FetchStatus::Idle => "Press r to fetch transactions.",
            FetchStatus::Loaded if state.ledger.range().is_some() => {
                "No transactions in the selected dates."
            }
            FetchStatus::Loaded | FetchStatus::Failed => "No transactions.",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(theme.dim)))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let sort = state.ledger.sort();
    let header = Row::new(vec![
        Cell::from("ID"),
        Cell::from(header_label("Date", SortKey::Date, sort)),
        Cell::from("Description"),
        Cell::from(header_label("Amount", SortKey::Amount, sort)),
    ])
    .style(
        Style::default()
            .fg(theme.text_muted)
            .add_modifier(Modifier::BOLD),
    );

    let rows = view.rows.iter().map(|tx| {
        let date = tx
            .occurred_at
            .with_timezone(&state.timezone)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        Row::new(vec![
            Cell::from(tx.id.clone()),
            Cell::from(date),
            Cell::from(tx.description.clone()),
            Cell::from(Line::from(money::styled_amount(tx.amount, state.currency, theme))
                .alignment(Alignment::Right)),
        ])
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Length(17),
        Constraint::Min(12),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected.min(view.rows.len() - 1)));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// `Date ▲` when the column drives the active sort.
fn header_label(label: &'static str, key: SortKey, sort: Option<Sort>) -> String {
    match sort {
        Some(Sort { key: active, direction }) if active == key => {
            let arrow = match direction {
                SortDirection::Asc => "▲",
                SortDirection::Desc => "▼",
            };
            format!("{label} {arrow}")
        }
        _ => label.to_string(),
    }
}
