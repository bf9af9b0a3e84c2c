use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, PickerField},
    ui::{components::centered_box, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let picker = &state.date_picker;

    let card = centered_box(36, 7, area);
    frame.render_widget(Clear, card);

    let block = Block::default()
        .title(" date range ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // From
            Constraint::Length(1), // To
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Timezone
        ])
        .margin(1)
        .split(inner);

    render_input(
        frame,
        rows[0],
        "From",
        &picker.from,
        picker.focus == PickerField::From,
        &theme,
    );
    render_input(
        frame,
        rows[1],
        "To  ",
        &picker.to,
        picker.focus == PickerField::To,
        &theme,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("YYYY-MM-DD · {}", state.timezone.name()),
            Style::default().fg(theme.dim),
        )),
        rows[3],
    );

    // Validation message below the box
    if let Some(message) = &picker.message {
        let error_area = Rect {
            x: card.x,
            y: card.y.saturating_add(card.height),
            width: card.width,
            height: 1,
        }
        .intersection(area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            error_area,
        );
    }
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };

    let line = Line::from(vec![
        Span::styled(format!("{label}  "), Style::default().fg(theme.dim)),
        Span::styled(format!("{value}{cursor}"), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
