use engine::{Currency, MoneyCents};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

fn amount_style(amount: MoneyCents, theme: &Theme) -> Style {
    let color = if amount.is_negative() {
        theme.negative
    } else if amount == MoneyCents::ZERO {
        theme.text
    } else {
        theme.positive
    };
    Style::default().fg(color)
}

/// Creates a styled span for a money amount with semantic coloring.
///
/// - Positive amounts: green
/// - Negative amounts: red, with the `-` sign
/// - Zero: neutral text color
#[must_use]
pub fn styled_amount(amount: MoneyCents, currency: Currency, theme: &Theme) -> Span<'static> {
    Span::styled(amount.format(currency), amount_style(amount, theme))
}

/// Same as [`styled_amount`], bold, for totals.
#[must_use]
pub fn styled_amount_bold(amount: MoneyCents, currency: Currency, theme: &Theme) -> Span<'static> {
    Span::styled(
        amount.format(currency),
        amount_style(amount, theme).add_modifier(Modifier::BOLD),
    )
}
