use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

/// Creates a separator span for dividing hint groups.
pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hint groups per mode.
pub mod common {
    use super::KeyHint;

    pub fn table() -> Vec<KeyHint> {
        vec![
            KeyHint::new("d/a", "sort date/amount"),
            KeyHint::new("n/p", "page"),
            KeyHint::new("s", "page size"),
            KeyHint::new("/", "dates"),
            KeyHint::new("c", "clear dates"),
            KeyHint::new("r", "fetch"),
        ]
    }

    pub fn date_picker() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("Enter", "apply"),
            KeyHint::new("Esc", "cancel"),
        ]
    }

    pub fn error_overlay() -> Vec<KeyHint> {
        vec![KeyHint::new("Enter", "understood")]
    }

    pub fn global() -> Vec<KeyHint> {
        vec![KeyHint::new("q", "quit")]
    }
}
