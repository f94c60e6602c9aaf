use super::colors::*;
use kanban_domain::{CardPriority, ColumnMeta};
use ratatui::style::{Color, Modifier, Style};

pub fn focused_border() -> Style {
    Style::default().fg(FOCUSED_BORDER)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(UNFOCUSED_BORDER)
}

pub fn drop_target_border() -> Style {
    Style::default()
        .fg(DROP_TARGET_BORDER)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_card(grabbed: bool) -> Style {
    let bg = if grabbed { GRABBED_BG } else { SELECTED_BG };
    Style::default().bg(bg).add_modifier(Modifier::BOLD)
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn muted_text() -> Style {
    Style::default().fg(MUTED_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn bold_highlight() -> Style {
    Style::default()
        .fg(HIGHLIGHT_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_COLOR)
}

pub fn popup() -> Style {
    Style::default().bg(POPUP_BG)
}

pub fn priority_style(priority: CardPriority) -> Style {
    let color = match priority {
        CardPriority::Critical => PRIORITY_CRITICAL,
        CardPriority::High => PRIORITY_HIGH,
        CardPriority::Medium => PRIORITY_MEDIUM,
        CardPriority::Low => PRIORITY_LOW,
    };
    let style = Style::default().fg(color);
    if priority == CardPriority::Critical {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Column title color from its `#rrggbb` display color.
pub fn column_title(meta: Option<&ColumnMeta>) -> Style {
    let color = meta
        .and_then(|m| m.color.parse::<Color>().ok())
        .unwrap_or(FALLBACK_COLUMN);
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
