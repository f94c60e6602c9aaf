use ratatui::style::Color;

pub const FOCUSED_BORDER: Color = Color::Cyan;
pub const UNFOCUSED_BORDER: Color = Color::DarkGray;
pub const SELECTED_BG: Color = Color::Blue;
pub const GRABBED_BG: Color = Color::Magenta;
pub const DROP_TARGET_BORDER: Color = Color::Magenta;

pub const NORMAL_TEXT: Color = Color::White;
pub const MUTED_TEXT: Color = Color::DarkGray;
pub const LABEL_TEXT: Color = Color::LightBlue;
pub const HIGHLIGHT_TEXT: Color = Color::Yellow;

pub const PRIORITY_CRITICAL: Color = Color::Red;
pub const PRIORITY_HIGH: Color = Color::LightRed;
pub const PRIORITY_MEDIUM: Color = Color::Yellow;
pub const PRIORITY_LOW: Color = Color::Gray;

pub const POPUP_BG: Color = Color::Black;
pub const ERROR_COLOR: Color = Color::Red;
pub const FALLBACK_COLUMN: Color = Color::White;
