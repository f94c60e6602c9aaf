use crate::app::{App, AppMode, CreateForm};
use crate::theme::styles::*;
use kanban_domain::{Board, Card, CardPriority, ColumnId};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(app: &App, frame: &mut Frame) {
    let board = app.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(frame.area());

    render_columns(app, &board, frame, chunks[0]);
    render_footer(app, frame, chunks[1]);

    if let AppMode::Creating(form) = &app.mode {
        render_create_form(&board, form, frame);
    }
}

fn render_columns(app: &App, board: &Board, frame: &mut Frame, area: Rect) {
    if board.columns.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = board
        .columns
        .iter()
        .map(|_| Constraint::Ratio(1, board.columns.len() as u32))
        .collect();
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (idx, (&column, &column_area)) in board.columns.iter().zip(areas.iter()).enumerate() {
        render_column(app, board, column, idx == app.selected_column, frame, column_area);
    }
}

fn render_column(
    app: &App,
    board: &Board,
    column: ColumnId,
    selected: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let grab = app.grabbed();
    let cards: Vec<&Card> = board.cards_in(column).collect();

    let border_style = match (selected, grab) {
        (true, Some(_)) => drop_target_border(),
        (true, None) => focused_border(),
        (false, _) => unfocused_border(),
    };
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", board.column_title(column)),
            column_title(board.column_meta.get(&column)),
        ),
        Span::styled(format!("({}) ", cards.len()), muted_text()),
    ]);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| {
            let grabbed = grab.is_some_and(|g| g.card_id == card.id);
            let item = ListItem::new(card_lines(card, width));
            if grabbed {
                item.style(selected_card(true))
            } else {
                item
            }
        })
        .collect();

    let mut state = ListState::default();
    // While dragging, the highlight belongs to the grabbed card
    if selected && grab.is_none() && !cards.is_empty() {
        state.select(Some(app.selected_card.min(cards.len() - 1)));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(selected_card(false));
    frame.render_stateful_widget(list, area, &mut state);
}

fn card_lines(card: &Card, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(priority_badge(card.priority), priority_style(card.priority)),
        Span::raw(" "),
        Span::styled(truncate(&card.title, width.saturating_sub(4)), normal_text()),
    ])];

    if !card.labels.is_empty() {
        let labels: Vec<String> = card.labels.iter().map(|l| format!("#{}", l)).collect();
        lines.push(Line::from(Span::styled(
            truncate(&labels.join(" "), width),
            label_text(),
        )));
    }
    if let Some(first) = card.description.lines().find(|l| !l.trim().is_empty()) {
        lines.push(Line::from(Span::styled(truncate(first.trim(), width), muted_text())));
    }
    lines.push(Line::from(""));
    lines
}

fn priority_badge(priority: CardPriority) -> String {
    match priority {
        CardPriority::Critical => "!!!".to_string(),
        CardPriority::High => "!! ".to_string(),
        CardPriority::Medium => "!  ".to_string(),
        CardPriority::Low => "·  ".to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let help = match app.mode {
        AppMode::Normal => {
            "←/→ column  ↑/↓ card  n: new  Space: grab  d: delete  p: sort by priority  q: quit"
        }
        AppMode::Creating(_) => "Tab: priority  Enter: create  Esc: cancel",
        AppMode::Dragging(_) => "←/→ pick column  Space/Enter: drop  Esc: cancel",
    };

    let mut spans = Vec::new();
    if let Some(status) = &app.status {
        let style = if status.is_error {
            error_text()
        } else {
            bold_highlight()
        };
        spans.push(Span::styled(status.text.clone(), style));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(help, muted_text()));

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn render_create_form(board: &Board, form: &CreateForm, frame: &mut Frame) {
    let area = centered_rect(60, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" New card in {} ", board.column_title(form.column)))
        .borders(Borders::ALL)
        .border_style(focused_border())
        .style(popup());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let input = Paragraph::new(form.title.as_str())
        .style(normal_text())
        .block(Block::default().title("Title").borders(Borders::ALL));
    frame.render_widget(input, chunks[0]);

    let picker = Line::from(vec![
        Span::styled("Priority: ", muted_text()),
        Span::styled(
            format!("< {} >", form.priority.as_str()),
            priority_style(form.priority),
        ),
    ]);
    frame.render_widget(Paragraph::new(picker), chunks[1]);

    let cursor_x = chunks[0].x + form.title.cursor_column() as u16 + 1;
    let cursor_y = chunks[0].y + 1;
    frame.set_cursor_position((cursor_x, cursor_y));
}
