use crossterm::event::{KeyCode, KeyEvent};
use kanban_domain::*;
use kanban_tui::{ui, App};
use ratatui::{backend::TestBackend, Terminal};

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|frame| ui::render(app, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_renders_columns_and_cards() {
    let mut card = Card::new("Ship release".to_string(), ColumnId::InProgress);
    card.labels = vec!["ops".to_string()];
    card.description = "Tag and publish".to_string();
    let app = App::new(BoardStore::shared(Board::with_cards(vec![card])));

    let text = screen(&app);
    for title in ["Backlog", "To Do", "In Progress", "Done"] {
        assert!(text.contains(title), "missing column {}", title);
    }
    assert!(text.contains("Ship release"));
    assert!(text.contains("#ops"));
    assert!(text.contains("Tag and publish"));
}

#[test]
fn test_render_reads_live_board() {
    let app = App::new(BoardStore::shared(Board::new()));
    assert!(!screen(&app).contains("Late arrival"));

    app.board()
        .dispatch(&CreateCard::new("Late arrival"))
        .unwrap();
    assert!(screen(&app).contains("Late arrival"));
}

#[test]
fn test_renders_create_form() {
    let mut app = App::new(BoardStore::shared(Board::new()));
    app.handle_key(KeyEvent::from(KeyCode::Char('n')));
    app.handle_key(KeyEvent::from(KeyCode::Char('X')));

    let text = screen(&app);
    assert!(text.contains("New card in Backlog"));
    assert!(text.contains("< medium >"));
}
