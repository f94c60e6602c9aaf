use crate::events::{Event, EventHandler};
use crate::input::InputState;
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kanban_core::KanbanResult;
use kanban_domain::sort::prioritized_ids;
use kanban_domain::{
    neighbor_column, Board, BoardHandle, CardId, CardPriority, ColumnId, Command, CreateCard,
    DeleteCard, MoveCard, MoveDirection, ReorderColumn,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

/// Inline "new card" form.
#[derive(Debug, Clone)]
pub struct CreateForm {
    pub title: InputState,
    pub priority: CardPriority,
    pub column: ColumnId,
}

impl CreateForm {
    fn new(column: ColumnId) -> Self {
        Self {
            title: InputState::new(),
            priority: CardPriority::default(),
            column,
        }
    }
}

/// A card picked up with the keyboard, waiting to be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grab {
    pub card_id: CardId,
    pub from: ColumnId,
}

#[derive(Debug, Clone)]
pub enum AppMode {
    Normal,
    Creating(CreateForm),
    Dragging(Grab),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Terminal view of a shared board.
///
/// The app never keeps its own copy of the cards: every frame and every key
/// handler reads the live board, so changes made by agents show up on the
/// next tick and gestures act on the current state.
pub struct App {
    board: BoardHandle,
    pub mode: AppMode,
    pub selected_column: usize,
    pub selected_card: usize,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
}

impl App {
    pub fn new(board: BoardHandle) -> Self {
        Self {
            board,
            mode: AppMode::Normal,
            selected_column: 0,
            selected_card: 0,
            status: None,
            should_quit: false,
        }
    }

    pub fn board(&self) -> &BoardHandle {
        &self.board
    }

    pub fn snapshot(&self) -> std::sync::Arc<Board> {
        self.board.live().current()
    }

    pub fn selected_column_id(&self, board: &Board) -> ColumnId {
        board
            .columns
            .get(self.selected_column)
            .copied()
            .unwrap_or_else(|| board.default_column())
    }

    pub fn selected_card_id(&self, board: &Board) -> Option<CardId> {
        board
            .cards_in(self.selected_column_id(board))
            .nth(self.selected_card)
            .map(|c| c.id)
    }

    pub fn grabbed(&self) -> Option<Grab> {
        match self.mode {
            AppMode::Dragging(grab) => Some(grab),
            _ => None,
        }
    }

    /// Keep the selection inside the board as it changes underneath us.
    pub fn sync_selection(&mut self) {
        let board = self.snapshot();
        if board.columns.is_empty() {
            self.selected_column = 0;
            self.selected_card = 0;
            return;
        }
        self.selected_column = self.selected_column.min(board.columns.len() - 1);
        let count = board.card_count(self.selected_column_id(&board));
        self.selected_card = self.selected_card.min(count.saturating_sub(1));

        if let Some(grab) = self.grabbed() {
            if board.find_card(grab.card_id).is_none() {
                self.mode = AppMode::Normal;
                self.set_error("Grabbed card was deleted");
            }
        }
    }

    fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    fn dispatch(&mut self, command: &dyn Command) -> Option<std::sync::Arc<Board>> {
        match self.board.dispatch(command) {
            Ok(board) => Some(board),
            Err(e) => {
                tracing::warn!("{} failed: {}", command.description(), e);
                self.set_error(e.to_string());
                None
            }
        }
    }

    fn select_card(&mut self, board: &Board, card_id: CardId) {
        if let Some(card) = board.find_card(card_id) {
            if let Some(col_idx) = board.columns.iter().position(|c| *c == card.column) {
                self.selected_column = col_idx;
                self.selected_card = board
                    .cards_in(card.column)
                    .position(|c| c.id == card_id)
                    .unwrap_or(0);
            }
        }
    }

    fn move_column_selection(&mut self, direction: MoveDirection) {
        let board = self.snapshot();
        let current = self.selected_column_id(&board);
        let Some(target) = neighbor_column(&board.columns, current, direction) else {
            return;
        };
        if let Some(idx) = board.columns.iter().position(|c| *c == target) {
            self.selected_column = idx;
            self.selected_card = 0;
        }
    }

    fn move_card_selection(&mut self, forward: bool) {
        let board = self.snapshot();
        let count = board.card_count(self.selected_column_id(&board));
        if count == 0 {
            return;
        }
        self.selected_card = if forward {
            (self.selected_card + 1).min(count - 1)
        } else {
            self.selected_card.saturating_sub(1)
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let mode = std::mem::replace(&mut self.mode, AppMode::Normal);
        self.mode = match mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Creating(form) => self.handle_form_key(key, form),
            AppMode::Dragging(grab) => self.handle_drag_key(key, grab),
        };
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> AppMode {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => self.move_column_selection(MoveDirection::Left),
            KeyCode::Right | KeyCode::Char('l') => self.move_column_selection(MoveDirection::Right),
            KeyCode::Up | KeyCode::Char('k') => self.move_card_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_card_selection(true),
            KeyCode::Char('n') => {
                self.status = None;
                let column = self.selected_column_id(&self.snapshot());
                return AppMode::Creating(CreateForm::new(column));
            }
            KeyCode::Char(' ') => {
                let board = self.snapshot();
                if let Some(card) = self
                    .selected_card_id(&board)
                    .and_then(|id| board.find_card(id))
                {
                    self.set_info(format!("Moving '{}': pick a column, Space to drop", card.title));
                    return AppMode::Dragging(Grab {
                        card_id: card.id,
                        from: card.column,
                    });
                }
            }
            KeyCode::Char('d') => {
                let board = self.snapshot();
                if let Some(card) = self
                    .selected_card_id(&board)
                    .and_then(|id| board.find_card(id))
                {
                    let title = card.title.clone();
                    if self.dispatch(&DeleteCard { card_id: card.id }).is_some() {
                        self.set_info(format!("Deleted '{}'", title));
                        self.sync_selection();
                    }
                }
            }
            KeyCode::Char('p') => {
                let board = self.snapshot();
                let column = self.selected_column_id(&board);
                let card_ids = prioritized_ids(&board, column);
                if self.dispatch(&ReorderColumn { column, card_ids }).is_some() {
                    self.selected_card = 0;
                    self.set_info(format!("Sorted {} by priority", board.column_title(column)));
                }
            }
            _ => {}
        }
        AppMode::Normal
    }

    fn handle_form_key(&mut self, key: KeyEvent, mut form: CreateForm) -> AppMode {
        match key.code {
            KeyCode::Esc => return AppMode::Normal,
            KeyCode::Tab => form.priority = form.priority.cycle(),
            KeyCode::Enter => {
                let title = form.title.take_trimmed();
                if title.is_empty() {
                    self.set_error("Title must not be empty");
                    return AppMode::Creating(form);
                }
                let command = CreateCard::new(title)
                    .with_priority(form.priority)
                    .in_column(form.column);
                if let Some(board) = self.dispatch(&command) {
                    self.select_card(&board, command.card_id);
                    self.set_info(format!("Created '{}'", command.title));
                }
                return AppMode::Normal;
            }
            KeyCode::Backspace => form.title.backspace(),
            KeyCode::Delete => form.title.delete(),
            KeyCode::Left => form.title.move_left(),
            KeyCode::Right => form.title.move_right(),
            KeyCode::Home => form.title.move_home(),
            KeyCode::End => form.title.move_end(),
            KeyCode::Char(c) => form.title.insert_char(c),
            _ => {}
        }
        AppMode::Creating(form)
    }

    fn handle_drag_key(&mut self, key: KeyEvent, grab: Grab) -> AppMode {
        match key.code {
            KeyCode::Esc => {
                self.set_info("Move cancelled");
                return AppMode::Normal;
            }
            KeyCode::Left | KeyCode::Char('h') => self.move_column_selection(MoveDirection::Left),
            KeyCode::Right | KeyCode::Char('l') => self.move_column_selection(MoveDirection::Right),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.drop_card(grab);
                return AppMode::Normal;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return AppMode::Normal;
            }
            _ => {}
        }
        AppMode::Dragging(grab)
    }

    /// Release a grabbed card on the selected column.
    ///
    /// Resolves to the same `MoveCard` the move tool dispatches. Dropping on
    /// the origin column cancels the gesture.
    fn drop_card(&mut self, grab: Grab) {
        let board = self.snapshot();
        let Some(card) = board.find_card(grab.card_id) else {
            self.set_error("Card no longer exists");
            return;
        };
        let to_column = self.selected_column_id(&board);
        if card.column == to_column {
            self.set_info("Move cancelled");
            self.select_card(&board, grab.card_id);
            return;
        }

        let title = card.title.clone();
        let command = MoveCard {
            card_id: grab.card_id,
            to_column,
        };
        if let Some(next) = self.dispatch(&command) {
            self.select_card(&next, grab.card_id);
            self.set_info(format!("Moved '{}' to {}", title, next.column_title(to_column)));
        }
    }

    pub async fn run(&mut self) -> KanbanResult<()> {
        let mut terminal = setup_terminal()?;
        let mut events = EventHandler::default();

        let result = self.event_loop(&mut terminal, &mut events).await;

        events.stop();
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &mut EventHandler,
    ) -> KanbanResult<()> {
        while !self.should_quit {
            self.sync_selection();
            terminal.draw(|frame| ui::render(self, frame))?;

            match events.next().await {
                Some(Event::Key(key)) => self.handle_key(key),
                Some(Event::Resize) | Some(Event::Tick) => {}
                None => break,
            }
        }
        Ok(())
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
