//! Board ownership and dispatch.
//!
//! One [`BoardStore`] per running board, shared as a [`BoardHandle`] by the UI
//! and the tool surface. Every mutation goes through [`BoardStore::dispatch`].

pub mod live;

use kanban_core::KanbanResult;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use crate::commands::{reduce, Command};
use crate::Board;

pub use live::LiveBoard;

pub type BoardHandle = Arc<BoardStore>;

/// Notified with every committed snapshot, after the live board is refreshed.
pub trait BoardObserver: Send + Sync {
    fn on_commit(&self, board: &Board);
}

impl<F> BoardObserver for F
where
    F: Fn(&Board) + Send + Sync,
{
    fn on_commit(&self, board: &Board) {
        self(board)
    }
}

pub struct BoardStore {
    live: LiveBoard,
    dispatch_lock: Mutex<()>,
    observers: RwLock<Vec<Arc<dyn BoardObserver>>>,
}

impl BoardStore {
    pub fn new(board: Board) -> Self {
        Self {
            live: LiveBoard::new(board),
            dispatch_lock: Mutex::new(()),
            observers: RwLock::new(Vec::new()),
        }
    }

    pub fn shared(board: Board) -> BoardHandle {
        Arc::new(Self::new(board))
    }

    /// Handle for readers that must always see the latest commit.
    pub fn live(&self) -> &LiveBoard {
        &self.live
    }

    pub fn snapshot(&self) -> Arc<Board> {
        self.live.current()
    }

    pub fn subscribe(&self, observer: Arc<dyn BoardObserver>) {
        self.observers.write().push(observer);
    }

    /// Apply `command` to the current snapshot and commit the result.
    ///
    /// Dispatches are serialized: the transition, the live-board refresh, and
    /// observer notification all complete before the next dispatch starts. A
    /// rejected command commits nothing.
    pub fn dispatch(&self, command: &dyn Command) -> KanbanResult<Arc<Board>> {
        let _guard = self.dispatch_lock.lock();
        self.commit(&self.live.current(), command)
    }

    /// Decide on a command from the current snapshot and commit it in one step.
    ///
    /// `plan` runs under the dispatch lock, so no other commit can land between
    /// what it reads and the command it returns. Returning `None` commits
    /// nothing and hands back the snapshot `plan` saw.
    pub fn transact<C, R>(
        &self,
        plan: impl FnOnce(&Board) -> (Option<C>, R),
    ) -> KanbanResult<(Arc<Board>, R)>
    where
        C: Command,
    {
        let _guard = self.dispatch_lock.lock();
        let current = self.live.current();
        let (command, outcome) = plan(&current);
        let board = match command {
            Some(command) => self.commit(&current, &command)?,
            None => current,
        };
        Ok((board, outcome))
    }

    // Caller holds the dispatch lock.
    fn commit(&self, current: &Board, command: &dyn Command) -> KanbanResult<Arc<Board>> {
        let description = command.description();
        tracing::debug!("Executing: {}", description);

        let next = match reduce(current, command) {
            Ok(board) => Arc::new(board),
            Err(e) => {
                tracing::debug!("Rejected: {}: {}", description, e);
                return Err(e);
            }
        };

        self.live.publish(Arc::clone(&next));
        for observer in self.observers.read().iter() {
            observer.on_commit(&next);
        }

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CreateCard, MoveCard};
    use crate::ColumnId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_dispatch_refreshes_live_board() {
        let store = BoardStore::shared(Board::new());
        let live = store.live().clone();

        let command = CreateCard::new("Fix bug");
        store.dispatch(&command).unwrap();

        assert_eq!(live.revision(), 1);
        assert!(live.current().find_card(command.card_id).is_some());
    }

    #[test]
    fn test_observers_see_committed_board() {
        let store = BoardStore::new(Board::new());
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        store.subscribe(Arc::new(move |board: &Board| {
            counter.store(board.cards.len(), Ordering::SeqCst);
        }));

        store.dispatch(&CreateCard::new("A")).unwrap();
        store.dispatch(&CreateCard::new("B")).unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_rejected_command_commits_nothing() {
        let store = BoardStore::new(Board::new());
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notified);
        store.subscribe(Arc::new(move |_: &Board| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(store.dispatch(&CreateCard::new("")).is_err());

        assert_eq!(store.live().revision(), 0);
        assert_eq!(notified.load(Ordering::SeqCst), 0);
        assert!(store.snapshot().cards.is_empty());
    }

    #[test]
    fn test_concurrent_dispatches_are_serialized() {
        let store = BoardStore::shared(Board::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for j in 0..25 {
                        store
                            .dispatch(&CreateCard::new(format!("card {}-{}", i, j)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let board = store.snapshot();
        assert_eq!(board.cards.len(), 200);
        assert_eq!(store.live().revision(), 200);
        Board::validate_cards(&board.columns, &board.cards).unwrap();
    }

    #[test]
    fn test_transact_without_command_commits_nothing() {
        let store = BoardStore::new(Board::new());
        let (board, seen) = store
            .transact(|board| (None::<CreateCard>, board.cards.len()))
            .unwrap();
        assert_eq!(seen, 0);
        assert!(board.cards.is_empty());
        assert_eq!(store.live().revision(), 0);
    }

    #[test]
    fn test_transact_plan_sees_board_it_commits_against() {
        let store = BoardStore::shared(Board::new());
        let first = CreateCard::new("A");
        let card_id = first.card_id;
        store.dispatch(&first).unwrap();

        // Writers race to delete A; only the first plan may find it
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .transact(|board| match board.find_card(card_id) {
                            Some(_) => (Some(crate::DeleteCard { card_id }), true),
                            None => (None, false),
                        })
                        .unwrap()
                        .1
                })
            })
            .collect();
        let deleted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|found| *found)
            .count();

        assert_eq!(deleted, 1);
        assert_eq!(store.live().revision(), 2);
    }

    #[test]
    fn test_snapshot_taken_before_dispatch_stays_stale() {
        let store = BoardStore::new(Board::new());
        let command = CreateCard::new("A").in_column(ColumnId::Todo);
        store.dispatch(&command).unwrap();

        let captured = store.snapshot();
        store
            .dispatch(&MoveCard {
                card_id: command.card_id,
                to_column: ColumnId::Done,
            })
            .unwrap();

        assert_eq!(
            captured.find_card(command.card_id).unwrap().column,
            ColumnId::Todo
        );
        assert_eq!(
            store.snapshot().find_card(command.card_id).unwrap().column,
            ColumnId::Done
        );
    }
}
