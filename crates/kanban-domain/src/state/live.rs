use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::Board;

/// Always-current view of the committed board.
///
/// Handlers that outlive a single transition hold a clone of this handle and
/// call [`LiveBoard::current`] every time they run. Capturing an `Arc<Board>`
/// at registration instead would freeze them on that snapshot.
#[derive(Debug, Clone)]
pub struct LiveBoard {
    cell: Arc<RwLock<Arc<Board>>>,
    revision: Arc<AtomicU64>,
}

impl LiveBoard {
    pub fn new(board: Board) -> Self {
        Self {
            cell: Arc::new(RwLock::new(Arc::new(board))),
            revision: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The most recently committed snapshot.
    pub fn current(&self) -> Arc<Board> {
        Arc::clone(&*self.cell.read())
    }

    /// Number of snapshots published since creation.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    pub(crate) fn publish(&self, board: Arc<Board>) {
        *self.cell.write() = board;
        self.revision.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Card, ColumnId};

    #[test]
    fn test_clones_share_the_cell() {
        let live = LiveBoard::new(Board::new());
        let registered = live.clone();
        assert_eq!(registered.revision(), 0);

        let next = Board::with_cards(vec![Card::new("A".to_string(), ColumnId::Todo)]);
        live.publish(Arc::new(next));

        assert_eq!(registered.current().cards.len(), 1);
        assert_eq!(registered.revision(), 1);
    }

    #[test]
    fn test_held_snapshot_is_immutable() {
        let live = LiveBoard::new(Board::new());
        let held = live.current();

        live.publish(Arc::new(Board::with_cards(vec![Card::new(
            "A".to_string(),
            ColumnId::Todo,
        )])));

        assert!(held.cards.is_empty());
        assert_eq!(live.current().cards.len(), 1);
    }
}
