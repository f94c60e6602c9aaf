pub mod board;
pub mod card;
pub mod column;
pub mod commands;
pub mod query;
pub mod seed;
pub mod sort;
pub mod state;

pub use board::Board;
pub use card::{Card, CardId, CardPriority, CardUpdate};
pub use column::{neighbor_column, ColumnId, ColumnMeta, MoveDirection};
pub use commands::{
    reduce, AddLabel, Command, CommandContext, CreateCard, DeleteCard, LoadCards, MoveCard,
    ReorderColumn, UpdateCard,
};
pub use query::{BoardView, CardBrief, ColumnSummary, ColumnView, PriorityCounts};
pub use seed::seed_cards;
pub use state::{BoardHandle, BoardObserver, BoardStore, LiveBoard};
