pub mod card_storage;
pub mod save_queue;
pub mod session;
pub mod store;
pub mod traits;

pub use card_storage::{hydrate, CardStorage};
pub use save_queue::{spawn_save_worker, SaveQueue};
pub use session::PersistentBoard;
pub use store::{JsonFileStore, MemoryStore};
pub use traits::KeyValueStore;
