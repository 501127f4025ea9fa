pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::InMemoryStore;
pub use models::{Note, User};
pub use postgres::{PgNoteStore, PgUserStore};
pub use repository::{NoteStore, UserStore};
