pub mod error;
pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "postgres")]
pub use postgres::PgStore;

pub use error::StoreError;
pub use models::{Item, ItemId, TodoList, User, UserId};
pub use repo::UserStore;
