//! SQLite persistence (infrastructure).

pub mod database;
pub mod repository;
pub mod store;

pub use database::Database;
pub use repository::{ChatRepository, FixHistoryRepository, ProjectRepository, SnapshotRepository};
pub use store::LocalStore;
