//! Repository implementations for data access in CodeSense.
//!
//! Provides database operations for code snapshots, chat turns, projects and
//! full-fix history.

mod chat;
mod fix_history;
mod project;
mod snapshot;

pub use chat::ChatRepository;
pub use fix_history::FixHistoryRepository;
pub use project::ProjectRepository;
pub use snapshot::SnapshotRepository;

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub(super) type DbConn = Arc<Mutex<Connection>>;

pub(super) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests;
