//! Domain types for CodeSense.
//! Defines the core data structures and the invariant-holding session state.

pub mod analysis;
pub mod chat;
pub mod editor;
pub mod error;
pub mod language;
pub mod project;
pub mod session;
pub mod snapshot;

pub use analysis::*;
pub use chat::*;
pub use editor::*;
pub use error::*;
pub use language::*;
pub use project::*;
pub use session::*;
pub use snapshot::*;
