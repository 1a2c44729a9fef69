//! Application layer (ports and policies).
//!
//! Defines the traits the client orchestration depends on without tying it to
//! HTTP or SQLite.

pub mod gateway;

pub use gateway::{AnalysisBackend, AssistantBackend, ClipboardSink, PersistenceGateway, Services};
