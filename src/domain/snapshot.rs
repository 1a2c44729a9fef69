//! Code snapshots and full-fix history.

use serde::{Deserialize, Serialize};

use super::language::Language;

/// A captured editor buffer. Snapshots are never mutated; newer ones supersede older ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnapshot {
    pub code: String,
    pub language: Language,
    /// RFC3339 capture time, when the store provides one.
    #[serde(default)]
    pub captured_at: Option<String>,
}

/// A successful full fix, kept for the history view of the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixRecord {
    pub original_code: String,
    pub fixed_code: String,
    pub language: Language,
}
