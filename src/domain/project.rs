use serde::{Deserialize, Serialize};

use super::language::Language;

/// Unique identifier assigned by the store when a project is created.
pub type ProjectId = i64;

/// A named, saved piece of code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub code: String,
    pub language: Language,
    pub is_favorite: bool,
    /// Creation timestamp as reported by the store.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Fields supplied when creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub code: String,
    pub language: Language,
}

impl ProjectDraft {
    /// Build a draft from a name and the editor contents. Blank names yield `None`.
    pub fn new(name: &str, code: &str, language: Language) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            code: code.trim().to_string(),
            language,
        })
    }
}
