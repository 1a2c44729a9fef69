//! JSON bodies exchanged with the analysis server.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{ChatTurn, ClientError, CodeSnapshot, Language, Project, ProjectId};

#[derive(Debug, Serialize)]
pub struct ExplainRequest<'a> {
    pub code: &'a str,
    pub language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SaveCodeRequest<'a> {
    pub code: &'a str,
    pub language: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProjectRequest<'a> {
    pub project_name: &'a str,
    pub code: &'a str,
    pub language: &'a str,
}

#[derive(Debug, Serialize)]
pub struct FavoriteRequest {
    pub id: ProjectId,
    pub fav: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteRequest {
    pub id: ProjectId,
}

#[derive(Debug, Serialize)]
pub struct AssistantRequest<'a> {
    pub message: &'a str,
}

/// `{status, message?, error?}` acknowledgement shared by the mutating endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct StatusEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusEnvelope {
    /// Succeeds only on `status: "success"`; a missing status counts as success
    /// for endpoints that reply with data only.
    pub fn into_result(self, allow_missing: bool) -> Result<(), ClientError> {
        match self.status.as_deref() {
            Some("success") => Ok(()),
            None if allow_missing => Ok(()),
            other => Err(ClientError::RemoteRejection {
                status: other.unwrap_or("missing").to_string(),
                message: self
                    .message
                    .or(self.error)
                    .unwrap_or_else(|| "request failed".to_string()),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SnapshotRow {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<SnapshotRow> for CodeSnapshot {
    fn from(row: SnapshotRow) -> Self {
        Self {
            code: row.code.unwrap_or_default(),
            language: Language::parse(row.language.as_deref().unwrap_or_default()),
            captured_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoadLastCodeResponse {
    #[serde(flatten)]
    pub envelope: StatusEnvelope,
    #[serde(default)]
    pub data: Option<SnapshotRow>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectRow {
    pub id: ProjectId,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_favorite: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            name: row.project_name.unwrap_or_default(),
            code: row.code.unwrap_or_default(),
            language: Language::parse(row.language.as_deref().unwrap_or_default()),
            is_favorite: row.is_favorite,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectsResponse {
    #[serde(flatten)]
    pub envelope: StatusEnvelope,
    #[serde(default)]
    pub projects: Vec<ProjectRow>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRow {
    #[serde(default)]
    pub user_message: Option<String>,
    #[serde(default)]
    pub ai_response: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<ChatRow> for ChatTurn {
    fn from(row: ChatRow) -> Self {
        Self {
            user_message: row.user_message.unwrap_or_default(),
            assistant_reply: row.ai_response.unwrap_or_default(),
            sent_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(flatten)]
    pub envelope: StatusEnvelope,
    #[serde(default)]
    pub chat: Vec<ChatRow>,
}

/// SQLite hands `is_favorite` back as 0/1; other servers use booleans.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(b)) => b,
        Some(serde_json::Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        Some(serde_json::Value::String(s)) => matches!(s.trim(), "1" | "true"),
        _ => false,
    })
}
