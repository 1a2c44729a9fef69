//! HTTP adapter for the analysis server.

pub mod wire;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::application::gateway::{AnalysisBackend, AssistantBackend, PersistenceGateway};
use crate::domain::{
    AssistantReply, ChatTurn, ClientError, CodeSnapshot, ExplainMode, ExplainReply, Language,
    Project, ProjectDraft, ProjectId,
};
use crate::infra::app_config::AppConfig;
use wire::*;

/// Client for every endpoint the server exposes. It implements all three
/// gateway traits, so one instance backs a whole [`crate::application::Services`].
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(&config.server_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        log::debug!("GET {path}");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {path}");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn post_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ClientError> {
        let envelope: StatusEnvelope = self.post_json(path, body).await?;
        envelope.into_result(false)
    }
}

fn transport(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}

/// The server reports failures inside JSON envelopes with 4xx/5xx codes, so any
/// JSON body is decoded whatever the status. Anything else is a transport failure.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    let value: serde_json::Value = serde_json::from_str(&body).map_err(|_| {
        ClientError::Transport(format!("HTTP {status}: response was not JSON"))
    })?;
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl AnalysisBackend for HttpClient {
    async fn explain(
        &self,
        code: &str,
        language: &Language,
        mode: ExplainMode,
    ) -> Result<ExplainReply, ClientError> {
        let request = ExplainRequest {
            code,
            language: language.as_str(),
            mode: mode.wire_value(),
        };
        self.post_json("/explain", &request).await
    }
}

#[async_trait]
impl AssistantBackend for HttpClient {
    async fn ask(&self, message: &str) -> Result<AssistantReply, ClientError> {
        self.post_json("/assistant", &AssistantRequest { message })
            .await
    }
}

#[async_trait]
impl PersistenceGateway for HttpClient {
    async fn save_snapshot(&self, code: &str, language: &Language) -> Result<(), ClientError> {
        let request = SaveCodeRequest {
            code,
            language: language.as_str(),
        };
        self.post_ack("/save-code", &request).await
    }

    async fn load_last_snapshot(&self) -> Result<Option<CodeSnapshot>, ClientError> {
        let response: LoadLastCodeResponse = self.get_json("/load-last-code").await?;
        response.envelope.into_result(true)?;
        Ok(response.data.map(Into::into))
    }

    async fn load_chat(&self) -> Result<Vec<ChatTurn>, ClientError> {
        let response: ChatResponse = self.get_json("/load-chat").await?;
        response.envelope.into_result(true)?;
        Ok(response.chat.into_iter().map(Into::into).collect())
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<(), ClientError> {
        let request = SaveProjectRequest {
            project_name: &draft.name,
            code: &draft.code,
            language: draft.language.as_str(),
        };
        self.post_ack("/save-project", &request).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let response: ProjectsResponse = self.get_json("/projects").await?;
        response.envelope.into_result(true)?;
        Ok(response.projects.into_iter().map(Into::into).collect())
    }

    async fn set_favorite(&self, id: ProjectId, favorite: bool) -> Result<(), ClientError> {
        self.post_ack("/favorite-project", &FavoriteRequest { id, fav: favorite })
            .await
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), ClientError> {
        self.post_ack("/delete-project", &DeleteRequest { id }).await
    }
}
