//! HTTP implementation of the task API
//!
//! Talks JSON to `{base_url}/tasks`. One request per call: no retry, no
//! backoff. Non-2xx answers become [`ApiError::Status`] carrying the
//! server's `message` when it sent one.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::types::ErrorBody;
use super::{ApiError, ApiTask, TaskApi, TaskPatch, TaskRequest};
use crate::config::ApiConfig;

/// Which verb failed, for the fallback error message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verb {
    List,
    Create,
    Update,
    Delete,
}

impl Verb {
    fn default_message(&self) -> &'static str {
        match self {
            Verb::List => "failed to list tasks",
            Verb::Create => "failed to create task",
            Verb::Update => "failed to update task",
            Verb::Delete => "failed to delete task",
        }
    }
}

/// The server's `message` field, or the verb's generic text
pub(crate) fn error_message(body: &str, verb: Verb) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| verb.default_message().to_string())
}

/// Task API client over HTTP
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    base_url: String,
    http: Client,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(%base_url, ?timeout, "new: called");
        let http = Client::builder().timeout(timeout).build().map_err(ApiError::Network)?;
        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(config.base_url.clone(), Duration::from_millis(config.timeout_ms))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: u64) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }

    /// Turn a non-2xx response into an error
    async fn check(response: Response, verb: Verb) -> Result<Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body, verb);
        debug!(%status, %message, ?verb, "check: API error");
        Err(ApiError::Status { status, message })
    }

    /// Parse an optional JSON body; an empty body is `Null`
    async fn body_value(response: Response) -> Result<Value, ApiError> {
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> Result<Vec<ApiTask>, ApiError> {
        debug!("list_tasks: called");
        let response = self
            .http
            .get(self.tasks_url())
            .header("content-type", "application/json")
            .send()
            .await?;
        let response = Self::check(response, Verb::List).await?;

        let text = response.text().await?;
        let tasks: Vec<ApiTask> = serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        debug!(task_count = tasks.len(), "list_tasks: success");
        Ok(tasks)
    }

    async fn create_task(&self, task: &TaskRequest) -> Result<Value, ApiError> {
        debug!(title = %task.title, status = %task.status, "create_task: called");
        let response = self
            .http
            .post(self.tasks_url())
            .header("content-type", "application/json")
            .json(task)
            .send()
            .await?;
        let response = Self::check(response, Verb::Create).await?;
        Self::body_value(response).await
    }

    async fn update_task(&self, id: u64, patch: &TaskPatch) -> Result<Value, ApiError> {
        debug!(%id, ?patch.status, "update_task: called");
        let response = self
            .http
            .put(self.task_url(id))
            .header("content-type", "application/json")
            .json(patch)
            .send()
            .await?;
        let response = Self::check(response, Verb::Update).await?;
        Self::body_value(response).await
    }

    async fn delete_task(&self, id: u64) -> Result<(), ApiError> {
        debug!(%id, "delete_task: called");
        let response = self
            .http
            .delete(self.task_url(id))
            .header("content-type", "application/json")
            .send()
            .await?;
        Self::check(response, Verb::Delete).await?;
        Ok(())
    }
}
