//! HTTP client for the todo server.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use choo_core::{NetworkError, ReqwestErrorExt, ServerConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use crate::api::{Operation, TodoApi};
use crate::error::{ApiError, ApiResult};
use crate::retry::{with_retry, RetryConfig};
use crate::task::{DeleteRequest, DoneRequest, EditRequest, PinRequest, Task, TaskId, UserInfo};

pub struct TodoClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl TodoClient {
    /// Build a client from the `[server]` config section.
    pub fn new(config: &ServerConfig) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| e.into_network_error())?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry.clone().into(),
        })
    }

    /// Client with default settings against `base_url`.
    pub fn with_base_url(base_url: &str) -> Result<Self, NetworkError> {
        let config = ServerConfig {
            base_url: base_url.to_string(),
            ..ServerConfig::default()
        };
        Self::new(&config)
    }

    /// Override the read retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, operation: Operation) -> String {
        format!("{}{}", self.base_url, operation.path())
    }

    /// GET with retry, then decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, operation: Operation) -> ApiResult<T> {
        let url = self.url(operation);

        let response = with_retry(&self.retry, || self.client.get(&url).send())
            .await
            .map_err(|e| ApiError::new(operation, e.into_network_error()))?;

        let response = Self::check_status(operation, response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::new(operation, e.into_network_error()))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            ApiError::new(
                operation,
                NetworkError::InvalidResponse(format!("JSON parse error: {}", e)),
            )
        })
    }

    /// Single-shot POST; any 2xx is an acknowledgement and the body is ignored.
    async fn post_ack<B: Serialize + ?Sized>(&self, operation: Operation, body: &B) -> ApiResult<()> {
        let response = self
            .client
            .post(self.url(operation))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::new(operation, e.into_network_error()))?;

        Self::check_status(operation, response).await?;
        Ok(())
    }

    async fn check_status(
        operation: Operation,
        response: reqwest::Response,
    ) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(ApiError::new(
            operation,
            NetworkError::ServerError {
                status: status.as_u16(),
                message: text.trim().to_string(),
            },
        ))
    }
}

#[async_trait]
impl TodoApi for TodoClient {
    #[instrument(skip(self), level = "info")]
    async fn fetch_user_info(&self) -> ApiResult<UserInfo> {
        self.get_json(Operation::FetchUserInfo).await
    }

    #[instrument(skip(self), level = "info")]
    async fn fetch_task_list(&self) -> ApiResult<Vec<Task>> {
        // An empty list is encoded as `null` by the server.
        let tasks: Option<Vec<Task>> = self.get_json(Operation::FetchTaskList).await?;
        Ok(tasks.unwrap_or_default())
    }

    #[instrument(skip(self), level = "info")]
    async fn submit_done(&self, id: TaskId, status: bool) -> ApiResult<()> {
        self.post_ack(Operation::SubmitDone, &DoneRequest { id, done: status })
            .await
    }

    #[instrument(skip(self), level = "info")]
    async fn submit_pin(&self, id: TaskId, status: bool) -> ApiResult<()> {
        self.post_ack(Operation::SubmitPin, &PinRequest { id, pin: status })
            .await
    }

    #[instrument(skip(self, task), level = "info")]
    async fn submit_edit(
        &self,
        id: TaskId,
        task: &str,
        due: DateTime<FixedOffset>,
    ) -> ApiResult<()> {
        let body = EditRequest {
            id,
            task: task.to_string(),
            due,
        };
        self.post_ack(Operation::SubmitEdit, &body).await
    }

    #[instrument(skip(self), level = "info")]
    async fn submit_delete(&self, id: TaskId) -> ApiResult<()> {
        self.post_ack(Operation::SubmitDelete, &DeleteRequest { id })
            .await
    }
}
