//! `reqwest` implementation of the remote board service port.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::board::{
    domain::{Board, Lane, LaneId, Task, TaskId},
    ports::{
        CreateLaneRequest, CreateTaskRequest, MoveTaskRequest, RemoteBoardService, RemoteError,
        RemoteResult, UNKNOWN_ERROR_MESSAGE, UpdateLaneRequest, UpdateTaskRequest,
    },
};
use crate::config::ApiConfig;

/// Board service client speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBoardService {
    client: Client,
    base_url: String,
}

impl HttpBoardService {
    /// Creates a client for the service at `base_url`.
    ///
    /// Trailing slashes on the base address are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RemoteResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RemoteError::Transport(format!("build http client: {err}")))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a client from API configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn from_config(config: &ApiConfig) -> RemoteResult<Self> {
        Self::new(config.base_url.clone(), config.request_timeout())
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let raw: String = base_url.into();
        Self {
            client,
            base_url: raw.trim_end_matches('/').to_owned(),
        }
    }

    /// Returns the normalized base address.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{path}", self.base_url))
    }

    /// Sends a request, turning non-success statuses into API errors that
    /// carry the response body verbatim.
    async fn send(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        let status = response.status();
        tracing::debug!(
            url = %response.url(),
            status = status.as_u16(),
            "board service responded"
        );
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_owned()
        } else {
            body
        };
        Err(RemoteError::api(status.as_u16(), message))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> RemoteResult<T> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| RemoteError::Decode(err.to_string()))
    }
}

#[async_trait]
impl RemoteBoardService for HttpBoardService {
    async fn get_board(&self) -> RemoteResult<Board> {
        self.send_json(self.request(Method::GET, "/board")).await
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> RemoteResult<Task> {
        self.send_json(self.request(Method::POST, "/tasks").json(request))
            .await
    }

    async fn get_task(&self, id: &TaskId) -> RemoteResult<Task> {
        self.send_json(self.request(Method::GET, &format!("/tasks/{id}")))
            .await
    }

    async fn update_task(&self, id: &TaskId, request: &UpdateTaskRequest) -> RemoteResult<Task> {
        self.send_json(
            self.request(Method::PUT, &format!("/tasks/{id}"))
                .json(request),
        )
        .await
    }

    async fn delete_task(&self, id: &TaskId) -> RemoteResult<()> {
        self.send(self.request(Method::DELETE, &format!("/tasks/{id}")))
            .await
            .map(|_| ())
    }

    async fn move_task(&self, id: &TaskId, request: &MoveTaskRequest) -> RemoteResult<Task> {
        self.send_json(
            self.request(Method::PATCH, &format!("/tasks/{id}/move"))
                .json(request),
        )
        .await
    }

    async fn create_lane(&self, request: &CreateLaneRequest) -> RemoteResult<Lane> {
        self.send_json(self.request(Method::POST, "/lanes").json(request))
            .await
    }

    async fn update_lane(&self, id: &LaneId, request: &UpdateLaneRequest) -> RemoteResult<Lane> {
        self.send_json(
            self.request(Method::PUT, &format!("/lanes/{id}"))
                .json(request),
        )
        .await
    }

    async fn delete_lane(&self, id: &LaneId) -> RemoteResult<()> {
        self.send(self.request(Method::DELETE, &format!("/lanes/{id}")))
            .await
            .map(|_| ())
    }
}
