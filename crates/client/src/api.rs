use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
}

/// Task record as the server serializes it. `completed` arrives as `0|1`;
/// the server also accepts a boolean, so full records can be echoed back
/// on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "completed_flag")]
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct HealthStatus {
    status: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` includes the `/api` prefix, e.g. `http://127.0.0.1:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn health(&self) -> Result<String, ClientError> {
        let response = self.http.get(self.url("/health")).send().await?;
        let health: HealthStatus = Self::decode(response).await?;
        Ok(health.status)
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.http.get(self.url("/tasks")).send().await?;
        Self::decode(response).await
    }

    pub async fn get_task(&self, id: i64) -> Result<Task, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/tasks/{id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn create_task(&self, title: &str, description: &str) -> Result<Task, ClientError> {
        let response = self
            .http
            .post(self.url("/tasks"))
            .json(&serde_json::json!({ "title": title, "description": description }))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Full-record replace; the server ignores unknown fields, so the whole
    /// task can be sent back as-is.
    pub async fn update_task(&self, task: &Task) -> Result<Task, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/tasks/{}", task.id)))
            .json(task)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/tasks/{id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("request failed with status {status}"));
        Err(ClientError::Api { status, message })
    }
}

mod completed_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(i64::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Flag::deserialize(deserializer)? {
            Flag::Bool(value) => value,
            Flag::Int(value) => value != 0,
        })
    }
}
