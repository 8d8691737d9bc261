use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::persona::{Persona, PersonaDraft};
use crate::models::schedule::{
    BulkScheduleItem, RecommendationResponse, Schedule, ScheduleDraft,
};

// Closed error taxonomy; callers match exhaustively. NotFound is an
// expected state for the persona, not a failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("request failed: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport {
            status: err.status().map(|code| code.as_u16()),
            message: err.to_string(),
        }
    }
}

#[derive(Serialize)]
struct StatusUpdate {
    is_completed: bool,
}

#[derive(Serialize)]
struct BulkCreatePayload<'a> {
    schedules: &'a [BulkScheduleItem],
}

#[derive(Serialize)]
struct RecommendationRequest<'a> {
    prompt: &'a str,
    start_date: String,
    end_date: String,
}

#[async_trait]
pub trait SchedulerApi: Send + Sync {
    async fn get_persona(&self) -> Result<Persona, ApiError>;
    async fn save_persona(&self, draft: &PersonaDraft) -> Result<Persona, ApiError>;
    async fn refresh_persona_from_history(&self) -> Result<Persona, ApiError>;
    async fn get_schedules(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Schedule>, ApiError>;
    async fn create_schedule(&self, draft: &ScheduleDraft) -> Result<Schedule, ApiError>;
    async fn bulk_create_schedules(
        &self,
        items: &[BulkScheduleItem],
    ) -> Result<Vec<Schedule>, ApiError>;
    async fn update_schedule(
        &self,
        id: i64,
        draft: &ScheduleDraft,
    ) -> Result<Schedule, ApiError>;
    async fn update_schedule_status(
        &self,
        id: i64,
        is_completed: bool,
    ) -> Result<Schedule, ApiError>;
    async fn delete_schedule(&self, id: i64) -> Result<(), ApiError>;
    async fn recommend_schedules(
        &self,
        prompt: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RecommendationResponse, ApiError>;
}

pub struct HttpSchedulerApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSchedulerApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Read the body once; keep it for the error message when the
    // status is non-2xx or the payload does not decode.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            return Err(ApiError::Transport {
                status: Some(status.as_u16()),
                message: text,
            });
        }
        serde_json::from_str(&text).map_err(|err| ApiError::Transport {
            status: Some(status.as_u16()),
            message: format!("failed to parse response: {}\nRaw body: {}", err, text),
        })
    }
}

#[async_trait]
impl SchedulerApi for HttpSchedulerApi {
    async fn get_persona(&self) -> Result<Persona, ApiError> {
        let response = self.client.get(self.url("/persona")).send().await?;
        Self::decode(response).await
    }

    async fn save_persona(&self, draft: &PersonaDraft) -> Result<Persona, ApiError> {
        let response = self
            .client
            .post(self.url("/persona"))
            .json(draft)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn refresh_persona_from_history(&self) -> Result<Persona, ApiError> {
        let response = self
            .client
            .post(self.url("/persona/update-from-history"))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get_schedules(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Schedule>, ApiError> {
        let response = self
            .client
            .get(self.url("/schedules"))
            .query(&[
                ("start_date", start.format("%Y-%m-%dT%H:%M:%S").to_string()),
                ("end_date", end.format("%Y-%m-%dT%H:%M:%S").to_string()),
            ])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_schedule(&self, draft: &ScheduleDraft) -> Result<Schedule, ApiError> {
        let response = self
            .client
            .post(self.url("/schedules"))
            .json(draft)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn bulk_create_schedules(
        &self,
        items: &[BulkScheduleItem],
    ) -> Result<Vec<Schedule>, ApiError> {
        let response = self
            .client
            .post(self.url("/schedules/bulk-create"))
            .json(&BulkCreatePayload { schedules: items })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_schedule(
        &self,
        id: i64,
        draft: &ScheduleDraft,
    ) -> Result<Schedule, ApiError> {
        let response = self
            .client
            .put(self.url(&format!("/schedules/{}", id)))
            .json(draft)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_schedule_status(
        &self,
        id: i64,
        is_completed: bool,
    ) -> Result<Schedule, ApiError> {
        let response = self
            .client
            .put(self.url(&format!("/schedules/{}/status", id)))
            .json(&StatusUpdate { is_completed })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_schedule(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/schedules/{}", id)))
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Transport {
                status: Some(status.as_u16()),
                message: text,
            });
        }
        Ok(())
    }

    async fn recommend_schedules(
        &self,
        prompt: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RecommendationResponse, ApiError> {
        let request = RecommendationRequest {
            prompt,
            start_date: start_date.format("%Y-%m-%d").to_string(),
            end_date: end_date.format("%Y-%m-%d").to_string(),
        };
        let response = self
            .client
            .post(self.url("/schedules/recommend"))
            .json(&request)
            .send()
            .await?;
        Self::decode(response).await
    }
}
