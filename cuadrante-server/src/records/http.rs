//! HTTP client for the external record store
//!
//! All four collaborator traits resolve to this one client. Every
//! request carries the configured timeout; a timed-out or unreachable
//! record store surfaces as an [`AppError`] the aggregation layer can
//! treat as "day missing" or "strategy failed".

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{ActivityAssignment, DaySample, HistoricalConfig, SlotUpdate, StoreParams};
use shared::{AppError, AppResult};
use std::collections::BTreeMap;
use std::time::Duration;

use super::{ActivityStore, HistoryConfigSource, StoreDirectory, TrafficSource};
use crate::core::Config;

/// HTTP client for record-store API calls
#[derive(Debug, Clone)]
pub struct RecordStoreClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RecordStoreClient {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.record_store_url.trim_end_matches('/').to_string(),
            token: config.record_store_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request, mapping 404 to `None`
    async fn get_json_opt<T: DeserializeOwned>(&self, path: &str) -> AppResult<Option<T>> {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = &self.token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::upstream(format!(
                "Record store returned {status} for {path}"
            )));
        }

        response
            .json()
            .await
            .map(Some)
            .map_err(|e| AppError::upstream(format!("Malformed record store response: {e}")))
    }

    /// Make a GET request, treating 404 as an error
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.get_json_opt(path)
            .await?
            .ok_or_else(|| AppError::not_found(path.to_string()))
    }

    /// Make a PUT request with JSON body, discarding the response body
    async fn put_json<B: serde::Serialize>(&self, path: &str, body: &B) -> AppResult<()> {
        let mut request = self.client.put(self.url(path)).json(body);
        if let Some(token) = &self.token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(format!(
                "Record store returned {status} for {path}"
            )));
        }
        Ok(())
    }
}

/// Map reqwest transport failures into the error taxonomy
fn map_transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::timeout(format!("Record store request timed out: {e}"))
    } else {
        AppError::network(format!("Record store unreachable: {e}"))
    }
}

/// Week identifiers carry a space (`"W24 2025"`); encode it for URLs
fn encode_week(week_id: &str) -> String {
    week_id.replace(' ', "%20")
}

#[async_trait]
impl StoreDirectory for RecordStoreClient {
    async fn store_params(&self, store_id: &str) -> AppResult<StoreParams> {
        self.get_json(&format!("api/stores/{store_id}")).await
    }
}

#[async_trait]
impl HistoryConfigSource for RecordStoreClient {
    async fn config_for_week(
        &self,
        store_id: &str,
        week_id: &str,
    ) -> AppResult<Option<HistoricalConfig>> {
        self.get_json_opt(&format!(
            "api/stores/{store_id}/history?week={}",
            encode_week(week_id)
        ))
        .await
    }
}

#[async_trait]
impl TrafficSource for RecordStoreClient {
    async fn fetch_day(&self, store_code: &str, date: NaiveDate) -> AppResult<Option<DaySample>> {
        self.get_json_opt(&format!("api/traffic/{store_code}/{date}"))
            .await
    }

    async fn fetch_days(
        &self,
        store_code: &str,
        dates: &[NaiveDate],
    ) -> AppResult<BTreeMap<NaiveDate, DaySample>> {
        let joined = dates
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let samples: Vec<DaySample> = self
            .get_json_opt(&format!("api/traffic/{store_code}?dates={joined}"))
            .await?
            .unwrap_or_default();

        Ok(samples
            .into_iter()
            .map(|sample| (sample.date, sample))
            .collect())
    }
}

#[async_trait]
impl ActivityStore for RecordStoreClient {
    async fn day_assignments(
        &self,
        store_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<ActivityAssignment>> {
        Ok(self
            .get_json_opt(&format!("api/stores/{store_id}/activity/{date}"))
            .await?
            .unwrap_or_default())
    }

    async fn set_slot(
        &self,
        store_id: &str,
        date: NaiveDate,
        update: &SlotUpdate,
    ) -> AppResult<()> {
        self.put_json(&format!("api/stores/{store_id}/activity/{date}"), update)
            .await
    }
}
