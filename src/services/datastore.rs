use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::models::{CandidateProfile, JobPosting, JobRecord, ProfileRecord};

/// Errors that can occur when interacting with the data store
#[derive(Debug, Error)]
pub enum DataStoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Table names in the data store
#[derive(Debug, Clone)]
pub struct DataStoreTables {
    pub jobs: String,
    pub profiles: String,
}

/// REST client for the external data store
///
/// Handles the reads the job feed needs:
/// - Fetching a candidate profile
/// - Listing recent job postings
/// - Probing availability for health checks
pub struct DataStoreClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: DataStoreTables,
}

impl DataStoreClient {
    /// Create a new data store client
    pub fn new(
        base_url: String,
        api_key: String,
        tables: DataStoreTables,
        timeout: Duration,
    ) -> Result<Self, DataStoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
            tables,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    async fn get_rows(&self, url: &str) -> Result<Vec<Value>, DataStoreError> {
        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DataStoreError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(DataStoreError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response.json().await?;
        match json {
            Value::Array(rows) => Ok(rows),
            _ => Err(DataStoreError::InvalidResponse("Expected an array of rows".into())),
        }
    }

    /// Fetch the profile of a candidate, `None` when the user has no profile row
    pub async fn get_candidate_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<CandidateProfile>, DataStoreError> {
        let url = format!(
            "{}?select=*&id=eq.{}&limit=1",
            self.table_url(&self.tables.profiles),
            urlencoding::encode(user_id)
        );

        tracing::debug!("Fetching profile for user: {}", user_id);

        let rows = self.get_rows(&url).await?;
        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };

        let record: ProfileRecord = serde_json::from_value(row).map_err(|e| {
            DataStoreError::InvalidResponse(format!("Failed to parse profile: {}", e))
        })?;

        Ok(Some(record.into()))
    }

    /// List the most recent job postings
    ///
    /// Rows that cannot be parsed are skipped.
    pub async fn list_jobs(&self, limit: usize) -> Result<Vec<JobPosting>, DataStoreError> {
        let url = format!(
            "{}?select=*&order=created_at.desc&limit={}",
            self.table_url(&self.tables.jobs),
            limit
        );

        let rows = self.get_rows(&url).await?;
        let total = rows.len();

        let jobs: Vec<JobPosting> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<JobRecord>(row) {
                Ok(record) => Some(record.into()),
                Err(e) => {
                    tracing::warn!("Skipping malformed job row: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Listed {} jobs ({} rows)", jobs.len(), total);

        Ok(jobs)
    }

    /// Health check for the data store connection
    pub async fn health_check(&self) -> Result<bool, DataStoreError> {
        let url = format!("{}?select=id&limit=1", self.table_url(&self.tables.jobs));
        self.get_rows(&url).await.map(|_| true)
    }
}
