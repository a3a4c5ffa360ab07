// src/integrations/omdb/client.rs
//
// OMDb API Integration
//
// ARCHITECTURE:
// - Plain HTTP GET client for the OMDb rating catalog
// - Maps external wire data → internal value objects (NO domain mutation)
// - Used by ResolutionService through the CatalogTransport port
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - A "Response": "False" envelope is a miss (Ok(None)/empty), not an error
// - Transport and parse failures are errors; the pipeline downgrades them

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::{Candidate, CatalogRecord, RatingEntry, TitleKind};
use crate::error::{AppError, AppResult};
use crate::integrations::catalog::CatalogTransport;

/// Placeholder key; deployments embed their own.
pub const DEFAULT_API_KEY: &str = "YOUR_OMDB_KEY";

const RESPONSE_SUCCESS: &str = "True";

/// Catalog endpoint configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            base_url: "https://www.omdbapi.com/".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

/// Full-record envelope. OMDb reports misses in-band through the
/// "Response" field rather than via HTTP status.
#[derive(Debug, Deserialize)]
struct RecordPayload {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<RatingPayload>,
}

#[derive(Debug, Deserialize)]
struct RatingPayload {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Value")]
    value: String,
}

/// Search envelope
#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<SearchItemPayload>,
}

#[derive(Debug, Deserialize)]
struct SearchItemPayload {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// OMDb catalog client
pub struct OmdbClient {
    config: CatalogConfig,
    http_client: Client,
}

impl OmdbClient {
    pub fn new(config: CatalogConfig) -> Self {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    async fn execute<T>(&self, mut params: Vec<(&'static str, String)>) -> AppResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        params.push(("apikey", self.config.api_key.clone()));

        let response = self
            .http_client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Catalog(format!(
                "catalog returned status {}",
                response.status()
            )));
        }

        let payload = response.json::<T>().await?;
        Ok(payload)
    }
}

#[async_trait]
impl CatalogTransport for OmdbClient {
    async fn fetch_by_title(
        &self,
        title: &str,
        year: Option<String>,
        kind: Option<TitleKind>,
    ) -> AppResult<Option<CatalogRecord>> {
        let mut params = vec![("t", title.to_string())];
        if let Some(y) = year {
            params.push(("y", y));
        }
        if let Some(k) = kind {
            params.push(("type", k.as_str().to_string()));
        }

        let payload: RecordPayload = self.execute(params).await?;
        Ok(map_record(payload))
    }

    async fn search_by_title(
        &self,
        title: &str,
        kind: Option<TitleKind>,
    ) -> AppResult<Vec<Candidate>> {
        let mut params = vec![("s", title.to_string())];
        if let Some(k) = kind {
            params.push(("type", k.as_str().to_string()));
        }

        let payload: SearchPayload = self.execute(params).await?;
        Ok(map_search(payload))
    }

    async fn fetch_by_id(&self, external_id: &str) -> AppResult<Option<CatalogRecord>> {
        let params = vec![("i", external_id.to_string())];

        let payload: RecordPayload = self.execute(params).await?;
        Ok(map_record(payload))
    }
}

// ============================================================================
// WIRE → VALUE OBJECT MAPPING
// ============================================================================

fn map_record(payload: RecordPayload) -> Option<CatalogRecord> {
    if payload.response != RESPONSE_SUCCESS {
        return None;
    }

    Some(CatalogRecord {
        title: payload.title.unwrap_or_default(),
        year: payload.year,
        kind: payload.kind,
        external_id: payload.imdb_id.unwrap_or_default(),
        primary_rating: payload.imdb_rating,
        ratings: payload
            .ratings
            .into_iter()
            .map(|r| RatingEntry {
                source: r.source,
                value: r.value,
            })
            .collect(),
    })
}

fn map_search(payload: SearchPayload) -> Vec<Candidate> {
    if payload.response != RESPONSE_SUCCESS {
        return Vec::new();
    }

    payload
        .search
        .into_iter()
        .map(|item| Candidate {
            title: item.title.unwrap_or_default(),
            year: item.year,
            kind: item.kind,
            external_id: item.imdb_id.unwrap_or_default(),
        })
        .collect()
}
