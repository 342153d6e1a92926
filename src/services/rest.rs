use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;
use crate::models::{Catalog, ClubRecord, ClubType};
use crate::services::catalog::{group_by_type, CatalogError, CatalogProvider};
use crate::services::postgres::{parse_price_guide, parse_tendencies};

/// Errors that can occur when interacting with the hosted REST catalog
#[derive(Debug, Error)]
pub enum RestError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the backend-as-a-service REST interface
///
/// Talks to a PostgREST-style endpoint (`/rest/v1/<table>`) exposing the
/// same `clubs` table the Postgres catalog reads, with the brand embedded.
pub struct RestCatalogClient {
    base_url: String,
    api_key: String,
    table: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct BrandRow {
    name: Option<String>,
}

/// Row shape returned by the REST interface
#[derive(Debug, Deserialize)]
struct ClubRow {
    id: String,
    brand_id: Option<String>,
    #[serde(default)]
    brands: Option<BrandRow>,
    name: String,
    name_ko: Option<String>,
    club_type: String,
    forgiveness_level: Option<i16>,
    distance_level: Option<i16>,
    control_level: Option<i16>,
    feel_level: Option<i16>,
    #[serde(default)]
    miss_tendency_fix: Option<Vec<String>>,
    recommended_swing_speed_min: Option<i32>,
    recommended_swing_speed_max: Option<i32>,
    recommended_handicap_min: Option<i32>,
    recommended_handicap_max: Option<i32>,
    release_price: Option<i64>,
    current_price: Option<i64>,
    #[serde(default)]
    used_price_guide: Option<serde_json::Value>,
}

impl ClubRow {
    fn into_record(self) -> Result<ClubRecord, RestError> {
        let club_type = self
            .club_type
            .parse::<ClubType>()
            .map_err(|e| RestError::InvalidResponse(format!("club {}: {}", self.id, e)))?;

        let level = |v: Option<i16>| v.unwrap_or(3).clamp(1, 5) as u8;
        let small = |v: Option<i32>| v.and_then(|x| u16::try_from(x).ok());
        let price = |v: Option<i64>| v.and_then(|x| u64::try_from(x).ok());

        Ok(ClubRecord {
            miss_tendency_fix: parse_tendencies(&self.id, self.miss_tendency_fix.unwrap_or_default()),
            used_price_guide: parse_price_guide(&self.id, self.used_price_guide),
            brand_id: self.brand_id,
            brand_name: self.brands.and_then(|b| b.name),
            name: self.name,
            name_ko: self.name_ko,
            club_type,
            forgiveness_level: level(self.forgiveness_level),
            distance_level: level(self.distance_level),
            control_level: level(self.control_level),
            feel_level: level(self.feel_level),
            recommended_swing_speed_min: small(self.recommended_swing_speed_min),
            recommended_swing_speed_max: small(self.recommended_swing_speed_max),
            recommended_handicap_min: small(self.recommended_handicap_min),
            recommended_handicap_max: small(self.recommended_handicap_max),
            release_price: price(self.release_price),
            current_price: price(self.current_price),
            id: self.id,
        })
    }
}

impl RestCatalogClient {
    /// Create a new REST catalog client
    pub fn new(
        base_url: String,
        api_key: String,
        table: String,
        timeout_secs: u64,
    ) -> Result<Self, RestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            table,
            client,
        })
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }

    /// Fetch active clubs of the given types, ordered by id
    pub async fn fetch_clubs(&self, types: &BTreeSet<ClubType>) -> Result<Vec<ClubRecord>, RestError> {
        let type_filter = types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let url = format!(
            "{}?select={}&is_active=eq.true&club_type={}&order=id.asc",
            self.table_url(),
            urlencoding::encode("*,brands(name)"),
            urlencoding::encode(&format!("in.({})", type_filter)),
        );

        tracing::debug!("Fetching clubs from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RestError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch clubs: {} - {}", status, body);
            return Err(RestError::ApiError(format!("Failed to fetch clubs: {}", status)));
        }

        let json: serde_json::Value = response.json().await?;

        let rows = json
            .as_array()
            .ok_or_else(|| RestError::InvalidResponse("Expected an array of rows".into()))?;

        let clubs: Vec<ClubRecord> = rows
            .iter()
            .filter_map(|row| {
                let parsed = serde_json::from_value::<ClubRow>(row.clone())
                    .map_err(|e| RestError::InvalidResponse(e.to_string()))
                    .and_then(ClubRow::into_record);
                match parsed {
                    Ok(club) => Some(club),
                    Err(e) => {
                        tracing::warn!("Skipping unreadable club row: {}", e);
                        None
                    }
                }
            })
            .collect();

        tracing::debug!("Fetched {} clubs (rows: {})", clubs.len(), rows.len());

        Ok(clubs)
    }

    /// Whether the REST endpoint answers
    pub async fn ping(&self) -> Result<bool, RestError> {
        let url = format!("{}?select=id&limit=1", self.table_url());
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

#[async_trait]
impl CatalogProvider for RestCatalogClient {
    async fn fetch_by_type(&self, types: &BTreeSet<ClubType>) -> Result<Catalog, CatalogError> {
        let clubs = self.fetch_clubs(types).await?;
        Ok(group_by_type(types, clubs))
    }

    async fn health_check(&self) -> bool {
        self.ping().await.unwrap_or(false)
    }
}
