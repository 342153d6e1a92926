use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use thiserror::Error;
use crate::models::{Catalog, ClubRecord, ClubType, ConditionGrade, MissTendency};
use crate::services::catalog::{group_by_type, CatalogError, CatalogProvider};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// PostgreSQL-backed club catalog
///
/// Reads the `clubs` table joined with `brands`. Only rows flagged
/// `is_active` are returned.
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Create a new catalog from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new catalog from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL catalog");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Fetch active clubs of the given types, ordered by id
    pub async fn fetch_clubs(&self, types: &BTreeSet<ClubType>) -> Result<Vec<ClubRecord>, PostgresError> {
        let query = r#"
            SELECT
                c.id, c.brand_id, b.name AS brand_name, c.name, c.name_ko, c.club_type,
                c.forgiveness_level, c.distance_level, c.control_level, c.feel_level,
                c.miss_tendency_fix,
                c.recommended_swing_speed_min, c.recommended_swing_speed_max,
                c.recommended_handicap_min, c.recommended_handicap_max,
                c.release_price, c.current_price, c.used_price_guide
            FROM clubs c
            LEFT JOIN brands b ON b.id = c.brand_id
            WHERE c.is_active = TRUE AND c.club_type = ANY($1)
            ORDER BY c.id
        "#;

        let type_names: Vec<String> = types.iter().map(|t| t.as_str().to_string()).collect();

        let rows = sqlx::query(query)
            .bind(&type_names)
            .fetch_all(&self.pool)
            .await?;

        let clubs = skip_unreadable(rows.iter().map(club_from_row));

        tracing::debug!(
            "Loaded {} clubs for types {:?} (rows: {})",
            clubs.len(),
            type_names,
            rows.len()
        );

        Ok(clubs)
    }

    /// Health check for the database connection
    pub async fn ping(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl CatalogProvider for PostgresCatalog {
    async fn fetch_by_type(&self, types: &BTreeSet<ClubType>) -> Result<Catalog, CatalogError> {
        let clubs = self.fetch_clubs(types).await?;
        Ok(group_by_type(types, clubs))
    }

    async fn health_check(&self) -> bool {
        self.ping().await.unwrap_or(false)
    }
}

/// Keep the rows that decoded, logging and dropping the rest
fn skip_unreadable<I>(rows: I) -> Vec<ClubRecord>
where
    I: IntoIterator<Item = Result<ClubRecord, PostgresError>>,
{
    rows.into_iter()
        .filter_map(|row| match row {
            Ok(club) => Some(club),
            Err(e) => {
                tracing::warn!("Skipping unreadable club row: {}", e);
                None
            }
        })
        .collect()
}

fn parse_club_type(club_id: &str, value: &str) -> Result<ClubType, PostgresError> {
    value
        .parse::<ClubType>()
        .map_err(|e| PostgresError::InvalidRecord(format!("club {}: {}", club_id, e)))
}

fn club_from_row(row: &PgRow) -> Result<ClubRecord, PostgresError> {
    let id: String = row.try_get("id")?;
    let club_type: String = row.try_get("club_type")?;
    let club_type = parse_club_type(&id, &club_type)?;

    let fixes: Option<Vec<String>> = row.try_get("miss_tendency_fix")?;
    let guide: Option<serde_json::Value> = row.try_get("used_price_guide")?;

    Ok(ClubRecord {
        brand_id: row.try_get("brand_id")?,
        brand_name: row.try_get("brand_name")?,
        name: row.try_get("name")?,
        name_ko: row.try_get("name_ko")?,
        club_type,
        forgiveness_level: level(row.try_get("forgiveness_level")?),
        distance_level: level(row.try_get("distance_level")?),
        control_level: level(row.try_get("control_level")?),
        feel_level: level(row.try_get("feel_level")?),
        miss_tendency_fix: parse_tendencies(&id, fixes.unwrap_or_default()),
        recommended_swing_speed_min: small(row.try_get("recommended_swing_speed_min")?),
        recommended_swing_speed_max: small(row.try_get("recommended_swing_speed_max")?),
        recommended_handicap_min: small(row.try_get("recommended_handicap_min")?),
        recommended_handicap_max: small(row.try_get("recommended_handicap_max")?),
        release_price: price(row.try_get("release_price")?),
        current_price: price(row.try_get("current_price")?),
        used_price_guide: parse_price_guide(&id, guide),
        id,
    })
}

#[inline]
fn level(value: i16) -> u8 {
    value.clamp(1, 5) as u8
}

#[inline]
fn small(value: Option<i32>) -> Option<u16> {
    value.and_then(|v| u16::try_from(v).ok())
}

#[inline]
fn price(value: Option<i64>) -> Option<u64> {
    value.and_then(|v| u64::try_from(v).ok())
}

/// Parse stored tendency names, skipping any that are not recognised
pub(crate) fn parse_tendencies(club_id: &str, values: Vec<String>) -> BTreeSet<MissTendency> {
    values
        .iter()
        .filter_map(|v| match v.parse::<MissTendency>() {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::warn!("Skipping miss tendency on club {}: {}", club_id, e);
                None
            }
        })
        .collect()
}

/// Parse a `{ "S": 300000, ... }` guide; an unreadable guide is treated as empty
pub(crate) fn parse_price_guide(club_id: &str, value: Option<serde_json::Value>) -> BTreeMap<ConditionGrade, u64> {
    match value {
        None | Some(serde_json::Value::Null) => BTreeMap::new(),
        Some(v) => serde_json::from_value(v).unwrap_or_else(|e| {
            tracing::warn!("Ignoring used price guide on club {}: {}", club_id, e);
            BTreeMap::new()
        }),
    }
}
