use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::core::estimation::SkillBand;
use crate::models::domain::{ClubRecommendation, ClubType, ConditionGrade, Locale};

/// Single recommended club as shown to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView {
    pub club_id: String,
    pub name: String,
    pub brand_name: Option<String>,
    pub club_type: ClubType,
    pub score: f64,
    pub reasons: Vec<String>,
    pub current_price: Option<u64>,
    pub release_price: Option<u64>,
    pub used_price_guide: BTreeMap<ConditionGrade, u64>,
}

impl RecommendationView {
    /// Build the view, keeping at most `max_reasons` reasons and rounding the
    /// score to one decimal.
    pub fn from_recommendation(rec: &ClubRecommendation, locale: Locale, max_reasons: usize) -> Self {
        Self {
            club_id: rec.club.id.clone(),
            name: rec.club.display_name(locale).to_string(),
            brand_name: rec.club.brand_name.clone(),
            club_type: rec.club.club_type,
            score: (rec.score * 10.0).round() / 10.0,
            reasons: rec.top_reasons(max_reasons).to_vec(),
            current_price: rec.club.current_price,
            release_price: rec.club.release_price,
            used_price_guide: crate::core::pricing::resolved_price_guide(&rec.club),
        }
    }
}

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub request_id: String,
    pub locale: Locale,
    pub estimated_swing_speed: Option<u16>,
    pub handicap: Option<u16>,
    pub skill_band: Option<SkillBand>,
    pub recommendations: BTreeMap<ClubType, Vec<RecommendationView>>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the used-price endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsedPriceResponse {
    pub club_id: String,
    pub guide: BTreeMap<ConditionGrade, u64>,
}

/// Response for the catalog cache invalidation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidateResponse {
    pub success: bool,
    pub invalidated_at: chrono::DateTime<chrono::Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
