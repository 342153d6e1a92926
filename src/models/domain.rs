use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a stored enum value does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Equipment category being recommended
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClubType {
    Driver,
    Wood,
    Hybrid,
    Iron,
    Wedge,
    Putter,
}

impl ClubType {
    pub const ALL: [ClubType; 6] = [
        ClubType::Driver,
        ClubType::Wood,
        ClubType::Hybrid,
        ClubType::Iron,
        ClubType::Wedge,
        ClubType::Putter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClubType::Driver => "driver",
            ClubType::Wood => "wood",
            ClubType::Hybrid => "hybrid",
            ClubType::Iron => "iron",
            ClubType::Wedge => "wedge",
            ClubType::Putter => "putter",
        }
    }
}

impl fmt::Display for ClubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClubType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClubType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "club type",
                value: s.to_string(),
            })
    }
}

/// Recurring shot error a golfer self-reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissTendency {
    Slice,
    Hook,
    Thin,
    Fat,
}

impl MissTendency {
    pub const ALL: [MissTendency; 4] = [
        MissTendency::Slice,
        MissTendency::Hook,
        MissTendency::Thin,
        MissTendency::Fat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MissTendency::Slice => "slice",
            MissTendency::Hook => "hook",
            MissTendency::Thin => "thin",
            MissTendency::Fat => "fat",
        }
    }
}

impl FromStr for MissTendency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MissTendency::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "miss tendency",
                value: s.to_string(),
            })
    }
}

/// Used-equipment quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConditionGrade {
    S,
    A,
    B,
    C,
}

impl ConditionGrade {
    pub const ALL: [ConditionGrade; 4] = [
        ConditionGrade::S,
        ConditionGrade::A,
        ConditionGrade::B,
        ConditionGrade::C,
    ];
}

/// Language used for reasons and display names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

/// Golfer's self-reported profile, built per request
///
/// Every field is optional; the scorer skips terms whose inputs are missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GolferProfile {
    /// Height in centimeters
    #[serde(default)]
    pub height: Option<u16>,
    /// Average strokes per 18 holes
    #[serde(default)]
    pub average_score: Option<u16>,
    /// Swing speed in mph
    #[serde(default)]
    pub swing_speed: Option<u16>,
    #[serde(default)]
    pub miss_tendencies: BTreeSet<MissTendency>,
    #[serde(default)]
    pub budget: Option<u64>,
}

fn default_level() -> u8 { 3 }

/// Catalog entry for a single club model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRecord {
    pub id: String,
    #[serde(default)]
    pub brand_id: Option<String>,
    #[serde(default)]
    pub brand_name: Option<String>,
    pub name: String,
    #[serde(default)]
    pub name_ko: Option<String>,
    pub club_type: ClubType,
    #[serde(default = "default_level")]
    pub forgiveness_level: u8,
    #[serde(default = "default_level")]
    pub distance_level: u8,
    #[serde(default = "default_level")]
    pub control_level: u8,
    #[serde(default = "default_level")]
    pub feel_level: u8,
    #[serde(default)]
    pub miss_tendency_fix: BTreeSet<MissTendency>,
    #[serde(default)]
    pub recommended_swing_speed_min: Option<u16>,
    #[serde(default)]
    pub recommended_swing_speed_max: Option<u16>,
    #[serde(default)]
    pub recommended_handicap_min: Option<u16>,
    #[serde(default)]
    pub recommended_handicap_max: Option<u16>,
    #[serde(default)]
    pub release_price: Option<u64>,
    #[serde(default)]
    pub current_price: Option<u64>,
    #[serde(default)]
    pub used_price_guide: BTreeMap<ConditionGrade, u64>,
}

impl ClubRecord {
    /// Name shown to the user, preferring the Korean name for `Locale::Ko`
    pub fn display_name(&self, locale: Locale) -> &str {
        match (locale, self.name_ko.as_deref()) {
            (Locale::Ko, Some(name)) if !name.is_empty() => name,
            _ => &self.name,
        }
    }

    /// Price used for budget comparisons: current price, else release price
    pub fn reference_price(&self) -> Option<u64> {
        self.current_price.or(self.release_price)
    }
}

/// Candidate clubs grouped by club type
pub type Catalog = BTreeMap<ClubType, Vec<ClubRecord>>;

/// Scored candidate, built fresh per call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubRecommendation {
    pub club: ClubRecord,
    pub score: f64,
    /// Every material reason, most salient first
    pub reasons: Vec<String>,
}

impl ClubRecommendation {
    pub fn top_reasons(&self, count: usize) -> &[String] {
        &self.reasons[..self.reasons.len().min(count)]
    }
}

/// Ranked recommendations per requested club type
pub type Recommendations = BTreeMap<ClubType, Vec<ClubRecommendation>>;

/// Tunable scoring parameters
///
/// Bonuses and penalties are in score points on the 0-100 scale. The
/// default bonuses sum to 48, so a club that fits on every term stays
/// below the ceiling and strong candidates keep distinct scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    pub base_score: f64,

    pub swing_in_range_bonus: f64,
    pub swing_near_bonus: f64,
    pub swing_near_margin_mph: f64,
    pub swing_far_penalty: f64,

    /// Height that receives no swing-speed adjustment
    pub height_reference_cm: f64,
    /// Estimated mph gained per centimeter above the reference height
    pub height_speed_factor: f64,
    pub height_speed_cap_mph: f64,

    /// Course par used to turn an average score into a handicap
    pub par: f64,
    pub max_handicap: f64,
    pub handicap_max_bonus: f64,

    pub alignment_weight: f64,
    /// Average score at and above which forgiveness fully dominates
    pub beginner_score: f64,
    /// Average score at and below which control fully dominates
    pub advanced_score: f64,

    pub miss_fix_bonus: f64,
    pub miss_fix_decay: f64,
    pub miss_fix_cap: f64,

    pub budget_fit_bonus: f64,
    /// Fraction over budget at which the budget term reaches zero
    pub budget_tolerance: f64,
    pub budget_max_penalty: f64,

    /// Minimum contribution that earns a reason
    pub materiality_threshold: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            base_score: 50.0,
            swing_in_range_bonus: 10.0,
            swing_near_bonus: 5.0,
            swing_near_margin_mph: 5.0,
            swing_far_penalty: 5.0,
            height_reference_cm: 170.0,
            height_speed_factor: 0.3,
            height_speed_cap_mph: 6.0,
            par: 72.0,
            max_handicap: 54.0,
            handicap_max_bonus: 10.0,
            alignment_weight: 10.0,
            beginner_score: 100.0,
            advanced_score: 80.0,
            miss_fix_bonus: 7.0,
            miss_fix_decay: 0.5,
            miss_fix_cap: 10.0,
            budget_fit_bonus: 8.0,
            budget_tolerance: 0.2,
            budget_max_penalty: 10.0,
            materiality_threshold: 3.0,
        }
    }
}
