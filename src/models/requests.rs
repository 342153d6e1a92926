use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;
use crate::models::domain::{ClubRecord, ClubType, GolferProfile, Locale, MissTendency};
use crate::models::units::{Speed, SpeedUnit};

/// Request to recommend clubs for a golfer
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[validate(range(min = 140, max = 210))]
    #[serde(default)]
    pub height: Option<u16>,
    #[validate(range(min = 60, max = 150))]
    #[serde(default)]
    pub average_score: Option<u16>,
    #[validate(range(min = 1.0, max = 200.0))]
    #[serde(default)]
    pub swing_speed: Option<f64>,
    #[serde(default)]
    pub swing_speed_unit: SpeedUnit,
    #[serde(default)]
    pub miss_tendencies: Vec<MissTendency>,
    #[serde(default)]
    pub budget: Option<u64>,
    /// Club types to recommend; empty means all of them
    #[serde(default)]
    pub club_types: Vec<ClubType>,
    #[serde(default)]
    pub locale: Option<Locale>,
    #[validate(range(min = 1, max = 10))]
    #[serde(default)]
    pub max_reasons: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    #[serde(default)]
    pub limit_per_type: Option<usize>,
}

impl RecommendRequest {
    /// Typed profile with swing speed converted to mph
    pub fn to_profile(&self) -> GolferProfile {
        GolferProfile {
            height: self.height,
            average_score: self.average_score,
            swing_speed: self
                .swing_speed
                .map(|value| Speed::new(value, self.swing_speed_unit).whole_mph()),
            miss_tendencies: self.miss_tendencies.iter().copied().collect(),
            budget: self.budget,
        }
    }

    pub fn requested_types(&self) -> BTreeSet<ClubType> {
        if self.club_types.is_empty() {
            ClubType::ALL.into_iter().collect()
        } else {
            self.club_types.iter().copied().collect()
        }
    }
}

/// Request for the resolved used-price guide of a club
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsedPriceRequest {
    pub club: ClubRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_valid() {
        let req: RecommendRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.to_profile(), GolferProfile::default());
        assert_eq!(req.requested_types().len(), ClubType::ALL.len());
    }

    #[test]
    fn test_out_of_range_height_rejected() {
        let req: RecommendRequest = serde_json::from_str(r#"{"height": 250}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_swing_speed_converted_at_boundary() {
        let req: RecommendRequest =
            serde_json::from_str(r#"{"swingSpeed": 40, "swingSpeedUnit": "mps"}"#).unwrap();
        assert_eq!(req.to_profile().swing_speed, Some(89));
    }

    #[test]
    fn test_duplicate_tendencies_collapse() {
        let req: RecommendRequest =
            serde_json::from_str(r#"{"missTendencies": ["slice", "slice", "fat"], "clubTypes": ["driver"]}"#)
                .unwrap();
        let profile = req.to_profile();

        assert_eq!(profile.miss_tendencies.len(), 2);
        assert_eq!(req.requested_types().into_iter().collect::<Vec<_>>(), vec![ClubType::Driver]);
    }

    #[test]
    fn test_unknown_tendency_rejected() {
        let parsed = serde_json::from_str::<RecommendRequest>(r#"{"missTendencies": ["shank"]}"#);
        assert!(parsed.is_err());
    }
}
