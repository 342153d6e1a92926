use crate::core::scoring::{score_with_signals, ProfileSignals};
use crate::models::{Catalog, ClubRecommendation, ClubRecord, GolferProfile, Locale, Recommendations, ScoringParams};

/// Recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Derive profile signals (swing speed, handicap, skill weighting) once
/// 2. Score every candidate of every requested club type
/// 3. Render reasons in the requested locale
/// 4. Rank by score, then id
///
/// Holds only its parameters, so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Recommender {
    params: ScoringParams,
}

impl Recommender {
    pub fn new(params: ScoringParams) -> Self {
        Self { params }
    }

    pub fn with_default_params() -> Self {
        Self {
            params: ScoringParams::default(),
        }
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Score and rank every club in the catalog for a golfer
    ///
    /// The result has exactly the catalog's keys, and each list holds every
    /// candidate of that type. Nothing is filtered or truncated here; callers
    /// decide how many clubs and reasons to show.
    pub fn recommend(&self, profile: &GolferProfile, catalog: &Catalog, locale: Locale) -> Recommendations {
        let signals = ProfileSignals::from_profile(profile, &self.params);

        catalog
            .iter()
            .map(|(club_type, clubs)| {
                let ranked = self.rank(&signals, profile, clubs, locale);
                (*club_type, ranked)
            })
            .collect()
    }

    fn rank(
        &self,
        signals: &ProfileSignals,
        profile: &GolferProfile,
        clubs: &[ClubRecord],
        locale: Locale,
    ) -> Vec<ClubRecommendation> {
        let mut scored: Vec<ClubRecommendation> = clubs
            .iter()
            .map(|club| {
                let breakdown = score_with_signals(signals, profile, club, &self.params);
                ClubRecommendation {
                    reasons: breakdown.reasons(&self.params, locale),
                    score: breakdown.score,
                    club: club.clone(),
                }
            })
            .collect();

        // Sort by score (descending) and then by id (ascending)
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.club.id.cmp(&b.club.id))
        });

        scored
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_params()
    }
}

/// Score a catalog with the given parameters
pub fn recommend(
    profile: &GolferProfile,
    catalog: &Catalog,
    params: &ScoringParams,
    locale: Locale,
) -> Recommendations {
    Recommender::new(*params).recommend(profile, catalog, locale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClubType, MissTendency};
    use std::collections::{BTreeMap, BTreeSet};

    fn create_club(id: &str, club_type: ClubType, forgiveness: u8) -> ClubRecord {
        ClubRecord {
            id: id.to_string(),
            brand_id: Some("brand-1".to_string()),
            brand_name: Some("Brand".to_string()),
            name: format!("Club {}", id),
            name_ko: None,
            club_type,
            forgiveness_level: forgiveness,
            distance_level: 3,
            control_level: 3,
            feel_level: 3,
            miss_tendency_fix: BTreeSet::new(),
            recommended_swing_speed_min: None,
            recommended_swing_speed_max: None,
            recommended_handicap_min: None,
            recommended_handicap_max: None,
            release_price: None,
            current_price: None,
            used_price_guide: BTreeMap::new(),
        }
    }

    fn create_profile() -> GolferProfile {
        GolferProfile {
            height: Some(175),
            average_score: Some(100),
            swing_speed: None,
            miss_tendencies: BTreeSet::new(),
            budget: Some(500000),
        }
    }

    #[test]
    fn test_keeps_catalog_keys() {
        let recommender = Recommender::with_default_params();
        let mut catalog = Catalog::new();
        catalog.insert(ClubType::Driver, vec![create_club("d1", ClubType::Driver, 4)]);
        catalog.insert(ClubType::Iron, vec![]);

        let result = recommender.recommend(&create_profile(), &catalog, Locale::Ko);

        assert_eq!(result.len(), 2);
        assert_eq!(result[&ClubType::Driver].len(), 1);
        assert!(result[&ClubType::Iron].is_empty());
        assert!(!result.contains_key(&ClubType::Putter));
    }

    #[test]
    fn test_sorted_by_score_then_id() {
        let recommender = Recommender::with_default_params();
        let mut catalog = Catalog::new();
        catalog.insert(
            ClubType::Driver,
            vec![
                create_club("c", ClubType::Driver, 3),
                create_club("b", ClubType::Driver, 5),
                create_club("a", ClubType::Driver, 3),
            ],
        );

        let result = recommender.recommend(&create_profile(), &catalog, Locale::Ko);
        let ids: Vec<&str> = result[&ClubType::Driver]
            .iter()
            .map(|r| r.club.id.as_str())
            .collect();

        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_returns_every_material_reason() {
        let recommender = Recommender::with_default_params();
        let mut profile = create_profile();
        profile.miss_tendencies.insert(MissTendency::Slice);

        let mut driver = create_club("d1", ClubType::Driver, 5);
        driver.miss_tendency_fix.insert(MissTendency::Slice);
        driver.recommended_swing_speed_min = Some(70);
        driver.recommended_swing_speed_max = Some(95);
        driver.recommended_handicap_min = Some(18);
        driver.recommended_handicap_max = Some(38);
        driver.current_price = Some(400000);

        let mut catalog = Catalog::new();
        catalog.insert(ClubType::Driver, vec![driver]);

        let result = recommender.recommend(&profile, &catalog, Locale::En);
        let rec = &result[&ClubType::Driver][0];

        // swing, handicap and forgiveness tie at 10 and keep evaluation order
        assert_eq!(rec.reasons.len(), 5);
        assert!(rec.reasons[0].contains("swing speed"));
        assert!(rec.reasons[1].contains("handicap"));
        assert!(rec.reasons[2].contains("forgiveness"));
        assert!(rec.reasons[3].contains("budget"));
        assert!(rec.reasons[4].contains("slice"));

        assert_eq!(rec.top_reasons(3), &rec.reasons[..3]);
        assert_eq!(rec.top_reasons(10).len(), 5);
    }

    #[test]
    fn test_miss_tendency_lifts_matching_club() {
        let recommender = Recommender::with_default_params();
        let mut profile = create_profile();
        profile.miss_tendencies.insert(MissTendency::Hook);

        let plain = create_club("a", ClubType::Iron, 3);
        let mut fixer = create_club("b", ClubType::Iron, 3);
        fixer.miss_tendency_fix.insert(MissTendency::Hook);

        let mut catalog = Catalog::new();
        catalog.insert(ClubType::Iron, vec![plain, fixer]);

        let result = recommender.recommend(&profile, &catalog, Locale::Ko);
        let irons = &result[&ClubType::Iron];

        assert_eq!(irons[0].club.id, "b");
        assert!(irons[0].reasons.iter().any(|r| r.contains("훅")));
    }

    #[test]
    fn test_free_function_matches_recommender() {
        let params = ScoringParams::default();
        let mut catalog = Catalog::new();
        catalog.insert(ClubType::Wedge, vec![create_club("w1", ClubType::Wedge, 4)]);

        let a = recommend(&create_profile(), &catalog, &params, Locale::En);
        let b = Recommender::new(params).recommend(&create_profile(), &catalog, Locale::En);
        assert_eq!(a, b);
    }
}
