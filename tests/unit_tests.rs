// Unit tests for Clubfit

use clubfit::core::{
    estimation::{estimate_swing_speed, handicap_from_average_score, skill_band, SkillBand},
    pricing::{estimate_used_price, resolved_price_guide},
    reasons::{format_price, ReasonKind},
    scoring::score_club,
};
use clubfit::models::{ClubRecord, ClubType, ConditionGrade, GolferProfile, Locale, MissTendency, RecommendRequest, ScoringParams};
use std::collections::{BTreeMap, BTreeSet};

fn create_club() -> ClubRecord {
    ClubRecord {
        id: "c1".to_string(),
        brand_id: None,
        brand_name: None,
        name: "Test Iron".to_string(),
        name_ko: Some("테스트 아이언".to_string()),
        club_type: ClubType::Iron,
        forgiveness_level: 4,
        distance_level: 3,
        control_level: 2,
        feel_level: 3,
        miss_tendency_fix: BTreeSet::new(),
        recommended_swing_speed_min: Some(80),
        recommended_swing_speed_max: Some(95),
        recommended_handicap_min: Some(10),
        recommended_handicap_max: Some(30),
        release_price: Some(1200000),
        current_price: Some(980000),
        used_price_guide: BTreeMap::new(),
    }
}

#[test]
fn test_handicap_from_scratch_score() {
    let params = ScoringParams::default();
    assert_eq!(handicap_from_average_score(72, &params), 0.0);
    assert_eq!(handicap_from_average_score(90, &params), 18.0);
}

#[test]
fn test_estimated_speed_for_typical_amateur() {
    let params = ScoringParams::default();
    let profile = GolferProfile {
        average_score: Some(90),
        height: Some(170),
        ..Default::default()
    };

    assert_eq!(estimate_swing_speed(&profile, &params), Some(88.0));
}

#[test]
fn test_skill_band_boundaries() {
    let params = ScoringParams::default();
    assert_eq!(skill_band(80, &params), SkillBand::Advanced);
    assert_eq!(skill_band(81, &params), SkillBand::Intermediate);
    assert_eq!(skill_band(100, &params), SkillBand::Beginner);
}

#[test]
fn test_swing_speed_match_adds_reason() {
    let params = ScoringParams::default();
    let profile = GolferProfile {
        swing_speed: Some(90),
        ..Default::default()
    };

    let breakdown = score_club(&profile, &create_club(), &params);
    let reasons = breakdown.reasons(&params, Locale::Ko);

    assert_eq!(breakdown.score, params.base_score + params.swing_in_range_bonus);
    assert_eq!(reasons, vec!["적합한 스윙 스피드 (90mph)".to_string()]);
}

#[test]
fn test_far_outside_speed_is_penalised_without_reason() {
    let params = ScoringParams::default();
    let profile = GolferProfile {
        swing_speed: Some(120),
        ..Default::default()
    };

    let breakdown = score_club(&profile, &create_club(), &params);

    assert!(breakdown.score < params.base_score);
    assert!(breakdown.reasons(&params, Locale::En).is_empty());
}

#[test]
fn test_missing_fields_never_fail() {
    let params = ScoringParams::default();
    let mut club = create_club();
    club.recommended_swing_speed_min = None;
    club.recommended_swing_speed_max = None;
    club.recommended_handicap_min = None;
    club.recommended_handicap_max = None;
    club.current_price = None;
    club.release_price = None;

    let profile = GolferProfile {
        miss_tendencies: [MissTendency::Thin].into_iter().collect(),
        budget: Some(100000),
        ..Default::default()
    };

    assert_eq!(score_club(&profile, &club, &params).score, params.base_score);
}

#[test]
fn test_used_price_estimates() {
    let mut club = create_club();
    club.used_price_guide.insert(ConditionGrade::S, 1000000);

    assert_eq!(estimate_used_price(&club, ConditionGrade::S), Some(1000000));
    assert_eq!(estimate_used_price(&club, ConditionGrade::C), Some(480000));
    assert_eq!(resolved_price_guide(&club).len(), 4);
}

#[test]
fn test_reason_rendering() {
    assert_eq!(format_price(1000000), "1,000,000");
    assert_eq!(
        ReasonKind::WithinBudget { price: 499000 }.render(Locale::Ko),
        "예산 내 가격 (499,000원)"
    );
    assert_eq!(
        ReasonKind::HandicapMatch { handicap: 28 }.render(Locale::En),
        "Suited to a 28 handicap"
    );
}

#[test]
fn test_request_builds_profile() {
    let req: RecommendRequest = serde_json::from_str(
        r#"{"height": 180, "averageScore": 95, "swingSpeed": 98, "missTendencies": ["hook"], "budget": 700000}"#,
    )
    .unwrap();
    let profile = req.to_profile();

    assert_eq!(profile.height, Some(180));
    assert_eq!(profile.swing_speed, Some(98));
    assert!(profile.miss_tendencies.contains(&MissTendency::Hook));
    assert_eq!(profile.budget, Some(700000));
}

#[test]
fn test_display_name_locale() {
    let club = create_club();
    assert_eq!(club.display_name(Locale::Ko), "테스트 아이언");
    assert_eq!(club.display_name(Locale::En), "Test Iron");
}
