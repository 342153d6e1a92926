use serde::{Deserialize, Serialize};
use crate::models::{GolferProfile, ScoringParams};

/// Estimated driver swing speed (mph) by average-score ceiling.
/// Lower scores map to higher speeds; the last band catches everything above.
const SPEED_BANDS: [(u16, f64); 6] = [
    (75, 105.0),
    (85, 95.0),
    (95, 88.0),
    (105, 80.0),
    (115, 73.0),
    (u16::MAX, 65.0),
];

/// Coarse skill tier derived from average score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillBand {
    Beginner,
    Intermediate,
    Advanced,
}

/// Convert an average 18-hole score into a handicap-like value
#[inline]
pub fn handicap_from_average_score(average_score: u16, params: &ScoringParams) -> f64 {
    (average_score as f64 - params.par).clamp(0.0, params.max_handicap)
}

pub fn skill_band(average_score: u16, params: &ScoringParams) -> SkillBand {
    let score = average_score as f64;
    if score >= params.beginner_score {
        SkillBand::Beginner
    } else if score <= params.advanced_score {
        SkillBand::Advanced
    } else {
        SkillBand::Intermediate
    }
}

/// Weight (0-1) given to forgiveness over control
///
/// Smoothstep between the advanced and beginner scores, so moving between
/// bands never produces a jump.
pub fn beginner_weight(average_score: u16, params: &ScoringParams) -> f64 {
    let span = params.beginner_score - params.advanced_score;
    if span <= 0.0 {
        return if (average_score as f64) >= params.beginner_score { 1.0 } else { 0.0 };
    }

    let t = ((average_score as f64 - params.advanced_score) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Estimate swing speed (mph) from average score, nudged by height
///
/// Returns `None` without an average score; height alone is too weak a signal.
pub fn estimate_swing_speed(profile: &GolferProfile, params: &ScoringParams) -> Option<f64> {
    let average_score = profile.average_score?;

    let base = SPEED_BANDS
        .iter()
        .find(|(ceiling, _)| average_score <= *ceiling)
        .map(|(_, speed)| *speed)
        .unwrap_or(SPEED_BANDS[SPEED_BANDS.len() - 1].1);

    let height_adjustment = profile
        .height
        .map(|h| {
            ((h as f64 - params.height_reference_cm) * params.height_speed_factor)
                .clamp(-params.height_speed_cap_mph, params.height_speed_cap_mph)
        })
        .unwrap_or(0.0);

    Some(base + height_adjustment)
}

/// Reported swing speed when present, otherwise the estimate
pub fn effective_swing_speed(profile: &GolferProfile, params: &ScoringParams) -> Option<f64> {
    profile
        .swing_speed
        .map(f64::from)
        .or_else(|| estimate_swing_speed(profile, params))
}
