use crate::core::estimation::{beginner_weight, effective_swing_speed, handicap_from_average_score};
use crate::core::reasons::ReasonKind;
use crate::models::{ClubRecord, GolferProfile, Locale, ScoringParams};

/// One scoring term's effect on a club's score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub kind: ReasonKind,
    pub value: f64,
}

/// Final score plus the terms that produced it, in evaluation order
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub contributions: Vec<Contribution>,
}

impl ScoreBreakdown {
    /// Localized reasons for every positive term above the materiality
    /// threshold, largest first. Equal contributions keep evaluation order.
    pub fn reasons(&self, params: &ScoringParams, locale: Locale) -> Vec<String> {
        let mut material: Vec<&Contribution> = self
            .contributions
            .iter()
            .filter(|c| c.value > 0.0 && c.value >= params.materiality_threshold)
            .collect();

        material.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        material.into_iter().map(|c| c.kind.render(locale)).collect()
    }
}

/// Profile-derived inputs shared by every club in one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSignals {
    pub swing_speed: Option<f64>,
    pub handicap: Option<f64>,
    pub beginner_weight: Option<f64>,
}

impl ProfileSignals {
    pub fn from_profile(profile: &GolferProfile, params: &ScoringParams) -> Self {
        Self {
            swing_speed: effective_swing_speed(profile, params),
            handicap: profile
                .average_score
                .map(|s| handicap_from_average_score(s, params)),
            beginner_weight: profile.average_score.map(|s| beginner_weight(s, params)),
        }
    }
}

/// Score a single club (0-100) for a golfer
///
/// Scoring formula:
/// score = clamp(
///     base
///     + swing_speed_fit       # in range, near, or far outside the club's range
///     + handicap_fit          # centrality within the club's handicap range
///     + forgiveness/control   # blended by how beginner-like the average score is
///     + miss_tendency_fixes   # diminishing, capped
///     + budget_fit            # peaks at or under budget
/// )
pub fn score_club(profile: &GolferProfile, club: &ClubRecord, params: &ScoringParams) -> ScoreBreakdown {
    let signals = ProfileSignals::from_profile(profile, params);
    score_with_signals(&signals, profile, club, params)
}

pub fn score_with_signals(
    signals: &ProfileSignals,
    profile: &GolferProfile,
    club: &ClubRecord,
    params: &ScoringParams,
) -> ScoreBreakdown {
    let mut contributions = Vec::with_capacity(8);

    if let Some(speed) = signals.swing_speed {
        contributions.extend(swing_speed_term(speed, club, params));
    }

    if let Some(handicap) = signals.handicap {
        contributions.extend(handicap_term(handicap, club, params));
    }

    if let Some(weight) = signals.beginner_weight {
        contributions.extend(alignment_terms(weight, club, params));
    }

    contributions.extend(miss_tendency_terms(profile, club, params));

    if let Some(budget) = profile.budget {
        contributions.extend(budget_term(budget, club, params));
    }

    let total = params.base_score + contributions.iter().map(|c| c.value).sum::<f64>();

    ScoreBreakdown {
        score: total.clamp(0.0, 100.0),
        contributions,
    }
}

#[inline]
fn clamp_level(level: u8) -> u8 {
    level.clamp(1, 5)
}

/// Map a 1-5 level onto [-1, 1], with 3 as neutral
#[inline]
fn normalized_level(level: u8) -> f64 {
    (clamp_level(level) as f64 - 3.0) / 2.0
}

/// Swing speed against the club's recommended range. A missing bound is open.
fn swing_speed_term(speed: f64, club: &ClubRecord, params: &ScoringParams) -> Option<Contribution> {
    if club.recommended_swing_speed_min.is_none() && club.recommended_swing_speed_max.is_none() {
        return None;
    }

    let lo = club.recommended_swing_speed_min.map(f64::from).unwrap_or(f64::MIN);
    let hi = club.recommended_swing_speed_max.map(f64::from).unwrap_or(f64::MAX);
    let speed_mph = speed.round().clamp(0.0, u16::MAX as f64) as u16;

    let outside_by = if speed < lo {
        lo - speed
    } else if speed > hi {
        speed - hi
    } else {
        0.0
    };

    let (kind, value) = if outside_by == 0.0 {
        (ReasonKind::SwingSpeedMatch { speed_mph }, params.swing_in_range_bonus)
    } else if outside_by <= params.swing_near_margin_mph {
        (ReasonKind::SwingSpeedNear { speed_mph }, params.swing_near_bonus)
    } else {
        (ReasonKind::SwingSpeedMismatch { speed_mph }, -params.swing_far_penalty)
    };

    Some(Contribution { kind, value })
}

/// Bonus proportional to how central the handicap sits in the club's range
fn handicap_term(handicap: f64, club: &ClubRecord, params: &ScoringParams) -> Option<Contribution> {
    if club.recommended_handicap_min.is_none() && club.recommended_handicap_max.is_none() {
        return None;
    }

    let lo = club.recommended_handicap_min.map(f64::from).unwrap_or(0.0);
    let hi = club.recommended_handicap_max.map(f64::from).unwrap_or(params.max_handicap);

    if lo > hi || handicap < lo || handicap > hi {
        return None;
    }

    let half_range = (hi - lo) / 2.0;
    let centrality = if half_range <= 0.0 {
        1.0
    } else {
        1.0 - ((handicap - (lo + half_range)).abs() / half_range).min(1.0)
    };

    Some(Contribution {
        kind: ReasonKind::HandicapMatch {
            handicap: handicap.round() as u16,
        },
        value: params.handicap_max_bonus * (0.5 + 0.5 * centrality),
    })
}

/// Forgiveness and control, weighted by how beginner-like the golfer is
fn alignment_terms(weight: f64, club: &ClubRecord, params: &ScoringParams) -> [Contribution; 2] {
    let forgiveness = clamp_level(club.forgiveness_level);
    let control = clamp_level(club.control_level);

    [
        Contribution {
            kind: ReasonKind::Forgiveness { level: forgiveness },
            value: params.alignment_weight * weight * normalized_level(forgiveness),
        },
        Contribution {
            kind: ReasonKind::Control { level: control },
            value: params.alignment_weight * (1.0 - weight) * normalized_level(control),
        },
    ]
}

/// One term per tendency the club corrects; each further match is worth
/// `miss_fix_decay` times the previous and the total never exceeds the cap.
fn miss_tendency_terms(profile: &GolferProfile, club: &ClubRecord, params: &ScoringParams) -> Vec<Contribution> {
    let decay = params.miss_fix_decay.clamp(0.0, 1.0);
    let cap = params.miss_fix_cap.max(0.0);

    let mut total = 0.0;
    let mut step = params.miss_fix_bonus.max(0.0);
    let mut terms = Vec::new();

    for tendency in profile
        .miss_tendencies
        .iter()
        .filter(|t| club.miss_tendency_fix.contains(*t))
    {
        let value = step.min(cap - total).max(0.0);
        total += value;
        step *= decay;

        terms.push(Contribution {
            kind: ReasonKind::MissTendencyFix(*tendency),
            value,
        });
    }

    terms
}

/// Full bonus at or under budget, falling linearly to zero at
/// `budget * (1 + tolerance)` and on to the maximum penalty beyond that.
fn budget_term(budget: u64, club: &ClubRecord, params: &ScoringParams) -> Option<Contribution> {
    let price = club.reference_price()?;

    if price <= budget {
        return Some(Contribution {
            kind: ReasonKind::WithinBudget { price },
            value: params.budget_fit_bonus,
        });
    }

    let value = if budget == 0 || params.budget_tolerance <= 0.0 {
        -params.budget_max_penalty
    } else {
        let over_ratio = (price - budget) as f64 / budget as f64;
        (params.budget_fit_bonus * (1.0 - over_ratio / params.budget_tolerance))
            .max(-params.budget_max_penalty)
    };

    let kind = if value > 0.0 {
        ReasonKind::NearBudget { price }
    } else {
        ReasonKind::OverBudget { price }
    };

    Some(Contribution { kind, value })
}
