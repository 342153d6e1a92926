// Core algorithm exports
pub mod estimation;
pub mod pricing;
pub mod reasons;
pub mod recommender;
pub mod scoring;

pub use estimation::{beginner_weight, effective_swing_speed, estimate_swing_speed, handicap_from_average_score, skill_band, SkillBand};
pub use pricing::{depreciation_factor, estimate_used_price, resolved_price_guide};
pub use reasons::{format_price, ReasonKind};
pub use recommender::{recommend, Recommender};
pub use scoring::{score_club, Contribution, ProfileSignals, ScoreBreakdown};
