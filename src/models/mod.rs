// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod units;

pub use domain::{Catalog, ClubRecommendation, ClubRecord, ClubType, ConditionGrade, GolferProfile, Locale, MissTendency, Recommendations, ScoringParams, UnknownVariant};
pub use requests::{RecommendRequest, UsedPriceRequest};
pub use responses::{ErrorResponse, HealthResponse, InvalidateResponse, RecommendResponse, RecommendationView, UsedPriceResponse};
pub use units::{Speed, SpeedUnit};
