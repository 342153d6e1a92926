use actix_web::{web, HttpResponse, Responder};
use std::collections::BTreeMap;
use std::sync::Arc;
use validator::Validate;
use crate::config::RecommendationSettings;
use crate::core::{effective_swing_speed, handicap_from_average_score, resolved_price_guide, skill_band, Recommender};
use crate::models::{ErrorResponse, HealthResponse, InvalidateResponse, RecommendRequest, RecommendResponse, RecommendationView, UsedPriceRequest, UsedPriceResponse};
use crate::services::CatalogProvider;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub recommender: Recommender,
    pub defaults: RecommendationSettings,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend))
        .route("/clubs/used-price", web::post().to(used_price))
        .route("/catalog/invalidate", web::post().to(invalidate_catalog));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalog_healthy = state.catalog.health_check().await;

    let status = if catalog_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommend clubs endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "height": 175,
///   "averageScore": 100,
///   "swingSpeed": 40,
///   "swingSpeedUnit": "mps",
///   "missTendencies": ["slice"],
///   "budget": 500000,
///   "clubTypes": ["driver", "iron"],
///   "locale": "ko",
///   "maxReasons": 3,
///   "limitPerType": 5
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let profile = req.to_profile();
    let types = req.requested_types();
    let locale = req.locale.unwrap_or(state.defaults.default_locale);
    let max_reasons = req.max_reasons.unwrap_or(state.defaults.max_reasons);
    let limit_per_type = req.limit_per_type.unwrap_or(state.defaults.limit_per_type);

    tracing::info!("Recommending clubs for types {:?}", types);

    let catalog = match state.catalog.fetch_by_type(&types).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Failed to load catalog: {}", e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to load catalog".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    let candidates: usize = catalog.values().map(Vec::len).sum();
    let recommendations = state.recommender.recommend(&profile, &catalog, locale);

    let views: BTreeMap<_, Vec<RecommendationView>> = recommendations
        .iter()
        .map(|(club_type, recs)| {
            let shown = recs
                .iter()
                .take(limit_per_type)
                .map(|rec| RecommendationView::from_recommendation(rec, locale, max_reasons))
                .collect();
            (*club_type, shown)
        })
        .collect();

    let params = state.recommender.params();
    let response = RecommendResponse {
        request_id: uuid::Uuid::new_v4().to_string(),
        locale,
        estimated_swing_speed: effective_swing_speed(&profile, params).map(|s| s.round() as u16),
        handicap: profile
            .average_score
            .map(|s| handicap_from_average_score(s, params).round() as u16),
        skill_band: profile.average_score.map(|s| skill_band(s, params)),
        recommendations: views,
        generated_at: chrono::Utc::now(),
    };

    tracing::info!(
        "Returning recommendations for {} types (from {} candidates)",
        response.recommendations.len(),
        candidates
    );

    HttpResponse::Ok().json(response)
}

/// Resolve the used-price guide for a club
///
/// POST /api/v1/clubs/used-price
async fn used_price(req: web::Json<UsedPriceRequest>) -> impl Responder {
    HttpResponse::Ok().json(UsedPriceResponse {
        club_id: req.club.id.clone(),
        guide: resolved_price_guide(&req.club),
    })
}

/// Drop cached catalog entries after the club data changes
///
/// POST /api/v1/catalog/invalidate
async fn invalidate_catalog(state: web::Data<AppState>) -> impl Responder {
    match state.catalog.invalidate().await {
        Ok(()) => {
            tracing::info!("Catalog cache invalidated");
            HttpResponse::Ok().json(InvalidateResponse {
                success: true,
                invalidated_at: chrono::Utc::now(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to invalidate catalog cache: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to invalidate catalog cache".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
