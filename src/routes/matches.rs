use super::{internal_error, AppState};
use crate::models::{ErrorResponse, MatchRequest, ScoredRecord};
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/match", web::post().to(match_dogs));
}

/// Rank the catalog against a trait query
///
/// POST /api/match
///
/// Request body:
/// ```json
/// {
///   "traits": { "breed": "Labrador", "size": "Large", "wantsGoodWithKids": true },
///   "limit": 20
/// }
/// ```
///
/// Responds with the top `limit` scored dogs, best first. A missing or
/// `null` `traits` is a 400; an empty catalog ranks to `[]`.
async fn match_dogs(state: web::Data<AppState>, req: web::Json<MatchRequest>) -> impl Responder {
    let Some(traits) = req.traits.as_ref() else {
        tracing::info!("Match request without traits");
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "traits object required".to_string(),
            message: "the request body needs a traits object".to_string(),
            status_code: 400,
        });
    };

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let limit = req
        .limit
        .map_or(state.result_limit, usize::from)
        .min(state.max_limit);

    let snapshot = match state.catalog.records().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to fetch data for matching: {}", e);
            return internal_error("No data available", e);
        }
    };

    match state.matcher.top_matches(traits, &snapshot.records, limit) {
        Ok(result) => {
            tracing::info!(
                "Matched {} candidates, returning top {}",
                result.total_candidates,
                result.matches.len()
            );
            let top: Vec<ScoredRecord> = result.matches;
            HttpResponse::Ok().json(top)
        }
        Err(e) => {
            tracing::error!("Failed to match dogs: {}", e);
            internal_error("Failed to match dogs", e)
        }
    }
}
