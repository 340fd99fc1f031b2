use super::{internal_error, AppState};
use crate::models::{CatalogResponse, DataSourceResponse, HealthResponse, RefreshResponse};
use actix_web::{web, HttpResponse, Responder};

/// Configure catalog and status routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/datasource", web::get().to(data_source))
        .route("/dogs", web::get().to(list_dogs))
        .route("/dogs/refresh", web::get().to(refresh_dogs));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let source = state.catalog.source();

    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data_source: source.description().to_string(),
        has_real_api: source.has_real_api(),
        cached_dogs: state.catalog.cached_count().await,
        last_fetch: state.catalog.last_fetch().await,
    })
}

/// GET /api/datasource
async fn data_source(state: web::Data<AppState>) -> impl Responder {
    let source = state.catalog.source();

    HttpResponse::Ok().json(DataSourceResponse {
        source: source.as_str().to_string(),
        description: source.description().to_string(),
        configured: true,
        has_real_api: source.has_real_api(),
        cached: state.catalog.cached_count().await,
        last_fetch: state.catalog.last_fetch().await,
    })
}

/// GET /api/dogs
///
/// Serves the cached catalog, fetching when it is empty or expired.
async fn list_dogs(state: web::Data<AppState>) -> impl Responder {
    match state.catalog.records().await {
        Ok(snapshot) => HttpResponse::Ok().json(CatalogResponse {
            count: snapshot.records.len(),
            dogs: snapshot.records.as_ref().clone(),
            source: state.catalog.source().description().to_string(),
            last_fetch: Some(snapshot.fetched_at),
        }),
        Err(e) => {
            tracing::error!("Error getting dogs: {}", e);
            internal_error("Failed to get dogs", e)
        }
    }
}

/// GET /api/dogs/refresh
async fn refresh_dogs(state: web::Data<AppState>) -> impl Responder {
    tracing::info!("Refreshing dog data");

    match state.catalog.refresh().await {
        Ok(snapshot) => {
            let count = snapshot.records.len();
            HttpResponse::Ok().json(RefreshResponse {
                success: true,
                count,
                source: state.catalog.source().description().to_string(),
                message: format!("Fetched {} dogs", count),
            })
        }
        Err(e) => {
            tracing::error!("Error fetching dogs: {}", e);
            internal_error("Failed to fetch dogs", e)
        }
    }
}
