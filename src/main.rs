use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use companion_matcher::config::{LoggingSettings, Settings};
use companion_matcher::core::Matcher;
use companion_matcher::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use companion_matcher::services::CatalogService;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::other(e)
    })?;

    init_tracing(&settings.logging);

    info!("Starting Companion Matcher service...");

    let catalog = CatalogService::from_settings(&settings).map_err(|e| {
        tracing::error!("Failed to initialize catalog: {}", e);
        std::io::Error::other(e)
    })?;
    let source = catalog.source();

    info!("Data source: {}", source.description());
    if source.has_real_api() {
        info!(
            "Searching {} miles around {}",
            settings.rescue_groups.radius_miles, settings.rescue_groups.postal_code
        );
    }

    // Initialize matcher with configured weights
    let weights = settings.scoring_weights();
    let matcher = Matcher::new(weights).include_breakdown(settings.matching.include_breakdown);

    info!("Matcher initialized with weights: {:?}", weights);

    let app_state = AppState {
        catalog: Arc::new(catalog),
        matcher,
        result_limit: settings.matching.result_limit,
        max_limit: settings.matching.max_limit,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
