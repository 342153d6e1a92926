use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use clubfit::config::{CatalogBackend, Settings};
use clubfit::core::Recommender;
use clubfit::routes::{self, handle_json_payload_error, recommendations::AppState};
use clubfit::services::{CacheManager, CachedCatalog, CatalogProvider, PostgresCatalog, RestCatalogClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

async fn build_catalog(settings: &Settings) -> std::io::Result<Arc<dyn CatalogProvider>> {
    match settings.catalog.backend {
        CatalogBackend::Postgres => {
            let db = settings
                .database
                .as_ref()
                .ok_or_else(|| startup_error("Configuration error", "catalog.backend = postgres requires [database]"))?;

            let catalog = PostgresCatalog::from_settings(
                &db.url,
                db.max_connections,
                db.min_connections,
                db.acquire_timeout_secs,
                db.idle_timeout_secs,
            )
            .await
            .map_err(|e| startup_error("Failed to connect to PostgreSQL", e))?;

            info!("PostgreSQL catalog initialized (max: {} connections)", db.max_connections.unwrap_or(10));
            let catalog: Arc<dyn CatalogProvider> = Arc::new(catalog);
            Ok(catalog)
        }
        CatalogBackend::Rest => {
            let rest = settings
                .catalog
                .rest
                .as_ref()
                .ok_or_else(|| startup_error("Configuration error", "catalog.backend = rest requires [catalog.rest]"))?;

            let client = RestCatalogClient::new(
                rest.endpoint.clone(),
                rest.api_key.clone(),
                rest.table.clone(),
                rest.timeout_secs,
            )
            .map_err(|e| startup_error("Failed to create REST catalog client", e))?;

            info!("REST catalog client initialized for {}", rest.endpoint);
            let catalog: Arc<dyn CatalogProvider> = Arc::new(client);
            Ok(catalog)
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging; LOG_LEVEL / LOG_FORMAT override the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Clubfit recommendation service...");

    let backend = build_catalog(&settings).await?;

    // Initialize cache manager; Redis is optional
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(64);

    let cache = match CacheManager::new(settings.cache.redis_url.as_deref(), l1_cache_size, cache_ttl).await {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to connect to Redis ({}), falling back to in-process cache", e);
            CacheManager::l1_only(l1_cache_size, cache_ttl)
        }
    };

    info!(
        "Cache manager initialized (L1: {} entries, TTL: {}s, Redis: {})",
        l1_cache_size,
        cache_ttl,
        cache.has_redis()
    );

    let catalog: Arc<dyn CatalogProvider> = Arc::new(CachedCatalog::new(backend, Arc::new(cache)));

    let recommender = Recommender::new(settings.scoring);

    info!("Recommender initialized with params: {:?}", recommender.params());

    let app_state = AppState {
        catalog,
        recommender,
        defaults: settings.recommendation.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
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
