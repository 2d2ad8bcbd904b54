use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use geomatch::config::{LogFormat, Settings};
use geomatch::core::build_matcher;
use geomatch::routes::{self, AppState};
use geomatch::services::{CsvEventLoader, EventSource};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|value| LogFormat::parse(&value))
        .unwrap_or(settings.logging.format);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    match log_format {
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
        LogFormat::Json => subscriber.json().init(),
    }

    info!("Starting geomatch service...");

    // Load events from CSV; the service still starts with an empty event set
    let csv_path = settings.datasource.csv_file_path.clone();
    let loader = Arc::new(CsvEventLoader::new(&csv_path));
    if let Err(e) = loader.load() {
        error!("Failed to load events from CSV file {}: {}", csv_path, e);
    }

    let events: Arc<dyn EventSource> = loader;
    let matcher = build_matcher(settings.matching.metric, events.clone());

    info!("Matcher initialized with {} metric", settings.matching.metric);

    let app_state = AppState { matcher, events };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
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
