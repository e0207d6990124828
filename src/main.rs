use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use creator_match::config::Settings;
use creator_match::core::RankingPipeline;
use creator_match::core::Weights;
use creator_match::routes::{self, matches::AppState};
use creator_match::services::{
    HttpPredictiveService, InMemoryStore, LogNotifier, MatchStore, NoopPredictive, Notifier,
    PredictiveService, WebhookNotifier,
};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST),
        )
        .content_type("application/json")
        .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration first (includes the weight-sum invariant check) so
    // the logging section can drive the subscriber below.
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Initialize logging from the configured level/format; RUST_LOG and
    // LOG_FORMAT environment variables take precedence when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    let log_format =
        std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Creator Match service...");
    info!("Configuration loaded successfully");

    // Initialize ranking pipeline with configured weights
    let weights: Weights = settings.scoring.weights.clone().into();
    let pipeline = RankingPipeline::new(weights);

    info!("Ranking pipeline initialized with weights: {:?}", weights);

    // Store: persistence is pluggable behind MatchStore; the bundled
    // in-memory store backs the service out of the box.
    let store: Arc<dyn MatchStore> = Arc::new(InMemoryStore::new());

    // Predictive scoring collaborator (optional)
    let predictive: Arc<dyn PredictiveService> = match settings.predictive.endpoint.clone() {
        Some(endpoint) => {
            info!("Predictive service enabled at {}", endpoint);
            Arc::new(HttpPredictiveService::new(
                endpoint,
                settings.predictive.api_key.clone().unwrap_or_default(),
                settings.predictive.timeout_secs,
            ))
        }
        None => {
            info!("Predictive service not configured, using 0/50 fallbacks");
            Arc::new(NoopPredictive)
        }
    };

    // Notification delivery (optional webhook)
    let notifier: Arc<dyn Notifier> = match settings.notifications.webhook_url.clone() {
        Some(url) => {
            info!("Notification webhook enabled");
            Arc::new(WebhookNotifier::new(url, settings.notifications.timeout_secs))
        }
        None => Arc::new(LogNotifier),
    };

    // Build application state
    let app_state = AppState {
        store,
        predictive,
        notifier,
        pipeline,
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
