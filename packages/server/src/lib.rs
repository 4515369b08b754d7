#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for monthly electricity consumption forecasts.
//!
//! Serves the `/predict` endpoint, a health check, and the static home and
//! about pages. The trained model is loaded once at startup and shared
//! read-only across all workers; if it cannot be loaded the server refuses
//! to start.

mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use power_forecast_model::{ConsumptionModel, DEFAULT_ARTIFACT_PATH, Regressor};

/// Default directory holding `index.html` and `about.html`.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Shared application state.
pub struct AppState {
    /// The loaded consumption model. Immutable after startup.
    pub model: Arc<dyn Regressor>,
    /// Rows the model was trained on, reported by the health check.
    pub model_training_rows: usize,
    /// Directory the static pages are served from.
    pub static_dir: PathBuf,
}

/// Server settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`, default `127.0.0.1`).
    pub bind_addr: String,
    /// Port to listen on (`PORT`, default `8080`).
    pub port: u16,
    /// Model artifact path (`MODEL_PATH`).
    pub model_path: PathBuf,
    /// Static page directory (`STATIC_DIR`).
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
            model_path: lookup("MODEL_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_ARTIFACT_PATH), PathBuf::from),
            static_dir: lookup("STATIC_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
        }
    }
}

/// Registers the API and page routes that do not depend on the filesystem
/// layout of static assets.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/predict", web::post().to(handlers::predict))
        .route("/about", web::get().to(handlers::about))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/predict", web::post().to(handlers::predict)),
        );
}

/// Starts the forecast API server.
///
/// Loads the model artifact and starts the Actix-Web HTTP server. This is a
/// regular async function; the caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an error if the model cannot be loaded, or if the HTTP server
/// fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!("Loading model from {}...", config.model_path.display());
    let model = ConsumptionModel::load(&config.model_path).map_err(|e| {
        log::error!("Model unavailable, refusing to serve: {e}");
        std::io::Error::other(e)
    })?;

    if let Some(evaluation) = model.evaluation() {
        log::info!(
            "Model trained on {} rows (holdout MAE {:.2}, RMSE {:.2})",
            model.training_rows(),
            evaluation.mae,
            evaluation.rmse
        );
    }

    let state = web::Data::new(AppState {
        model_training_rows: model.training_rows(),
        model: Arc::new(model),
        static_dir: config.static_dir.clone(),
    });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    let static_dir = config.static_dir;
    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_routes)
            .service(Files::new("/", &static_dir).index_file("index.html"))
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}
