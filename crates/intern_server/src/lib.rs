//! HTTP surface of the intern tracker.
//!
//! # Responsibility
//! - Expose the intern service as a JSON API under `/api`.
//! - Serve the server-rendered dashboard page and its HTML fragments.
//! - Own process wiring: config, store opening, graceful shutdown.
//!
//! # Invariants
//! - The service sits behind a single mutex, so store mutations and id
//!   allocation are serialized.
//! - Every service failure is translated at this boundary; none escape as
//!   an opaque 500 without a body.

use crate::config::ServerConfig;
use crate::error::ApiError;
use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use intern_core::{InternService, JsonInternRepository, RepoError, ServiceResult};
use log::{error, info};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod render;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub type SharedService = Arc<Mutex<InternService<JsonInternRepository>>>;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: SharedService,
    pub config: Arc<ServerConfig>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: InternService<JsonInternRepository>, config: ServerConfig) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Opens (seeding if needed) the configured store file.
    pub fn open(config: ServerConfig) -> Result<Self, RepoError> {
        let repo = JsonInternRepository::open(&config.data_file)?;
        Ok(Self::new(InternService::new(repo), config))
    }

    /// Runs one service call under the lock and maps its failure.
    pub fn with_service<T>(
        &self,
        call: impl FnOnce(&mut InternService<JsonInternRepository>) -> ServiceResult<T>,
    ) -> Result<T, ApiError> {
        // Repositories swap state only after a successful write, so a
        // poisoned lock still guards a consistent document.
        let mut service = self.service.lock().unwrap_or_else(PoisonError::into_inner);
        call(&mut *service).map_err(|err| ApiError::from_service(err, self.config.environment))
    }
}

/// Builds the full router: API, pages, fragments, CORS and request logging.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/status", get(api::status))
        .route(
            "/api/interns",
            get(api::list_interns).post(api::create_intern),
        )
        .route(
            "/api/interns/:id",
            get(api::get_intern)
                .put(api::update_intern)
                .delete(api::delete_intern),
        )
        .route("/api/dashboard/stats", get(api::dashboard_stats))
        .route("/", get(pages::dashboard_page))
        .route("/fragments/metrics", get(pages::metrics_fragment))
        .route(
            "/fragments/interns",
            get(pages::interns_fragment).post(pages::create_intern_form),
        )
        .route("/fragments/new-intern", get(pages::new_intern_form))
        .route(
            "/fragments/interns/:id",
            get(pages::intern_detail_fragment).post(pages::update_intern_form),
        )
        .route("/fragments/interns/:id/edit", get(pages::edit_intern_form))
        .route(
            "/fragments/interns/:id/delete",
            post(pages::delete_intern_form),
        )
        .fallback(api::not_found)
        .method_not_allowed_fallback(api::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(axum::middleware::from_fn(middleware::log_request))
        .with_state(state)
}

/// Opens the store, binds the listener and serves until shutdown.
pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let address = SocketAddr::new(config.host, config.port);
    let environment = config.environment;
    let state = AppState::open(config)?;
    let app = build_router(state);

    let listener = TcpListener::bind(address).await?;
    info!(
        "event=server_start module=http status=ok address={address} environment={}",
        environment.as_str()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=http status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("event=signal_install module=http status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
        info!("event=shutdown module=http status=start signal=ctrl_c");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("event=shutdown module=http status=start signal=terminate");
            }
            Err(err) => {
                error!(
                    "event=signal_install module=http status=error signal=terminate error={err}"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
