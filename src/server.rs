//! HTTP surface: full page, htmx submit and refresh fragments, static files.

use crate::cli::ServeArgs;
use crate::constants::{ROUTE_PAGE, ROUTE_SUBMIT, ROUTE_UPDATE};
use crate::guestbook::{Guestbook, GuestbookError, SubmitOutcome};
use crate::render;
use crate::store::{EntryStore, StoreError};
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinError;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct ServeRequest {
    pub db_path: PathBuf,
    pub bind: SocketAddr,
    pub static_dir: PathBuf,
}

impl From<ServeArgs> for ServeRequest {
    fn from(args: ServeArgs) -> Self {
        ServeRequest {
            db_path: args.db.path,
            bind: args.bind,
            static_dir: args.static_dir,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Unable to open guestbook database: {0}")]
    Store(#[from] StoreError),
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[derive(Clone)]
pub struct AppState {
    pub guestbook: Arc<Guestbook>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    pub name: String,
    pub message: String,
}

/// Failure surfaced to the client as a 500.
#[derive(Debug, thiserror::Error)]
enum HandlerError {
    #[error("{0}")]
    Guestbook(#[from] GuestbookError),
    #[error("Guestbook task failed: {0}")]
    Join(#[from] JoinError),
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Runs a store-backed guestbook call on the blocking pool.
async fn with_guestbook<T, F>(state: &AppState, call: F) -> Result<T, HandlerError>
where
    T: Send + 'static,
    F: FnOnce(&Guestbook) -> Result<T, GuestbookError> + Send + 'static,
{
    let guestbook = Arc::clone(&state.guestbook);
    let result = tokio::task::spawn_blocking(move || call(guestbook.as_ref())).await?;
    Ok(result?)
}

/// Builds the router without static file serving.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ROUTE_PAGE, get(page))
        .route(ROUTE_SUBMIT, post(submit_message))
        .route(ROUTE_UPDATE, get(update_messages))
        .with_state(state)
}

/// Router plus `style.css` and `assets/` served from `static_dir`.
pub fn app(state: AppState, static_dir: &std::path::Path) -> Router {
    router(state)
        .route_service("/style.css", ServeFile::new(static_dir.join("style.css")))
        .nest_service("/assets", ServeDir::new(static_dir.join("assets")))
        .layer(TraceLayer::new_for_http())
}

async fn page(State(state): State<AppState>) -> Result<Html<String>, HandlerError> {
    let entries = with_guestbook(&state, Guestbook::entries).await?;
    Ok(Html(render::page(&entries, state.guestbook.limits())))
}

async fn submit_message(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> Result<Html<String>, HandlerError> {
    let (outcome, entries) = with_guestbook(&state, move |guestbook| {
        let outcome = guestbook.submit(&form.name, &form.message)?;
        Ok((outcome, guestbook.entries()?))
    })
    .await?;
    let notice = match outcome {
        SubmitOutcome::Accepted(entry) => {
            info!(id = entry.id, name = %entry.name, "entry added");
            None
        }
        SubmitOutcome::Rejected(reason) => {
            warn!(%reason, "submission rejected");
            Some(reason.to_string())
        }
    };
    Ok(Html(render::update_area(&entries, notice.as_deref())))
}

async fn update_messages(State(state): State<AppState>) -> Result<Html<String>, HandlerError> {
    let entries = with_guestbook(&state, Guestbook::entries).await?;
    Ok(Html(render::update_area(&entries, None)))
}

pub struct ServeService;

impl ServeService {
    pub async fn execute(&self, request: &ServeRequest) -> Result<(), ServerError> {
        let store = EntryStore::open(&request.db_path)?;
        let state = AppState {
            guestbook: Arc::new(Guestbook::new(store)),
        };
        let app = app(state, &request.static_dir);

        let listener = tokio::net::TcpListener::bind(request.bind)
            .await
            .map_err(|source| ServerError::Bind {
                addr: request.bind,
                source,
            })?;
        info!(
            addr = %request.bind,
            db = %request.db_path.display(),
            "guestbook listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve)?;
        info!("guestbook stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
