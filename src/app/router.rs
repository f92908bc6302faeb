use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, Json};
use axum::routing::{get, post};
use tokio::sync::Mutex;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::app::model::{RangeRequest, SelectRequest};
use crate::dashboard::{Dashboard, DashboardView, ViewEvent, ViewUpdate};
use crate::dataset::Dataset;

/// One dashboard per process; events are applied one at a time.
#[derive(Clone)]
pub struct AppState {
    dashboard: Arc<Mutex<Dashboard>>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(Dashboard::new(dataset))),
        }
    }
}

/// Builds the HTTP surface. `web_dir` is served when it holds an `index.html`.
pub fn router(state: AppState, web_dir: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/api/view", get(get_view))
        .route("/api/range", post(post_range))
        .route("/api/select", post(post_select))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match web_dir.map(|dir| (dir, dir.join("index.html"))) {
        Some((dir, index)) if index.exists() => {
            let static_files = ServeDir::new(dir).not_found_service(ServeFile::new(index));
            app.fallback_service(static_files)
        }
        _ => app.fallback(|| async {
            Html(
                r#"<!doctype html>
<html>
  <head><meta charset="utf-8"><title>shelfmekko</title></head>
  <body>
    <h1>shelfmekko</h1>
    <p>No front-end found. The dashboard API lives under <code>/api/view</code>,
    <code>/api/range</code> and <code>/api/select</code>.</p>
  </body>
</html>
"#,
            )
        }),
    }
}

async fn get_view(State(state): State<AppState>) -> Json<DashboardView> {
    let dashboard = state.dashboard.lock().await;
    Json(dashboard.view())
}

async fn post_range(
    State(state): State<AppState>,
    Json(req): Json<RangeRequest>,
) -> Result<Json<ViewUpdate>, (StatusCode, String)> {
    req.validate()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;

    let mut dashboard = state.dashboard.lock().await;
    let update = dashboard.handle(ViewEvent::RangeChanged {
        low: req.low,
        high: req.high,
    });
    tracing::info!(
        low = req.low,
        high = req.high,
        rows = update.table.len(),
        "range applied"
    );
    Ok(Json(update))
}

async fn post_select(
    State(state): State<AppState>,
    Json(req): Json<SelectRequest>,
) -> Json<ViewUpdate> {
    let mut dashboard = state.dashboard.lock().await;
    let update = dashboard.handle(ViewEvent::SegmentClicked(req.into()));
    tracing::info!(selection = ?update.selection, rows = update.table.len(), "selection applied");
    Json(update)
}
