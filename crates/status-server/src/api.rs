use axum::{
    Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    response::{
        Json,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use domain::report::{Report, ReportSubmission};
use futures::Stream;
use serde_json::{Value, json};
use std::{sync::Arc, time::Duration};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;
use crate::websocket::ws_handler;

pub const HEALTH_MESSAGE: &str = "Backend is running...";

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/reports", get(get_reports))
        .route("/reports/{id}", get(get_report))
        .route("/report", post(submit_report))
        .route("/resolve/{id}", post(resolve_report))
        .route("/ws", get(ws_handler))
        .route("/events", get(sse_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    HEALTH_MESSAGE
}

#[derive(serde::Deserialize)]
struct KeyFilter {
    #[serde(rename = "loop")]
    loop_id: Option<String>,
    section: Option<String>,
}

async fn get_reports(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<KeyFilter>,
) -> Result<Json<Vec<Report>>, ApiError> {
    let reports: Vec<Report> = match (filter.loop_id, filter.section) {
        (Some(loop_id), Some(section)) => state
            .reports
            .find_report(&loop_id, &section)
            .await?
            .into_iter()
            .collect(),
        (None, None) => state.reports.list_reports().await?,
        _ => {
            return Err(ApiError::BadRequest(
                "loop and section must be given together".to_string(),
            ));
        }
    };
    Ok(Json(reports))
}

async fn get_report(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Report>, ApiError> {
    Ok(Json(state.reports.get_report(&id).await?))
}

async fn submit_report(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReportSubmission>, JsonRejection>,
) -> Result<Json<Report>, ApiError> {
    let Json(submission) = payload?;
    Ok(Json(state.reports.submit_report(submission).await?))
}

async fn resolve_report(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let report = state.reports.resolve_report(&id).await?;
    Ok(Json(json!({ "success": true, "id": report.id })))
}

async fn sse_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx).map(|msg| match msg {
        Ok(event) => Event::default().event(event.name()).json_data(&event),
        // Lagged observers skip the gap
        Err(BroadcastStreamRecvError::Lagged(missed)) => {
            warn!(missed, "SSE observer lagged, events skipped");
            Ok(Event::default().comment("lagged"))
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
