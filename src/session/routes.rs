//! HTTP route handlers for explorer sessions.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dataset::{BrowserView, DatasetKind, PageSize};
use crate::error::{AppError, Result};
use crate::prediction::{self, PredictionForm, PredictionOutcome};
use crate::AppState;

/// Create the session router with all endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/:id/dataset", get(dataset_view))
        .route("/:id/dataset/kind", post(select_kind))
        .route("/:id/dataset/page-size", post(set_page_size))
        .route("/:id/dataset/next", post(next_page))
        .route("/:id/dataset/previous", post(previous_page))
        .route("/:id/dataset/export", get(export))
        .route("/:id/predict", post(predict))
        .route("/:id/prediction", get(latest_prediction))
}

#[derive(Debug, Serialize)]
struct CreatedSession {
    session_id: Uuid,
    view: BrowserView,
}

#[derive(Debug, Deserialize)]
struct SelectKindRequest {
    kind: DatasetKind,
}

#[derive(Debug, Deserialize)]
struct PageSizeRequest {
    page_size: usize,
}

#[derive(Debug, Serialize)]
struct PredictionStatus {
    pending: bool,
    outcome: Option<PredictionOutcome>,
}

/// Open a session and load the experimental dataset.
async fn create(State(state): State<AppState>) -> (StatusCode, Json<CreatedSession>) {
    let (session_id, session) = state.sessions.create(state.datasets.clone()).await;
    let view = session
        .browser
        .select_dataset_kind(DatasetKind::Experiment)
        .await;

    (StatusCode::CREATED, Json(CreatedSession { session_id, view }))
}

async fn dataset_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BrowserView>> {
    let session = state.sessions.get(id).await?;
    Ok(Json(session.browser.view().await))
}

async fn select_kind(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectKindRequest>,
) -> Result<Json<BrowserView>> {
    let session = state.sessions.get(id).await?;
    Ok(Json(session.browser.select_dataset_kind(request.kind).await))
}

async fn set_page_size(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PageSizeRequest>,
) -> Result<Json<BrowserView>> {
    let page_size = PageSize::try_from(request.page_size).map_err(AppError::InvalidPageSize)?;
    let session = state.sessions.get(id).await?;
    Ok(Json(session.browser.set_page_size(page_size).await))
}

async fn next_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BrowserView>> {
    let session = state.sessions.get(id).await?;
    Ok(Json(session.browser.next_page().await))
}

async fn previous_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BrowserView>> {
    let session = state.sessions.get(id).await?;
    Ok(Json(session.browser.previous_page().await))
}

/// Download every loaded row as CSV; 204 when nothing is loaded.
async fn export(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response> {
    let session = state.sessions.get(id).await?;

    let response = match session.browser.export().await {
        Some((kind, csv)) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", kind.export_filename()),
                ),
            ],
            csv,
        )
            .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };

    Ok(response)
}

/// Predict and record the outcome as the session's latest.
///
/// The remote call runs on its own task so the slot is settled even when
/// the client goes away before the answer arrives.
async fn predict(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<PredictionForm>,
) -> Result<Json<PredictionOutcome>> {
    let session = state.sessions.get(id).await?;
    let validated = prediction::check(&form)?;

    let ticket = session.prediction.lock().await.begin();
    let predictor = state.predictor.clone();
    let task = tokio::spawn(async move {
        let result = prediction::run(predictor.as_ref(), validated).await;

        let mut slot = session.prediction.lock().await;
        match &result {
            Ok(outcome) => {
                slot.finish(ticket, outcome.clone());
            }
            Err(_) => slot.fail(ticket),
        }
        result
    });

    Ok(Json(task.await??))
}

async fn latest_prediction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PredictionStatus>> {
    let session = state.sessions.get(id).await?;
    let slot = session.prediction.lock().await;
    Ok(Json(PredictionStatus {
        pending: slot.is_pending(),
        outcome: slot.latest().cloned(),
    }))
}
