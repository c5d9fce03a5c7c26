//! Axum routes exposing the note service as a JSON API under `/notes`.

use crate::app::NoteService;
use crate::{Note, NoteDraft, NoteError};

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use log::{error, info, warn};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinError;
use tower_http::cors::CorsLayer;

pub struct AppState {
    pub service: NoteService,
}

/// Body of every non-2xx response
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Debug)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Note ID must be a non-negative integer: {0}")]
    InvalidId(String),

    #[error("Request body must be JSON with string fields `title` and `content`: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Note(#[from] NoteError),

    #[error("Note operation did not finish: {0}")]
    TaskFailed(#[from] JoinError),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Note(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Note(_) | Self::TaskFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {self}");
        } else {
            warn!("Rejected request: {self}");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidId(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

/// Builds the router with all note routes and a permissive CORS layer
#[must_use]
pub fn router(service: NoteService) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/:id",
            get(read_note).put(update_note).delete(delete_note),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Binds `addr` and serves the API until the process is stopped
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn serve(addr: SocketAddr, service: NoteService) -> anyhow::Result<()> {
    let backend = service.backend_name();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving notes from {backend} backend on http://{addr}");

    axum::serve(listener, router(service)).await?;
    Ok(())
}

/// Runs a service call on the blocking thread pool
///
/// The file backend does synchronous file I/O under a mutex, which must not
/// stall the async worker threads.
async fn on_service<T, F>(state: &AppState, call: F) -> Result<T, ApiError>
where
    F: FnOnce(&NoteService) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let service = state.service.clone();
    Ok(tokio::task::spawn_blocking(move || call(&service)).await??)
}

// POST /notes
async fn create_note(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NoteDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(draft) = body?;
    let note = on_service(&state, move |s| {
        s.create_note(draft.title, draft.content)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

// GET /notes
async fn list_notes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(on_service(&state, NoteService::list_notes).await?))
}

// GET /notes/:id
async fn read_note(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Note>, ApiError> {
    let Path(id) = id?;
    Ok(Json(on_service(&state, move |s| s.read_note(id)).await?))
}

// PUT /notes/:id
async fn update_note(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<NoteDraft>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Path(id) = id?;
    let Json(draft) = body?;
    let note = on_service(&state, move |s| {
        s.update_note(id, draft.title, draft.content)
    })
    .await?;
    Ok(Json(note))
}

// DELETE /notes/:id
async fn delete_note(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Path(id) = id?;
    on_service(&state, move |s| s.delete_note(id)).await?;
    Ok(Json(MessageBody {
        message: format!("Note {id} deleted successfully"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BackendError;

    #[test]
    fn client_mistakes_are_bad_requests() {
        assert_eq!(
            ApiError::InvalidId("abc".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidBody("missing field".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_note_is_not_found() {
        let err = ApiError::from(NoteError::Backend(BackendError::NoteNotFound(3)));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_failures_are_server_errors() {
        let err = ApiError::from(NoteError::Backend(BackendError::LockPoisoned));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn panicked_service_call_is_a_server_error() {
        let join_error = tokio::task::spawn_blocking(|| -> u64 { panic!("backend blew up") })
            .await
            .unwrap_err();
        let err = ApiError::from(join_error);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
