use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{CaregiverId, CaregiverIdError, CaregiverProfile};
use super::repository::{NotificationPublisher, ProfileRepository, ProfileSearch, RepositoryError};
use super::service::{CaregiverProfileService, ProfileServiceError};

/// Router builder exposing scoring, save, lookup, and search endpoints.
pub fn profile_router<R, N>(service: Arc<CaregiverProfileService<R, N>>) -> Router
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/profiles/completion",
            post(completion_handler::<R, N>),
        )
        .route("/api/v1/profiles", get(search_handler::<R, N>))
        .route(
            "/api/v1/profiles/:caregiver_id",
            get(status_handler::<R, N>).put(save_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn completion_handler<R, N>(
    State(service): State<Arc<CaregiverProfileService<R, N>>>,
    axum::Json(profile): axum::Json<CaregiverProfile>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let report = service.score(&profile);
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn save_handler<R, N>(
    State(service): State<Arc<CaregiverProfileService<R, N>>>,
    Path(caregiver_id): Path<String>,
    axum::Json(profile): axum::Json<CaregiverProfile>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.save(CaregiverId(caregiver_id), profile) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(ProfileServiceError::InvalidCaregiverId(error)) => invalid_id(error),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<CaregiverProfileService<R, N>>>,
    Path(caregiver_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = CaregiverId(caregiver_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(ProfileServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "caregiver_id": id.0,
                "error": "profile not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(ProfileServiceError::InvalidCaregiverId(error)) => invalid_id(error),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn search_handler<R, N>(
    State(service): State<Arc<CaregiverProfileService<R, N>>>,
    Query(filter): Query<ProfileSearch>,
) -> Response
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.search(&filter) {
        Ok(records) => {
            let results: Vec<_> = records.iter().map(|record| record.status_view()).collect();
            let payload = json!({
                "count": results.len(),
                "results": results,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

fn invalid_id(error: CaregiverIdError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

fn internal_error(error: ProfileServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
