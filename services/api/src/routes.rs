use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use care_connect::profiles::{
    profile_router, CaregiverProfile, CaregiverProfileService, CompletionReport, FieldStatus,
    NotificationPublisher, ProfileCompletionScorer, ProfileRepository, ProgressBand,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct CompletionBreakdownResponse {
    #[serde(flatten)]
    pub(crate) report: CompletionReport,
    pub(crate) progress_band: ProgressBand,
    pub(crate) fields: Vec<FieldStatus>,
}

pub(crate) fn with_profile_routes<R, N>(service: Arc<CaregiverProfileService<R, N>>) -> axum::Router
where
    R: ProfileRepository + 'static,
    N: NotificationPublisher + 'static,
{
    profile_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/profiles/completion/breakdown",
            axum::routing::post(completion_breakdown_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn completion_breakdown_endpoint(
    Json(profile): Json<CaregiverProfile>,
) -> Json<CompletionBreakdownResponse> {
    let scorer = ProfileCompletionScorer::new();
    let report = scorer.score(&profile);
    let progress_band = report.progress_band();
    let fields = scorer.breakdown(&profile);

    Json(CompletionBreakdownResponse {
        report,
        progress_band,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryProfileRepository, LoggingNotificationPublisher};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn breakdown_endpoint_returns_report_and_fields() {
        let profile = CaregiverProfile {
            name: Some("Asha".to_string()),
            age: Some(0),
            ..CaregiverProfile::default()
        };

        let Json(body) = completion_breakdown_endpoint(Json(profile)).await;

        assert_eq!(body.report.percentage, 15);
        assert_eq!(body.progress_band, ProgressBand::Starter);
        assert_eq!(body.fields.len(), 13);
        assert_eq!(
            body.report.missing_fields,
            vec!["Phone Number", "Location", "Gender"]
        );
    }

    #[tokio::test]
    async fn health_route_is_mounted_beside_profile_routes() {
        let service = Arc::new(CaregiverProfileService::new(
            Arc::new(InMemoryProfileRepository::default()),
            Arc::new(LoggingNotificationPublisher::default()),
            25,
        ));
        let router = with_profile_routes(service);

        let response = router
            .oneshot(
                Request::get("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
