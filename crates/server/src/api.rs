//! HTTP surface over the naming workflow.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use namecast_explain::render_markdown;
use namecast_query::{
    CompareRequest, CompareResponse, EvaluateRequest, ValidationError, WorkflowRequest,
    WorkflowResponse,
};
use namecast_workflow::NamingWorkflow;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub workflow: NamingWorkflow,
}

pub enum ApiError {
    Validation(ValidationError),
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/evaluate", post(evaluate))
        .route("/compare", post(compare))
        .route("/workflow", post(workflow))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": "namecast-api" }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

#[derive(Debug, Default, Deserialize)]
struct FormatQuery {
    format: Option<String>,
}

async fn evaluate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FormatQuery>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Response, ApiError> {
    request.validate()?;

    let result = state
        .workflow
        .evaluator()
        .evaluate(&request.name, request.mission.as_deref())
        .await;

    if query.format.as_deref() == Some("markdown") {
        return Ok((
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            render_markdown(&result),
        )
            .into_response());
    }
    Ok(Json(result).into_response())
}

async fn compare(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, ApiError> {
    request.validate()?;

    let comparison = state
        .workflow
        .evaluator()
        .compare(&request.names, request.mission.as_deref())
        .await;

    CompareResponse::new(comparison.results, comparison.winner)
        .map(Json)
        .ok_or_else(|| ApiError::Internal("Comparison produced no winner".to_string()))
}

async fn workflow(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WorkflowRequest>,
) -> Result<Json<WorkflowResponse>, ApiError> {
    request.validate()?;

    let result = state.workflow.run(&request).await;
    Ok(Json(WorkflowResponse::from(result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use namecast_availability::fakes::MemoryDomainLookup;
    use namecast_availability::DomainChecker;
    use namecast_score::BrandEvaluator;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(lookup: MemoryDomainLookup) -> Router {
        let evaluator = BrandEvaluator::new(DomainChecker::new(Arc::new(lookup)));
        let state = Arc::new(AppState {
            workflow: NamingWorkflow::new(evaluator),
        });
        build_router(state, &["http://localhost:5173".to_string()])
    }

    async fn send(app: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let (status, bytes) = send(app, "POST", uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_status_routes() {
        let (status, bytes) = send(app(MemoryDomainLookup::new()), "GET", "/", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["service"], "namecast-api");

        let (_, bytes) = send(app(MemoryDomainLookup::new()), "GET", "/health", Value::Null).await;
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_evaluate_name_length() {
        let (status, body) =
            post_json(app(MemoryDomainLookup::new()), "/evaluate", json!({ "name": "ab" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "ab");
        assert_eq!(body["domain_score"], 100.0);

        let (status, body) =
            post_json(app(MemoryDomainLookup::new()), "/evaluate", json!({ "name": "a" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Name must be at least 2 characters");
    }

    #[tokio::test]
    async fn test_evaluate_markdown() {
        let lookup = MemoryDomainLookup::new().with_registered(["kestrel.com"]);
        let (status, bytes) = send(
            app(lookup),
            "POST",
            "/evaluate?format=markdown",
            json!({ "name": "Kestrel" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let markdown = String::from_utf8(bytes).unwrap();
        assert!(markdown.starts_with("## Brand Evaluation: Kestrel"));
        assert!(markdown.contains("| .com | Taken |"));
    }

    #[tokio::test]
    async fn test_compare() {
        let (status, body) = post_json(
            app(MemoryDomainLookup::new()),
            "/compare",
            json!({ "names": ["Kestrel"] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Must provide at least 2 names to compare");

        // Equal scores: the first name given wins
        let (status, body) = post_json(
            app(MemoryDomainLookup::new()),
            "/compare",
            json!({ "names": ["Plume", "Kestrel"] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["winner"], "Plume");
        assert_eq!(body["results"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["winner_score"], body["results"][0]["overall_score"]);

        let lookup = MemoryDomainLookup::new().with_registered(["plume.com"]);
        let (_, body) = post_json(
            app(lookup),
            "/compare",
            json!({ "names": ["Plume", "Kestrel"] }),
        )
        .await;
        assert_eq!(body["winner"], "Kestrel");
    }

    #[tokio::test]
    async fn test_workflow() {
        let (status, body) = post_json(
            app(MemoryDomainLookup::new()),
            "/workflow",
            json!({ "project_description": "Birds" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Project description must be at least 10 characters");

        let lookup = MemoryDomainLookup::new().with_registered(["taken.com", "taken.io"]);
        let (status, body) = post_json(
            app(lookup),
            "/workflow",
            json!({
                "project_description": "A journal for bird watchers",
                "name_ideas": ["Taken", "Kestrel"],
                "generate_count": 0
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["viable_count"], 1);
        assert_eq!(body["evaluated_count"], 1);
        assert_eq!(body["recommended"]["name"], "Kestrel");
        assert_eq!(body["recommended"]["source"], "user");

        let taken = &body["all_candidates"][0];
        assert_eq!(taken["passed_domain_filter"], false);
        assert_eq!(taken["rejection_reason"], "Neither .com nor .io available");
        assert!(taken["evaluation"].is_null());
    }
}
