mod engine;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use color_eyre::eyre::WrapErr;
use serde_json::{json, Value};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use engine::DecideResponse;
use lib::{SearchConfig, SearchError};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Clone, Debug)]
struct AppState {
    defaults: SearchConfig,
}

enum ApiError {
    Decode(color_eyre::Report),
    Search(SearchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Decode(report) => (StatusCode::BAD_REQUEST, report.to_string()),
            ApiError::Search(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

async fn decide(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<DecideResponse>, ApiError> {
    let request = engine::decode_request(body).map_err(|report| {
        warn!("undecodable request: {report}");
        ApiError::Decode(report)
    })?;
    let response = engine::calc_decision(&request, &state.defaults).map_err(|err| {
        warn!("search failed: {err}");
        ApiError::Search(err)
    })?;
    info!(
        action = %response.action,
        value = response.value,
        strategy = %response.strategy,
        depth = response.depth,
        "decided"
    );
    Ok(Json(response))
}

async fn info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "strategy": state.defaults.strategy,
        "depth": state.defaults.depth,
    }))
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(info))
        .route("/info", get(info))
        .route("/decide", post(decide))
        .with_state(state)
}

/// `LOG_FORMAT=json` for machine-readable logs, `tree` for nested spans.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        Ok("tree") => tracing_subscriber::registry()
            .with(tracing_tree::HierarchicalLayer::new(2))
            .with(filter)
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    init_tracing();

    let defaults = SearchConfig::from_env()?;
    info!(strategy = %defaults.strategy, depth = defaults.depth, "Hello Searchers!");

    let port = std::env::var("PORT").wrap_err("Please set the PORT environment variable")?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    axum::serve(listener, app(AppState { defaults })).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use lib::StrategyKind;
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(AppState {
            defaults: SearchConfig::new(StrategyKind::AlphaBeta, 2),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_json(app: Router, uri: &str, json: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap();
        send(app, request).await
    }

    const TEXTBOOK: &str = r#"{
        "agents": 2,
        "root": { "children": [
            { "action": "A", "node": { "children": [
                { "action": "r0", "node": { "score": 3 } },
                { "action": "r1", "node": { "score": 12 } },
                { "action": "r2", "node": { "score": 8 } }
            ] } },
            { "action": "B", "node": { "children": [
                { "action": "r0", "node": { "score": 2 } },
                { "action": "r1", "node": { "score": 4 } },
                { "action": "r2", "node": { "score": 6 } }
            ] } },
            { "action": "C", "node": { "children": [
                { "action": "r0", "node": { "score": 14 } },
                { "action": "r1", "node": { "score": 5 } },
                { "action": "r2", "node": { "score": 2 } }
            ] } }
        ] }
    }"#;

    #[tokio::test]
    async fn test_info_reports_defaults() {
        let request = Request::builder().uri("/info").body(Body::empty()).unwrap();
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["strategy"], "alphabeta");
        assert_eq!(body["depth"], 2);
    }

    #[tokio::test]
    async fn test_decide_with_default_strategy() {
        let (status, body) = post_json(test_app(), "/decide", &format!(r#"{{"tree": {TEXTBOOK}}}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["action"], "A");
        assert_eq!(body["value"], 3.0);
        assert_eq!(body["strategy"], "alphabeta");
        assert_eq!(body["stats"]["leaves"], 7);
    }

    #[tokio::test]
    async fn test_decide_expectimax_override() {
        let json = format!(r#"{{"strategy": "expectimax", "depth": 1, "tree": {TEXTBOOK}}}"#);
        let (status, body) = post_json(test_app(), "/decide", &json).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["action"], "A");
        assert_eq!(body["strategy"], "expectimax");
        assert_eq!(body["depth"], 1);
    }

    #[tokio::test]
    async fn test_decide_rejects_zero_depth() {
        let json = format!(r#"{{"depth": 0, "tree": {TEXTBOOK}}}"#);
        let (status, body) = post_json(test_app(), "/decide", &json).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains('0'));
    }

    #[tokio::test]
    async fn test_decide_without_moves() {
        let json = r#"{"tree": {"agents": 2, "root": {"score": 1}}}"#;
        let (status, _) = post_json(test_app(), "/decide", json).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_decide_rejects_garbage() {
        let (status, body) = post_json(test_app(), "/decide", "{\"tree\": []").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}
