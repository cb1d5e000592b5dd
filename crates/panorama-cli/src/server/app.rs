//! Axum application setup.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::handlers;
use super::state::AppState;
use crate::web::static_handler;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/catalog", get(handlers::get_catalog))
        .route("/evaluate", post(handlers::evaluate))
        .route("/preview", post(handlers::get_data_preview));

    Router::new()
        .nest("/api", api_routes)
        .fallback(static_handler)
        .layer(cors)
        .with_state(state)
}

/// Start the web server and run until Ctrl+C.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use panorama::{CatalogSpec, Dashboard, Parser};
    use serde_json::{Value, json};
    use std::path::PathBuf;
    use tower::ServiceExt;

    const SURVEY: &str = "\
weight,gender,region,atlas_mh_index,atlas_pergunta_6
1,F,North,10,\"[{'label': 'Q1', 'value': 3}]\"
3,M,South,20,\"[{'label': 'Q1', 'value': 5}]\"
";

    fn router() -> Router {
        let table = Parser::new().parse_bytes(SURVEY.as_bytes()).unwrap();
        let spec = CatalogSpec::default()
            .with_filter("Regional", "region", "Região")
            .with_questionnaire("atlas_pergunta_6", "Pergunta 6");
        let dashboard = Dashboard::from_table(table, &spec).unwrap();
        create_router(AppState::new(dashboard, PathBuf::from("survey.csv")))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_catalog_lists_present_dimensions() {
        let request = Request::builder().uri("/api/catalog").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"]["respondents"], 2);
        assert_eq!(body["source"]["total_weight"], 4.0);
        assert_eq!(body["metrics"][0]["id"], "icasm");

        let keys: Vec<String> = body["sections"]
            .as_array()
            .unwrap()
            .iter()
            .flat_map(|s| s["dimensions"].as_array().unwrap().clone())
            .map(|d| d["key"]["column"].as_str().unwrap().to_string())
            .collect();
        assert!(keys.contains(&"gender".to_string()));
        assert!(keys.contains(&"atlas_pergunta_6".to_string()));
        assert!(!keys.contains(&"race".to_string()));
        assert!(body["skipped_columns"]
            .as_array()
            .unwrap()
            .contains(&json!("race")));
    }

    #[tokio::test]
    async fn test_evaluate_filtered_query() {
        let query = json!({
            "filters": [
                {"dimension": {"kind": "plain", "column": "gender"}, "selection": ["F"]}
            ],
            "metric": "icasm"
        });
        let (status, body) = send(post_json("/api/evaluate", query)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "populated");
        assert_eq!(body["respondents"], 1);
        assert_eq!(body["share"], 25.0);
        assert_eq!(body["metric"]["value"], 10.0);
    }

    #[tokio::test]
    async fn test_evaluate_question_filter_with_breakdown() {
        let query = json!({
            "filters": [{
                "dimension": {"kind": "question", "column": "atlas_pergunta_6", "label": "Q1"},
                "selection": [5]
            }],
            "metric": "icasm",
            "breakdown": {"kind": "plain", "column": "region"}
        });
        let (status, body) = send(post_json("/api/evaluate", query)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["share"], 75.0);
        let groups = body["breakdown"]["groups"].as_array().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0]["value"], "South");
        assert_eq!(groups[0]["share"], 100.0);
    }

    #[tokio::test]
    async fn test_evaluate_empty_selection_reports_unavailable() {
        let query = json!({
            "filters": [
                {"dimension": {"kind": "plain", "column": "gender"}, "selection": ["X"]}
            ],
            "metric": "icasm"
        });
        let (status, body) = send(post_json("/api/evaluate", query)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "empty");
        assert_eq!(body["share"], 0.0);
        assert!(body["metric"]["value"].is_null());
    }

    #[tokio::test]
    async fn test_evaluate_sentinel_selection_is_unfiltered() {
        let query = json!({
            "filters": [
                {"dimension": {"kind": "plain", "column": "gender"}, "selection": ["Todos"]}
            ],
            "metric": "icasm"
        });
        let (status, body) = send(post_json("/api/evaluate", query)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["respondents"], 2);
        assert_eq!(body["share"], 100.0);
    }

    #[tokio::test]
    async fn test_evaluate_empty_share_is_positive_zero() {
        let query = json!({
            "filters": [
                {"dimension": {"kind": "plain", "column": "gender"}, "selection": ["X"]}
            ],
            "metric": "icasm"
        });
        let request = post_json("/api/evaluate", query);
        let response = router().oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains(r#""share":0.0"#), "{text}");
    }

    #[tokio::test]
    async fn test_evaluate_unknown_metric_is_not_found() {
        let (status, body) =
            send(post_json("/api/evaluate", json!({"metric": "nonexistent"}))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_preview_respects_filters_and_limit() {
        let request = json!({
            "filters": [
                {"dimension": {"kind": "plain", "column": "region"}, "selection": ["South"]}
            ],
            "limit": 10
        });
        let (status, body) = send(post_json("/api/preview", request)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_rows"], 1);
        assert_eq!(body["truncated"], false);
        assert_eq!(body["rows"][0][1], "M");
    }

    #[tokio::test]
    async fn test_fallback_serves_index() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
    }
}
