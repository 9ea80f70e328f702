//! HTTP route handlers for the conductor service.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::state::AppState;

mod health;
mod rpc;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.rpc.max_body_bytes;

    Router::new()
        // JSON-RPC (conductor_* namespace)
        .route("/", post(rpc::handle))

        // Health & Status
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))

        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())

        // Add shared state
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conductor::StandaloneConductor;
    use crate::conductor::testing::StubConductor;
    use crate::config::AppConfig;
    use crate::rpc::ApiBackend;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;
    use tracing::Span;

    fn router_with(con: Arc<dyn crate::conductor::Conductor>, config: AppConfig) -> Router {
        let api = Arc::new(ApiBackend::new(Span::none(), con));
        create_router(AppState::new(config, api))
    }

    fn standalone() -> Arc<StandaloneConductor> {
        Arc::new(StandaloneConductor::new(
            "seq-1".to_string(),
            "10.0.0.1:50050".to_string(),
            false,
        ))
    }

    async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
        let request = Request::post("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = router_with(standalone(), AppConfig::default());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_follows_active() {
        let app = router_with(standalone(), AppConfig::default());
        let response = app
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["leader"], true);

        let app = router_with(
            Arc::new(StubConductor::with_flags(false, true)),
            AppConfig::default(),
        );
        let response = app
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_rpc_round_trip_against_standalone() {
        let con = standalone();
        let app = router_with(con.clone(), AppConfig::default());

        let (status, body) = post_json(
            app.clone(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "conductor_addServerAsVoter", "params": ["seq-2", "10.0.0.2:50050"]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"jsonrpc": "2.0", "id": 1, "result": null}));

        let (_, body) = post_json(
            app.clone(),
            json!({"jsonrpc": "2.0", "id": 2, "method": "conductor_addServerAsVoter", "params": ["seq-2", "10.0.0.2:50050"]}),
        )
        .await;
        assert_eq!(body["error"]["code"], -32000);
        assert_eq!(body["error"]["message"], "server already in cluster: seq-2");

        let (_, body) = post_json(
            app.clone(),
            json!({"jsonrpc": "2.0", "id": 3, "method": "conductor_transferLeaderToServer", "params": ["seq-2", "10.0.0.2:50050"]}),
        )
        .await;
        assert_eq!(body["result"], Value::Null);

        let (_, body) = post_json(
            app,
            json!([
                {"jsonrpc": "2.0", "id": 4, "method": "conductor_leader"},
                {"jsonrpc": "2.0", "id": 5, "method": "conductor_leaderWithID"},
            ]),
        )
        .await;
        assert_eq!(body[0]["result"], false);
        assert_eq!(body[1]["result"], json!({"id": "seq-2", "addr": "10.0.0.2:50050"}));
    }

    #[tokio::test]
    async fn test_pause_resume_toggle_active() {
        let con = standalone();
        let app = router_with(con.clone(), AppConfig::default());

        let (_, body) = post_json(
            app.clone(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "conductor_pause"}),
        )
        .await;
        assert_eq!(body["result"], Value::Null);

        let (_, body) = post_json(
            app.clone(),
            json!({"jsonrpc": "2.0", "id": 2, "method": "conductor_active"}),
        )
        .await;
        assert_eq!(body["result"], false);

        let (_, body) = post_json(
            app.clone(),
            json!({"jsonrpc": "2.0", "id": 3, "method": "conductor_resume"}),
        )
        .await;
        assert_eq!(body["result"], Value::Null);

        con.stop();
        let (_, body) = post_json(
            app,
            json!({"jsonrpc": "2.0", "id": 4, "method": "conductor_resume"}),
        )
        .await;
        assert_eq!(body["error"]["message"], "conductor is stopped");
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut config = AppConfig::default();
        config.rpc.max_body_bytes = 64;
        let app = router_with(standalone(), config);

        let request = Request::post("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(vec![b' '; 1024]))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
