mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::test_context;
use linkhub::api::handlers::health_handler;
use serde_json::Value;

// The test pool points at a closed port, so the readiness probe reports
// the degraded shape rather than the happy path.
#[tokio::test]
async fn test_health_reports_degraded_when_database_is_down() {
    let ctx = test_context();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(ctx.state.clone());
    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["database"], "error");
}
