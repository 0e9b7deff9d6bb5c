//! Health endpoint integration tests

use sweepbot::services::health;

#[tokio::test]
async fn health_endpoint_returns_static_liveness_body() {
    let (addr, handle) = health::serve("127.0.0.1:0").await.unwrap();

    let response = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "Bot is alive.");

    handle.abort();
}

#[tokio::test]
async fn health_endpoint_has_no_other_routes() {
    let (addr, handle) = health::serve("127.0.0.1:0").await.unwrap();

    let response = reqwest::get(format!("http://{addr}/metrics")).await.unwrap();
    assert_eq!(response.status(), 404);

    handle.abort();
}

#[tokio::test]
async fn serve_rejects_malformed_bind_address() {
    assert!(health::serve("not-an-address").await.is_err());
}
