use super::AppState;
use axum::extract::State;
use axum::Json;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once the pool can be advanced and has at least one open offering.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.desk.rotate().await;
    Json(serde_json::json!({
        "status": "ready",
        "asOf": snapshot.as_of,
        "open": snapshot.open.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_returns_ok() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }
}
