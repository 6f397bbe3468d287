use super::AppState;
use axum::extract::State;
use axum::http::StatusCode;

/// Wipe the rotation pool; the next read re-seeds it from the catalog.
pub async fn reset_pool(State(state): State<AppState>) -> StatusCode {
    state.desk.reset().await;
    StatusCode::NO_CONTENT
}
