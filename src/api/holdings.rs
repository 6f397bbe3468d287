use super::AppState;
use crate::domain::Holding;
use crate::error::AppError;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsResponse {
    pub holdings: Vec<Holding>,
}

pub async fn get_holdings(
    State(state): State<AppState>,
) -> Result<Json<HoldingsResponse>, AppError> {
    let holdings = state.desk.holdings().await?;
    Ok(Json(HoldingsResponse { holdings }))
}
