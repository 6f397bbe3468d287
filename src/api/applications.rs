use super::AppState;
use crate::desk::{ApplicationView, WithdrawalReceipt};
use crate::domain::Symbol;
use crate::error::AppError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub symbol: String,
    pub lots: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationsResponse {
    pub applications: Vec<ApplicationView>,
}

fn parse_lots(lots: i64) -> Result<u32, AppError> {
    u32::try_from(lots)
        .ok()
        .filter(|l| *l > 0)
        .ok_or_else(|| AppError::BadRequest("lots must be a positive whole number".into()))
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid application id".into()))
}

pub async fn create_application(
    State(state): State<AppState>,
    Json(body): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationView>), AppError> {
    let symbol = Symbol::from_str(&body.symbol)
        .map_err(|_| AppError::BadRequest("Invalid symbol".into()))?;
    let lots = parse_lots(body.lots)?;

    let view = state.desk.apply(&symbol, lots).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn list_applications(
    State(state): State<AppState>,
) -> Result<Json<ApplicationsResponse>, AppError> {
    let applications = state.desk.applications().await?;
    Ok(Json(ApplicationsResponse { applications }))
}

pub async fn get_application(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApplicationView>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.desk.application(id).await?))
}

pub async fn withdraw_application(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WithdrawalReceipt>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.desk.withdraw(id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lots_bounds() {
        assert_eq!(parse_lots(3).unwrap(), 3);
        assert!(parse_lots(0).is_err());
        assert!(parse_lots(-2).is_err());
        assert!(parse_lots(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(parse_id("not-a-uuid").is_err());
        assert!(parse_id("7f0c2a52-3c4d-4c4e-9a0e-2b8f3f1e9a11").is_ok());
    }
}
