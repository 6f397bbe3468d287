use super::AppState;
use crate::domain::{Ipo, IpoStatus};
use crate::error::AppError;
use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IposResponse {
    pub as_of: NaiveDate,
    pub open: Vec<IpoDto>,
    pub upcoming: Vec<IpoDto>,
    pub closed: Vec<IpoDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpoDto {
    #[serde(flatten)]
    pub ipo: Ipo,
    pub status: IpoStatus,
}

fn tag(ipos: Vec<Ipo>, status: IpoStatus) -> Vec<IpoDto> {
    ipos.into_iter().map(|ipo| IpoDto { ipo, status }).collect()
}

pub async fn get_ipos(State(state): State<AppState>) -> Result<Json<IposResponse>, AppError> {
    let snapshot = state.desk.rotate().await;
    Ok(Json(IposResponse {
        as_of: snapshot.as_of,
        open: tag(snapshot.open, IpoStatus::Open),
        upcoming: tag(snapshot.upcoming, IpoStatus::Upcoming),
        closed: tag(snapshot.closed, IpoStatus::Closed),
    }))
}
