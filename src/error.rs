use crate::desk::DeskError;
use crate::domain::{Decimal, Symbol};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

/// Rejected preconditions at the engine boundary.
///
/// A NOT ALLOTTED outcome is a modeled result, never one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("lot count must be at least 1")]
    ZeroLots,
    #[error("issue price for {symbol} must be positive, got {issue_price}")]
    NonPositiveIssuePrice { symbol: Symbol, issue_price: Decimal },
    #[error("lot size for {0} must be positive")]
    ZeroLotSize(Symbol),
    #[error("invalid price band {0:?}")]
    InvalidPriceBand(String),
    #[error("invalid window: open {open}, close {close}, listing {listing:?}")]
    InvalidWindow {
        open: NaiveDate,
        close: NaiveDate,
        listing: Option<NaiveDate>,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<DeskError> for AppError {
    fn from(err: DeskError) -> Self {
        match err {
            DeskError::UnknownIpo(_) | DeskError::UnknownApplication(_) => {
                AppError::NotFound(err.to_string())
            }
            DeskError::NotOpen { .. } | DeskError::Engine(_) => {
                AppError::BadRequest(err.to_string())
            }
            DeskError::WithdrawalNotPermitted { .. } | DeskError::AlreadyWithdrawn(_) => {
                AppError::Conflict(err.to_string())
            }
            DeskError::Timeline(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
