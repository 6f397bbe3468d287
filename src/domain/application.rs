//! A user's subscription to an offering and the holding it may become.

use crate::domain::{Decimal, IpoId, Symbol, TimeMs};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Resolution state of an application. Transitions are one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Allotted,
    NotAllotted,
}

impl ApplicationStatus {
    /// Whether moving from `self` to `next` is allowed.
    pub fn can_become(&self, next: ApplicationStatus) -> bool {
        matches!(
            (self, next),
            (ApplicationStatus::Applied, ApplicationStatus::Allotted)
                | (ApplicationStatus::Applied, ApplicationStatus::NotAllotted)
        )
    }
}

/// Profit or loss against the issue price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pnl {
    pub change: Decimal,
    /// Formatted percentage, e.g. `"-4.25%"`.
    pub percent: String,
    pub positive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpoApplication {
    pub id: Uuid,
    pub ipo_id: IpoId,
    pub symbol: Symbol,
    pub lots: u32,
    /// Blocked amount: min investment times lots.
    pub amount: Decimal,
    pub issue_price: Decimal,
    pub status: ApplicationStatus,
    pub applied_at: TimeMs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnl: Option<Pnl>,
    #[serde(default)]
    pub withdrawn: bool,
}

impl IpoApplication {
    pub fn new(
        ipo_id: IpoId,
        symbol: Symbol,
        lots: u32,
        min_investment: Decimal,
        issue_price: Decimal,
        applied_at: TimeMs,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ipo_id,
            symbol,
            lots,
            amount: min_investment * Decimal::from(lots),
            issue_price,
            status: ApplicationStatus::Applied,
            applied_at,
            shares: None,
            listing_price: None,
            pnl: None,
            withdrawn: false,
        }
    }
}

/// Portfolio entry created from an allotted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: Symbol,
    pub quantity: u64,
    pub avg_price: Decimal,
    pub listing_price: Decimal,
    pub pnl: Pnl,
    #[serde(rename = "type")]
    pub kind: HoldingKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldingKind {
    #[serde(rename = "IPO")]
    Ipo,
}
