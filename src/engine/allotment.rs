//! Risk-weighted allotment draw.

use crate::domain::{Decimal, Ipo, RiskLevel};
use crate::error::EngineError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Odds reduction per applied lot.
pub const LOT_PENALTY_PER_LOT: f64 = 0.05;
/// Upper bound on the total lot penalty.
pub const LOT_PENALTY_CAP: f64 = 0.20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllotmentStatus {
    #[serde(rename = "ALLOTTED")]
    Allotted,
    #[serde(rename = "NOT ALLOTTED")]
    NotAllotted,
}

impl AllotmentStatus {
    /// Label shown on the allotment milestone.
    pub fn label(&self) -> &'static str {
        match self {
            AllotmentStatus::Allotted => "Allotted",
            AllotmentStatus::NotAllotted => "Not Allotted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllotmentResult {
    pub status: AllotmentStatus,
    pub shares: u64,
    pub refund: Decimal,
}

impl AllotmentResult {
    pub fn is_allotted(&self) -> bool {
        self.status == AllotmentStatus::Allotted
    }
}

/// Base odds before the lot penalty.
pub fn base_odds(risk: RiskLevel) -> f64 {
    match risk {
        RiskLevel::Low => 0.70,
        RiskLevel::Medium => 0.45,
        RiskLevel::High => 0.25,
        RiskLevel::Unknown => 0.40,
    }
}

/// Penalty for applying with `lots` lots, capped at [`LOT_PENALTY_CAP`].
pub fn lot_penalty(lots: u32) -> f64 {
    (f64::from(lots) * LOT_PENALTY_PER_LOT).min(LOT_PENALTY_CAP)
}

/// Final probability of allotment. Non-increasing in `lots`.
pub fn final_odds(risk: RiskLevel, lots: u32) -> f64 {
    base_odds(risk) - lot_penalty(lots)
}

/// Resolve one application with a fresh uniform draw.
pub fn resolve<R: Rng + ?Sized>(
    ipo: &Ipo,
    lots: u32,
    rng: &mut R,
) -> Result<AllotmentResult, EngineError> {
    let draw = rng.gen::<f64>();
    resolve_with_draw(ipo, lots, draw)
}

/// Resolve one application against an explicit draw in `[0, 1)`.
///
/// Allotted when `draw < final_odds`.
pub fn resolve_with_draw(ipo: &Ipo, lots: u32, draw: f64) -> Result<AllotmentResult, EngineError> {
    if lots == 0 {
        return Err(EngineError::ZeroLots);
    }
    ipo.validate()?;

    let result = if draw < final_odds(ipo.risk_level, lots) {
        AllotmentResult {
            status: AllotmentStatus::Allotted,
            shares: u64::from(ipo.lot_size) * u64::from(lots),
            refund: Decimal::zero(),
        }
    } else {
        AllotmentResult {
            status: AllotmentStatus::NotAllotted,
            shares: 0,
            refund: ipo.lot_cost() * Decimal::from(lots),
        }
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_odds_table() {
        assert_eq!(base_odds(RiskLevel::Low), 0.70);
        assert_eq!(base_odds(RiskLevel::Medium), 0.45);
        assert_eq!(base_odds(RiskLevel::High), 0.25);
        assert_eq!(base_odds(RiskLevel::Unknown), 0.40);
    }

    #[test]
    fn test_lot_penalty_caps_at_four_lots() {
        assert!((lot_penalty(1) - 0.05).abs() < 1e-12);
        assert!((lot_penalty(3) - 0.15).abs() < 1e-12);
        assert_eq!(lot_penalty(4), 0.20);
        assert_eq!(lot_penalty(50), 0.20);
    }

    #[test]
    fn test_odds_non_increasing_in_lots() {
        for risk in RiskLevel::KNOWN.into_iter().chain([RiskLevel::Unknown]) {
            let mut previous = final_odds(risk, 1);
            for lots in 2..=20 {
                let odds = final_odds(risk, lots);
                assert!(odds <= previous, "{risk} odds rose at {lots} lots");
                previous = odds;
            }
        }
    }

    #[test]
    fn test_status_labels_and_wire_names() {
        assert_eq!(AllotmentStatus::NotAllotted.label(), "Not Allotted");
        assert_eq!(
            serde_json::to_string(&AllotmentStatus::NotAllotted).unwrap(),
            "\"NOT ALLOTTED\""
        );
    }
}
