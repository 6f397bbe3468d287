use super::allotment::AllotmentResult;
use super::listing::{self, ListingPerformance};
use crate::domain::{Holding, HoldingKind, Ipo};
use rand::Rng;

/// Convert an allotment into a portfolio holding.
///
/// Returns `None` for anything other than an allotted result.
pub fn to_holding<R: Rng + ?Sized>(
    ipo: &Ipo,
    result: &AllotmentResult,
    rng: &mut R,
) -> Option<Holding> {
    if !result.is_allotted() {
        return None;
    }
    let performance = listing::generate(ipo.issue_price, rng);
    Some(holding_from_performance(ipo, result, &performance))
}

/// Assemble a holding from an already drawn listing performance.
pub fn holding_from_performance(
    ipo: &Ipo,
    result: &AllotmentResult,
    performance: &ListingPerformance,
) -> Holding {
    Holding {
        symbol: ipo.symbol.clone(),
        quantity: result.shares,
        avg_price: ipo.issue_price,
        listing_price: performance.listed_price,
        pnl: performance.pnl(),
        kind: HoldingKind::Ipo,
    }
}
