//! Simulated listing-day prices.
//!
//! Two independent models live here and are intentionally not unified:
//! - [`generate`]: listing performance for an allotted application, volatility in [-20%, +40%).
//! - [`close_out`]: listing result stamped on an offering when rotation closes it,
//!   move in [-10%, +30%).

use crate::domain::{Decimal, ListingOutcome, Pnl};
use rand::Rng;
use serde::Serialize;

pub const LISTING_VOLATILITY_MIN: f64 = -0.20;
pub const LISTING_VOLATILITY_SPAN: f64 = 0.60;

pub const CLOSE_OUT_MOVE_MIN: f64 = -0.10;
pub const CLOSE_OUT_MOVE_SPAN: f64 = 0.40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPerformance {
    pub listed_price: Decimal,
    pub change: Decimal,
    /// Two decimals with a trailing `%`.
    pub percent_change: String,
    pub positive: bool,
}

impl ListingPerformance {
    pub fn pnl(&self) -> Pnl {
        Pnl {
            change: self.change,
            percent: self.percent_change.clone(),
            positive: self.positive,
        }
    }
}

/// Draw a listing performance for `issue_price`.
pub fn generate<R: Rng + ?Sized>(issue_price: Decimal, rng: &mut R) -> ListingPerformance {
    let volatility = rng.gen::<f64>() * LISTING_VOLATILITY_SPAN + LISTING_VOLATILITY_MIN;
    from_volatility(issue_price, volatility)
}

/// Deterministic half of [`generate`]: listed price is rounded to a whole number.
pub fn from_volatility(issue_price: Decimal, volatility: f64) -> ListingPerformance {
    let factor = Decimal::one() + Decimal::from_f64(volatility);
    let listed_price = (issue_price * factor).round_whole();
    let change = listed_price - issue_price;
    ListingPerformance {
        listed_price,
        change,
        percent_change: percent_of(change, issue_price),
        positive: !change.is_negative(),
    }
}

/// Draw the listing result stamped on an offering as it closes.
pub fn close_out<R: Rng + ?Sized>(issue_price: Decimal, rng: &mut R) -> ListingOutcome {
    let price_move = rng.gen::<f64>() * CLOSE_OUT_MOVE_SPAN + CLOSE_OUT_MOVE_MIN;
    close_out_with_move(issue_price, price_move)
}

/// Deterministic half of [`close_out`]: listing price is kept to two decimals.
pub fn close_out_with_move(issue_price: Decimal, price_move: f64) -> ListingOutcome {
    let actual_listing_price =
        (issue_price * (Decimal::one() + Decimal::from_f64(price_move))).round_dp(2);
    outcome_at(issue_price, actual_listing_price)
}

/// Listing outcome for a known listing price.
pub fn outcome_at(issue_price: Decimal, actual_listing_price: Decimal) -> ListingOutcome {
    ListingOutcome {
        actual_listing_price,
        listing_gain: percent_of(actual_listing_price - issue_price, issue_price),
    }
}

fn percent_of(change: Decimal, base: Decimal) -> String {
    if base.is_zero() {
        return Decimal::zero().to_percent_string();
    }
    (change / base * Decimal::hundred()).to_percent_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_from_volatility_positive_move() {
        let perf = from_volatility(d("100"), 0.25);
        assert_eq!(perf.listed_price, d("125"));
        assert_eq!(perf.change, d("25"));
        assert_eq!(perf.percent_change, "25.00%");
        assert!(perf.positive);
    }

    #[test]
    fn test_from_volatility_rounds_listed_price() {
        let perf = from_volatility(d("333"), -0.1);
        // 333 * 0.9 = 299.7
        assert_eq!(perf.listed_price, d("300"));
        assert_eq!(perf.change, d("-33"));
        assert_eq!(perf.percent_change, "-9.91%");
        assert!(!perf.positive);
    }

    #[test]
    fn test_flat_listing_counts_as_positive() {
        let perf = from_volatility(d("250"), 0.0);
        assert!(perf.change.is_zero());
        assert!(perf.positive);
        assert_eq!(perf.percent_change, "0.00%");
    }

    #[test]
    fn test_generate_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let perf = generate(d("1000"), &mut rng);
            assert!(perf.listed_price >= d("800"));
            assert!(perf.listed_price <= d("1400"));
        }
    }

    #[test]
    fn test_close_out_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let outcome = close_out(d("500"), &mut rng);
            assert!(outcome.actual_listing_price >= d("450"));
            assert!(outcome.actual_listing_price <= d("650"));
            assert!(outcome.listing_gain.ends_with('%'));
        }
    }

    #[test]
    fn test_close_out_with_move() {
        let outcome = close_out_with_move(d("200"), 0.125);
        assert_eq!(outcome.actual_listing_price, d("225"));
        assert_eq!(outcome.listing_gain, "12.50%");
    }
}
