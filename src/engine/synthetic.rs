//! Generator for offerings injected when the open pool would otherwise be empty.

use super::window;
use crate::domain::{Decimal, Ipo, IpoId, PriceBand, RiskLevel, Symbol, TimeMs};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

const SECTORS: &[&str] = &[
    "Technology",
    "Healthcare",
    "Renewable Energy",
    "Financial Services",
    "Consumer Goods",
    "Infrastructure",
    "Logistics",
    "Specialty Chemicals",
];

const NAME_STEMS: &[&str] = &[
    "Aarav", "Nimbus", "Vistara", "Kaveri", "Orion", "Sahyadri", "Trident", "Zenith",
];

const NAME_SUFFIXES: &[&str] = &["Industries", "Technologies", "Ventures", "Enterprises", "Systems"];

/// Target cost of one lot; lot size is derived from the issue price.
const TARGET_LOT_COST: u32 = 15_000;

/// Build a randomized offering whose window contains `today`.
pub fn synthesize<R: Rng + ?Sized>(today: NaiveDate, now: TimeMs, rng: &mut R) -> Ipo {
    let sector = SECTORS.choose(rng).copied().unwrap_or("Technology");
    let stem = NAME_STEMS.choose(rng).copied().unwrap_or("Nimbus");
    let suffix = NAME_SUFFIXES.choose(rng).copied().unwrap_or("Ventures");
    let risk_level = RiskLevel::KNOWN
        .choose(rng)
        .copied()
        .unwrap_or(RiskLevel::Medium);

    let low: u32 = rng.gen_range(50..=900);
    let high = low + rng.gen_range(5..=40);
    let lot_size = (TARGET_LOT_COST / high).max(1);
    let issue_price = Decimal::from(high);
    let min_investment = issue_price * Decimal::from(lot_size);
    let issue_size_cr: u32 = rng.gen_range(200..=5_000);

    let symbol_tail: u32 = rng.gen_range(100..=999);
    let symbol = Symbol::new(format!(
        "{}{}",
        stem.to_ascii_uppercase().chars().take(4).collect::<String>(),
        symbol_tail
    ));

    Ipo {
        id: IpoId::new(format!("SYN-{}-{}", now.as_ms(), symbol_tail)),
        symbol,
        name: format!("{} {} Ltd", stem, suffix),
        sector: sector.to_string(),
        price_band: PriceBand {
            low: Decimal::from(low),
            high: issue_price,
        },
        issue_price,
        lot_size,
        min_investment,
        issue_size: format!("₹{} Cr", issue_size_cr),
        risk_level,
        description: format!(
            "{} {} is a {} company raising fresh capital for expansion.",
            stem,
            suffix,
            sector.to_lowercase()
        ),
        window: window::open_window(today, rng),
        listing: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IpoStatus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_synthesized_ipo_is_open_and_well_formed() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for i in 0..100 {
            let ipo = synthesize(today, TimeMs::new(i), &mut rng);
            assert_eq!(ipo.status_on(today), IpoStatus::Open);
            assert!(ipo.validate().is_ok());
            assert!(ipo.price_band.low <= ipo.price_band.high);
            assert_eq!(ipo.issue_price, ipo.price_band.high);
            assert_eq!(ipo.min_investment, ipo.lot_cost());
            assert!(ipo.listing.is_none());
        }
    }
}
