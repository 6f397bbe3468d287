use chrono::NaiveDate;
use iposim::catalog::{Catalog, StaticCatalog};
use iposim::domain::{Decimal, HoldingKind, Ipo, IpoId, IpoWindow, PriceBand, RiskLevel, Symbol};
use iposim::engine::allotment::{self, AllotmentStatus};
use iposim::engine::portfolio;
use iposim::EngineError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn d(s: &str) -> Decimal {
    Decimal::from_str_canonical(s).unwrap()
}

fn ipo(risk: RiskLevel, issue: &str, lot_size: u32) -> Ipo {
    let issue_price = d(issue);
    Ipo {
        id: IpoId::new("IPO-T"),
        symbol: Symbol::new("TESTCO"),
        name: "Test Co Ltd".to_string(),
        sector: "Technology".to_string(),
        price_band: PriceBand::new(issue_price, issue_price).unwrap(),
        issue_price,
        lot_size,
        min_investment: issue_price * Decimal::from(lot_size),
        issue_size: "₹100 Cr".to_string(),
        risk_level: risk,
        description: String::new(),
        window: IpoWindow::starting(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()),
        listing: None,
    }
}

#[test]
fn test_allotted_conserves_shares() {
    for risk in RiskLevel::KNOWN {
        let ipo = ipo(risk, "270", 55);
        for lots in 1..=10u32 {
            let result = allotment::resolve_with_draw(&ipo, lots, 0.0).unwrap();
            assert_eq!(result.status, AllotmentStatus::Allotted);
            assert_eq!(result.shares, 55 * u64::from(lots));
            assert!(result.refund.is_zero());
        }
    }
}

#[test]
fn test_not_allotted_refunds_full_cost() {
    for risk in RiskLevel::KNOWN {
        let ipo = ipo(risk, "432.50", 34);
        for lots in 1..=10u32 {
            let result = allotment::resolve_with_draw(&ipo, lots, 0.999).unwrap();
            assert_eq!(result.status, AllotmentStatus::NotAllotted);
            assert_eq!(result.shares, 0);
            assert_eq!(result.refund, d("432.50") * Decimal::from(34u32) * Decimal::from(lots));
        }
    }
}

#[test]
fn test_odds_non_increasing_in_lots() {
    for risk in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High, RiskLevel::Unknown] {
        let mut previous = allotment::final_odds(risk, 1);
        for lots in 2..=20u32 {
            let odds = allotment::final_odds(risk, lots);
            assert!(odds <= previous, "{:?} odds rose at {} lots", risk, lots);
            assert!(odds > 0.0);
            previous = odds;
        }
    }
}

#[test]
fn test_draw_boundary_for_low_risk_single_lot() {
    let ipo = ipo(RiskLevel::Low, "100", 10);
    assert!(allotment::resolve_with_draw(&ipo, 1, 0.649).unwrap().is_allotted());
    assert!(!allotment::resolve_with_draw(&ipo, 1, 0.651).unwrap().is_allotted());
}

#[test]
fn test_low_risk_single_lot_rate_near_sixty_five_percent() {
    let ipo = ipo(RiskLevel::Low, "100", 10);
    let mut rng = StdRng::seed_from_u64(2024);
    let trials = 20_000;
    let allotted = (0..trials)
        .filter(|_| allotment::resolve(&ipo, 1, &mut rng).unwrap().is_allotted())
        .count();
    let rate = allotted as f64 / trials as f64;
    assert!((rate - 0.65).abs() < 0.02, "rate was {}", rate);
}

#[test]
fn test_rejects_bad_inputs() {
    let good = ipo(RiskLevel::Medium, "100", 10);
    assert_eq!(
        allotment::resolve_with_draw(&good, 0, 0.1),
        Err(EngineError::ZeroLots)
    );

    let mut free = good.clone();
    free.issue_price = Decimal::zero();
    assert!(matches!(
        allotment::resolve_with_draw(&free, 1, 0.1),
        Err(EngineError::NonPositiveIssuePrice { .. })
    ));

    let mut no_lot = good;
    no_lot.lot_size = 0;
    assert!(matches!(
        allotment::resolve_with_draw(&no_lot, 1, 0.1),
        Err(EngineError::ZeroLotSize(_))
    ));
}

#[test]
fn test_not_allotted_never_becomes_a_holding() {
    let mut rng = StdRng::seed_from_u64(5);
    let seed = StaticCatalog::builtin().seed();
    for ipo in seed.open.iter().chain(&seed.upcoming).chain(&seed.closed) {
        let result = allotment::resolve_with_draw(ipo, 2, 0.999).unwrap();
        assert!(portfolio::to_holding(ipo, &result, &mut rng).is_none());
    }
}

#[test]
fn test_allotted_holding_is_consistent() {
    let ipo = ipo(RiskLevel::High, "190", 78);
    let mut rng = StdRng::seed_from_u64(6);
    let result = allotment::resolve_with_draw(&ipo, 3, 0.0).unwrap();
    let holding = portfolio::to_holding(&ipo, &result, &mut rng).unwrap();

    assert_eq!(holding.symbol, Symbol::new("TESTCO"));
    assert_eq!(holding.quantity, 234);
    assert_eq!(holding.avg_price, d("190"));
    assert_eq!(holding.kind, HoldingKind::Ipo);
    assert_eq!(holding.listing_price - holding.avg_price, holding.pnl.change);
    assert_eq!(holding.pnl.positive, !holding.pnl.change.is_negative());
    assert!(holding.pnl.percent.ends_with('%'));
    assert!(holding.listing_price >= d("152"));
    assert!(holding.listing_price <= d("266"));
}
