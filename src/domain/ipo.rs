//! The offering record and its calendar window.

use crate::domain::{Decimal, IpoId, RiskLevel, Symbol};
use crate::error::EngineError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Days between the close of subscription and listing when no listing date is known.
pub const LISTING_LAG_DAYS: u64 = 5;

/// Length of the subscription window: close = open + 3 days.
pub const SUBSCRIPTION_DAYS: u64 = 3;

/// Category of an offering relative to a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpoStatus {
    Upcoming,
    Open,
    Closed,
}

impl fmt::Display for IpoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpoStatus::Upcoming => write!(f, "upcoming"),
            IpoStatus::Open => write!(f, "open"),
            IpoStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Price band, serialized as `"low-high"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PriceBand {
    pub low: Decimal,
    pub high: Decimal,
}

impl PriceBand {
    pub fn new(low: Decimal, high: Decimal) -> Result<Self, EngineError> {
        if !low.is_positive() || high < low {
            return Err(EngineError::InvalidPriceBand(format!("{}-{}", low, high)));
        }
        Ok(Self { low, high })
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

impl FromStr for PriceBand {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (low, high) = s
            .split_once('-')
            .ok_or_else(|| EngineError::InvalidPriceBand(s.to_string()))?;
        let parse = |part: &str| {
            Decimal::from_str_canonical(part.trim())
                .map_err(|_| EngineError::InvalidPriceBand(s.to_string()))
        };
        PriceBand::new(parse(low)?, parse(high)?)
    }
}

impl From<PriceBand> for String {
    fn from(band: PriceBand) -> Self {
        band.to_string()
    }
}

impl TryFrom<String> for PriceBand {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Subscription and listing dates at day granularity.
///
/// Invariant: `open_date <= close_date < listing_date` (when a listing date is set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpoWindow {
    pub open_date: NaiveDate,
    pub close_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_date: Option<NaiveDate>,
}

impl IpoWindow {
    pub fn new(
        open_date: NaiveDate,
        close_date: NaiveDate,
        listing_date: Option<NaiveDate>,
    ) -> Result<Self, EngineError> {
        let listing_ok = listing_date.map_or(true, |listing| close_date < listing);
        if open_date > close_date || !listing_ok {
            return Err(EngineError::InvalidWindow {
                open: open_date,
                close: close_date,
                listing: listing_date,
            });
        }
        Ok(Self {
            open_date,
            close_date,
            listing_date,
        })
    }

    /// Standard window: close three days after open, listing five days after close.
    pub fn starting(open_date: NaiveDate) -> Self {
        let close_date = open_date + Days::new(SUBSCRIPTION_DAYS);
        Self {
            open_date,
            close_date,
            listing_date: Some(close_date + Days::new(LISTING_LAG_DAYS)),
        }
    }

    /// Status is a pure function of the window and the day asked about.
    pub fn status_on(&self, today: NaiveDate) -> IpoStatus {
        if today < self.open_date {
            IpoStatus::Upcoming
        } else if today <= self.close_date {
            IpoStatus::Open
        } else {
            IpoStatus::Closed
        }
    }

    pub fn listing_date_or_default(&self) -> NaiveDate {
        self.listing_date
            .unwrap_or(self.close_date + Days::new(LISTING_LAG_DAYS))
    }
}

/// Listing result of a closed offering. Assigned once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingOutcome {
    pub actual_listing_price: Decimal,
    /// Formatted percentage, e.g. `"12.40%"`.
    pub listing_gain: String,
}

/// One public offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ipo {
    pub id: IpoId,
    pub symbol: Symbol,
    pub name: String,
    pub sector: String,
    pub price_band: PriceBand,
    pub issue_price: Decimal,
    pub lot_size: u32,
    pub min_investment: Decimal,
    pub issue_size: String,
    pub risk_level: RiskLevel,
    pub description: String,
    #[serde(flatten)]
    pub window: IpoWindow,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub listing: Option<ListingOutcome>,
}

impl Ipo {
    pub fn status_on(&self, today: NaiveDate) -> IpoStatus {
        self.window.status_on(today)
    }

    /// Cost of one lot at the issue price.
    pub fn lot_cost(&self) -> Decimal {
        self.issue_price * Decimal::from(self.lot_size)
    }

    /// Precondition check applied before any engine computation.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.issue_price.is_positive() {
            return Err(EngineError::NonPositiveIssuePrice {
                symbol: self.symbol.clone(),
                issue_price: self.issue_price,
            });
        }
        if self.lot_size == 0 {
            return Err(EngineError::ZeroLotSize(self.symbol.clone()));
        }
        Ok(())
    }

    /// Attach a listing outcome. An existing outcome is never overwritten.
    pub fn settle_listing(&mut self, outcome: ListingOutcome) {
        if self.listing.is_none() {
            self.listing = Some(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_standard_window_offsets() {
        let window = IpoWindow::starting(date("2024-06-01"));
        assert_eq!(window.close_date, date("2024-06-04"));
        assert_eq!(window.listing_date, Some(date("2024-06-09")));
    }

    #[test]
    fn test_status_boundaries_are_inclusive() {
        let window = IpoWindow::starting(date("2024-06-01"));
        assert_eq!(window.status_on(date("2024-05-31")), IpoStatus::Upcoming);
        assert_eq!(window.status_on(date("2024-06-01")), IpoStatus::Open);
        assert_eq!(window.status_on(date("2024-06-04")), IpoStatus::Open);
        assert_eq!(window.status_on(date("2024-06-05")), IpoStatus::Closed);
    }

    #[test]
    fn test_window_rejects_listing_on_close_day() {
        let result = IpoWindow::new(date("2024-06-01"), date("2024-06-04"), Some(date("2024-06-04")));
        assert!(matches!(result, Err(EngineError::InvalidWindow { .. })));
    }

    #[test]
    fn test_listing_date_default() {
        let window = IpoWindow::new(date("2024-06-01"), date("2024-06-04"), None).unwrap();
        assert_eq!(window.listing_date_or_default(), date("2024-06-09"));
    }

    #[test]
    fn test_price_band_string_form() {
        let band: PriceBand = "240-252".parse().unwrap();
        assert_eq!(band.to_string(), "240-252");
        assert_eq!(serde_json::to_string(&band).unwrap(), "\"240-252\"");
        assert!("252-240".parse::<PriceBand>().is_err());
        assert!("abc".parse::<PriceBand>().is_err());
    }
}
