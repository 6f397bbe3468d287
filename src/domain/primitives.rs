//! Domain primitives: TimeMs, Symbol, IpoId, RiskLevel.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Time in milliseconds since Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeMs(pub i64);

impl TimeMs {
    pub fn new(ms: i64) -> Self {
        TimeMs(ms)
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        TimeMs(chrono::Utc::now().timestamp_millis())
    }

    pub fn as_ms(&self) -> i64 {
        self.0
    }

    /// Offset this instant by a number of milliseconds.
    pub fn plus_ms(&self, delta_ms: i64) -> Self {
        TimeMs(self.0.saturating_add(delta_ms))
    }
}

/// Ticker symbol of an offering (e.g. "ZENTECH").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Symbol(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a symbol string is empty or not alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid symbol: {0:?}")]
pub struct SymbolParseError(pub String);

impl FromStr for Symbol {
    type Err = SymbolParseError;

    /// Symbols are case-insensitive on input and stored upper-case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || !trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '&')
        {
            return Err(SymbolParseError(s.to_string()));
        }
        Ok(Symbol(trimmed.to_ascii_uppercase()))
    }
}

/// Stable identifier of an offering. Recycled offerings get a derived id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IpoId(pub String);

impl IpoId {
    pub fn new(id: impl Into<String>) -> Self {
        IpoId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identity given to a closed offering when it is re-listed.
    pub fn recycled(&self, now: TimeMs) -> Self {
        IpoId(format!("{}-RECYCLED-{}", self.0, now.as_ms()))
    }
}

impl std::fmt::Display for IpoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Risk classification of an offering. Drives base allotment odds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// Any label outside the known three.
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    pub const KNOWN: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_parse_uppercases() {
        let symbol: Symbol = " zentech ".parse().unwrap();
        assert_eq!(symbol.as_str(), "ZENTECH");
    }

    #[test]
    fn test_symbol_parse_rejects_garbage() {
        assert!("".parse::<Symbol>().is_err());
        assert!("ZEN TECH".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_recycled_id_format() {
        let id = IpoId::new("IPO-007");
        assert_eq!(
            id.recycled(TimeMs::new(1_700_000_000_000)).as_str(),
            "IPO-007-RECYCLED-1700000000000"
        );
    }

    #[test]
    fn test_risk_level_serialization() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"Medium\"");
        let parsed: RiskLevel = serde_json::from_str("\"Extreme\"").unwrap();
        assert_eq!(parsed, RiskLevel::Unknown);
    }

    #[test]
    fn test_timems_ordering() {
        let t1 = TimeMs::new(1000);
        assert!(t1 < t1.plus_ms(1));
    }
}
