//! Domain types for the IPO simulation.
//!
//! This module provides:
//! - Lossless money handling via the Decimal wrapper
//! - Primitives: TimeMs, Symbol, IpoId, RiskLevel
//! - The offering record with its calendar window and listing outcome
//! - Applications and the holdings they turn into

pub mod application;
pub mod decimal;
pub mod ipo;
pub mod primitives;

pub use application::{ApplicationStatus, Holding, HoldingKind, IpoApplication, Pnl};
pub use decimal::Decimal;
pub use ipo::{Ipo, IpoStatus, IpoWindow, ListingOutcome, PriceBand};
pub use primitives::{IpoId, RiskLevel, Symbol, SymbolParseError, TimeMs};
