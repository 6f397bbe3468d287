//! Pure computation engines for the IPO simulation.
//!
//! Every random draw goes through a caller-supplied `rand::Rng`, so a seeded
//! generator makes any run reproducible.

pub mod allotment;
pub mod listing;
pub mod portfolio;
pub mod rotation;
pub mod synthetic;
pub mod timeline;
pub mod window;

pub use allotment::{AllotmentResult, AllotmentStatus};
pub use listing::ListingPerformance;
pub use portfolio::to_holding;
pub use rotation::{RotationPool, RotationReport};
pub use timeline::{
    ApplicationTimeline, Milestone, MilestoneKind, TimelineError, TimelineOffsets, TimelinePhase,
    WithdrawalBlock,
};
