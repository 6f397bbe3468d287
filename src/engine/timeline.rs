//! Per-application countdown: applied → allotment → listing → close.
//!
//! Milestone times are fixed when the application is created. Progress is
//! evaluated lazily against the wall clock on every read; nothing is scheduled.

use crate::domain::{ApplicationStatus, TimeMs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneKind {
    Applied,
    Allotment,
    Listing,
    Close,
}

impl MilestoneKind {
    pub const ORDER: [MilestoneKind; 4] = [
        MilestoneKind::Applied,
        MilestoneKind::Allotment,
        MilestoneKind::Listing,
        MilestoneKind::Close,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub time: TimeMs,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl Milestone {
    fn pending(time: TimeMs) -> Self {
        Self {
            time,
            completed: false,
            result: None,
        }
    }
}

/// Offsets of each milestone from the application time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineOffsets {
    pub allotment_ms: i64,
    pub listing_ms: i64,
    pub close_ms: i64,
}

impl Default for TimelineOffsets {
    /// Compressed demo schedule: one, two and four minutes.
    fn default() -> Self {
        Self {
            allotment_ms: 60_000,
            listing_ms: 120_000,
            close_ms: 240_000,
        }
    }
}

impl TimelineOffsets {
    pub fn is_ordered(&self) -> bool {
        0 <= self.allotment_ms && self.allotment_ms < self.listing_ms && self.listing_ms < self.close_ms
    }
}

/// Coarse position of an application on its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelinePhase {
    Applied,
    AllotmentAnnounced,
    Listed,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("milestone {attempted:?} completed out of order (next pending: {expected:?})")]
    OutOfOrder {
        expected: Option<MilestoneKind>,
        attempted: MilestoneKind,
    },
}

/// Why a withdrawal is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WithdrawalBlock {
    #[error("allotment has not been announced yet")]
    AwaitingAllotment,
    #[error("allotted shares can be withdrawn only after the close milestone")]
    AwaitingClose,
    #[error("application already withdrawn")]
    AlreadyWithdrawn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationTimeline {
    pub applied: Milestone,
    pub allotment: Milestone,
    pub listing: Milestone,
    pub close: Milestone,
}

impl ApplicationTimeline {
    pub fn new(applied_at: TimeMs, offsets: TimelineOffsets) -> Self {
        Self {
            applied: Milestone {
                time: applied_at,
                completed: true,
                result: None,
            },
            allotment: Milestone::pending(applied_at.plus_ms(offsets.allotment_ms)),
            listing: Milestone::pending(applied_at.plus_ms(offsets.listing_ms)),
            close: Milestone::pending(applied_at.plus_ms(offsets.close_ms)),
        }
    }

    pub fn milestone(&self, kind: MilestoneKind) -> &Milestone {
        match kind {
            MilestoneKind::Applied => &self.applied,
            MilestoneKind::Allotment => &self.allotment,
            MilestoneKind::Listing => &self.listing,
            MilestoneKind::Close => &self.close,
        }
    }

    fn milestone_mut(&mut self, kind: MilestoneKind) -> &mut Milestone {
        match kind {
            MilestoneKind::Applied => &mut self.applied,
            MilestoneKind::Allotment => &mut self.allotment,
            MilestoneKind::Listing => &mut self.listing,
            MilestoneKind::Close => &mut self.close,
        }
    }

    /// Earliest milestone not yet completed.
    pub fn next_pending(&self) -> Option<MilestoneKind> {
        MilestoneKind::ORDER
            .into_iter()
            .find(|kind| !self.milestone(*kind).completed)
    }

    /// The next pending milestone, if its time has been reached.
    pub fn due(&self, now: TimeMs) -> Option<MilestoneKind> {
        self.next_pending()
            .filter(|kind| self.milestone(*kind).time <= now)
    }

    pub fn is_completed(&self, kind: MilestoneKind) -> bool {
        self.milestone(kind).completed
    }

    /// Mark `kind` complete. Only the next pending milestone may complete;
    /// a stored result is never replaced.
    pub fn complete(
        &mut self,
        kind: MilestoneKind,
        result: Option<String>,
    ) -> Result<(), TimelineError> {
        let expected = self.next_pending();
        if expected != Some(kind) {
            return Err(TimelineError::OutOfOrder {
                expected,
                attempted: kind,
            });
        }
        let milestone = self.milestone_mut(kind);
        milestone.completed = true;
        if milestone.result.is_none() {
            milestone.result = result;
        }
        Ok(())
    }

    pub fn phase(&self) -> TimelinePhase {
        if self.close.completed {
            TimelinePhase::Closed
        } else if self.listing.completed {
            TimelinePhase::Listed
        } else if self.allotment.completed {
            TimelinePhase::AllotmentAnnounced
        } else {
            TimelinePhase::Applied
        }
    }

    /// Milliseconds until the next pending milestone (zero when overdue).
    pub fn millis_until_next(&self, now: TimeMs) -> Option<i64> {
        self.next_pending()
            .map(|kind| (self.milestone(kind).time.as_ms() - now.as_ms()).max(0))
    }

    /// Withdrawal rules: never before allotment; refunds right after a rejection;
    /// allotted principal plus P&L only after the close milestone.
    pub fn check_withdrawal(
        &self,
        status: ApplicationStatus,
        withdrawn: bool,
    ) -> Result<(), WithdrawalBlock> {
        if withdrawn {
            return Err(WithdrawalBlock::AlreadyWithdrawn);
        }
        match status {
            ApplicationStatus::Applied => Err(WithdrawalBlock::AwaitingAllotment),
            ApplicationStatus::NotAllotted => Ok(()),
            ApplicationStatus::Allotted if self.close.completed => Ok(()),
            ApplicationStatus::Allotted => Err(WithdrawalBlock::AwaitingClose),
        }
    }
}
