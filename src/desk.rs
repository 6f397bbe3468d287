//! Single-writer owner of the rotation pool and the application book.
//!
//! All mutable state sits behind one lock. Reading the pool always advances it
//! first, so callers never observe a pool that is stale relative to the clock.

use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::config::Config;
use crate::domain::{
    ApplicationStatus, Decimal, Holding, Ipo, IpoApplication, IpoStatus, Symbol, TimeMs,
};
use crate::engine::allotment::{self, AllotmentResult};
use crate::engine::timeline::{
    ApplicationTimeline, MilestoneKind, TimelineError, TimelineOffsets, TimelinePhase,
    WithdrawalBlock,
};
use crate::engine::{portfolio, RotationPool, RotationReport};
use crate::error::EngineError;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("unknown IPO symbol {0}")]
    UnknownIpo(Symbol),
    #[error("IPO {symbol} is {status}, not open for subscription")]
    NotOpen { symbol: Symbol, status: IpoStatus },
    #[error("unknown application {0}")]
    UnknownApplication(Uuid),
    #[error("withdrawal not permitted for {id}: {reason}")]
    WithdrawalNotPermitted { id: Uuid, reason: WithdrawalBlock },
    #[error("application {0} already withdrawn")]
    AlreadyWithdrawn(Uuid),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Timeline(#[from] TimelineError),
}

/// Pool contents as of one advance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    pub as_of: NaiveDate,
    pub open: Vec<Ipo>,
    pub upcoming: Vec<Ipo>,
    pub closed: Vec<Ipo>,
}

/// An application together with its countdown state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: IpoApplication,
    pub timeline: ApplicationTimeline,
    pub phase: TimelinePhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_milestone: Option<MilestoneKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allotment: Option<AllotmentResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalKind {
    /// Blocked amount returned after a rejected application.
    Refund,
    /// Listing value of allotted shares returned after close.
    Proceeds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalReceipt {
    pub application_id: Uuid,
    pub kind: WithdrawalKind,
    pub amount: Decimal,
}

#[derive(Debug, Clone)]
struct ApplicationRecord {
    application: IpoApplication,
    timeline: ApplicationTimeline,
    ipo: Ipo,
    allotment: Option<AllotmentResult>,
    holding: Option<Holding>,
}

impl ApplicationRecord {
    fn view(&self) -> ApplicationView {
        ApplicationView {
            application: self.application.clone(),
            timeline: self.timeline.clone(),
            phase: self.timeline.phase(),
            next_milestone: self.timeline.next_pending(),
            allotment: self.allotment.clone(),
        }
    }

    /// Complete every milestone whose time has come, in order.
    fn catch_up(&mut self, now: TimeMs, rng: &mut StdRng) -> Result<(), DeskError> {
        while let Some(kind) = self.timeline.due(now) {
            match kind {
                MilestoneKind::Applied => self.timeline.complete(kind, None)?,
                MilestoneKind::Allotment => self.announce_allotment(rng)?,
                MilestoneKind::Listing => self.list(rng)?,
                MilestoneKind::Close => {
                    self.timeline.complete(kind, None)?;
                    info!(id = %self.application.id, "application closed");
                }
            }
        }
        Ok(())
    }

    fn announce_allotment(&mut self, rng: &mut StdRng) -> Result<(), DeskError> {
        let result = allotment::resolve(&self.ipo, self.application.lots, rng)?;
        let status = if result.is_allotted() {
            ApplicationStatus::Allotted
        } else {
            ApplicationStatus::NotAllotted
        };
        if self.application.status.can_become(status) {
            self.application.status = status;
            self.application.shares = Some(result.shares);
        }
        self.timeline
            .complete(MilestoneKind::Allotment, Some(result.status.label().to_string()))?;
        info!(
            id = %self.application.id,
            symbol = %self.application.symbol,
            status = result.status.label(),
            shares = result.shares,
            "allotment announced"
        );
        self.allotment = Some(result);
        Ok(())
    }

    fn list(&mut self, rng: &mut StdRng) -> Result<(), DeskError> {
        let holding = self
            .allotment
            .as_ref()
            .and_then(|result| portfolio::to_holding(&self.ipo, result, rng));
        let label = holding
            .as_ref()
            .map(|h| format!("Listed at {}", h.listing_price));
        if let Some(holding) = &holding {
            self.application.listing_price = Some(holding.listing_price);
            self.application.pnl = Some(holding.pnl.clone());
            info!(
                id = %self.application.id,
                symbol = %holding.symbol,
                listing_price = %holding.listing_price,
                "allotted shares listed"
            );
        }
        self.holding = holding;
        self.timeline.complete(MilestoneKind::Listing, label)?;
        Ok(())
    }

    fn withdrawal_amount(&self) -> (WithdrawalKind, Decimal) {
        match (&self.allotment, self.application.listing_price) {
            (Some(result), Some(listing_price)) if result.is_allotted() => (
                WithdrawalKind::Proceeds,
                listing_price * Decimal::from_u64(result.shares),
            ),
            (Some(result), _) if result.is_allotted() => (
                WithdrawalKind::Proceeds,
                self.ipo.issue_price * Decimal::from_u64(result.shares),
            ),
            (Some(result), _) => (WithdrawalKind::Refund, result.refund),
            (None, _) => (WithdrawalKind::Refund, self.application.amount),
        }
    }
}

struct DeskState {
    pool: RotationPool,
    rng: StdRng,
    applications: Vec<ApplicationRecord>,
}

pub struct IpoDesk {
    catalog: Arc<dyn Catalog>,
    clock: Arc<dyn Clock>,
    offsets: TimelineOffsets,
    state: Mutex<DeskState>,
}

impl IpoDesk {
    pub fn new(catalog: Arc<dyn Catalog>, clock: Arc<dyn Clock>, config: &Config) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(catalog, clock, config.timeline, rng)
    }

    pub fn with_rng(
        catalog: Arc<dyn Catalog>,
        clock: Arc<dyn Clock>,
        offsets: TimelineOffsets,
        rng: StdRng,
    ) -> Self {
        Self {
            catalog,
            clock,
            offsets,
            state: Mutex::new(DeskState {
                pool: RotationPool::default(),
                rng,
                applications: Vec::new(),
            }),
        }
    }

    /// Advance the pool to today and return its contents.
    pub async fn rotate(&self) -> PoolSnapshot {
        let mut state = self.state.lock().await;
        let today = self.clock.today();
        self.advance_locked(&mut state, today);
        PoolSnapshot {
            as_of: today,
            open: state.pool.open.clone(),
            upcoming: state.pool.upcoming.clone(),
            closed: state.pool.closed.clone(),
        }
    }

    /// Drop the pool back to uninitialized. The next read re-seeds it from the catalog.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.pool = RotationPool::default();
        info!("rotation pool reset");
    }

    pub async fn apply(&self, symbol: &Symbol, lots: u32) -> Result<ApplicationView, DeskError> {
        if lots == 0 {
            return Err(EngineError::ZeroLots.into());
        }
        let mut state = self.state.lock().await;
        let today = self.clock.today();
        self.advance_locked(&mut state, today);

        let ipo = match state.pool.open.iter().find(|ipo| &ipo.symbol == symbol) {
            Some(ipo) => ipo.clone(),
            None => {
                let status = if state.pool.upcoming.iter().any(|i| &i.symbol == symbol) {
                    IpoStatus::Upcoming
                } else if state.pool.closed.iter().any(|i| &i.symbol == symbol) {
                    IpoStatus::Closed
                } else {
                    return Err(DeskError::UnknownIpo(symbol.clone()));
                };
                return Err(DeskError::NotOpen {
                    symbol: symbol.clone(),
                    status,
                });
            }
        };
        ipo.validate()?;

        let now = self.clock.now();
        let application = IpoApplication::new(
            ipo.id.clone(),
            ipo.symbol.clone(),
            lots,
            ipo.min_investment,
            ipo.issue_price,
            now,
        );
        info!(
            id = %application.id,
            symbol = %application.symbol,
            lots,
            amount = %application.amount,
            "application received"
        );

        let mut record = ApplicationRecord {
            application,
            timeline: ApplicationTimeline::new(now, self.offsets),
            ipo,
            allotment: None,
            holding: None,
        };
        record.catch_up(now, &mut state.rng)?;
        let view = record.view();
        state.applications.push(record);
        Ok(view)
    }

    pub async fn application(&self, id: Uuid) -> Result<ApplicationView, DeskError> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();
        let DeskState {
            rng, applications, ..
        } = &mut *state;
        let record = applications
            .iter_mut()
            .find(|r| r.application.id == id)
            .ok_or(DeskError::UnknownApplication(id))?;
        record.catch_up(now, rng)?;
        Ok(record.view())
    }

    /// All applications, oldest first.
    pub async fn applications(&self) -> Result<Vec<ApplicationView>, DeskError> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();
        let DeskState {
            rng, applications, ..
        } = &mut *state;
        let mut views = Vec::with_capacity(applications.len());
        for record in applications.iter_mut() {
            record.catch_up(now, rng)?;
            views.push(record.view());
        }
        Ok(views)
    }

    pub async fn withdraw(&self, id: Uuid) -> Result<WithdrawalReceipt, DeskError> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();
        let DeskState {
            rng, applications, ..
        } = &mut *state;
        let record = applications
            .iter_mut()
            .find(|r| r.application.id == id)
            .ok_or(DeskError::UnknownApplication(id))?;
        record.catch_up(now, rng)?;

        match record
            .timeline
            .check_withdrawal(record.application.status, record.application.withdrawn)
        {
            Ok(()) => {}
            Err(WithdrawalBlock::AlreadyWithdrawn) => return Err(DeskError::AlreadyWithdrawn(id)),
            Err(reason) => return Err(DeskError::WithdrawalNotPermitted { id, reason }),
        }

        let (kind, amount) = record.withdrawal_amount();
        record.application.withdrawn = true;
        info!(%id, ?kind, %amount, "application withdrawn");
        Ok(WithdrawalReceipt {
            application_id: id,
            kind,
            amount,
        })
    }

    /// Holdings from listed allotments that have not been withdrawn.
    pub async fn holdings(&self) -> Result<Vec<Holding>, DeskError> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();
        let DeskState {
            rng, applications, ..
        } = &mut *state;
        let mut holdings = Vec::new();
        for record in applications.iter_mut() {
            record.catch_up(now, rng)?;
            if record.application.withdrawn {
                continue;
            }
            if let Some(holding) = &record.holding {
                holdings.push(holding.clone());
            }
        }
        Ok(holdings)
    }

    fn advance_locked(&self, state: &mut DeskState, today: NaiveDate) -> RotationReport {
        if !state.pool.is_initialized() {
            state.pool = RotationPool::seeded(self.catalog.seed());
        }
        let now = self.clock.now();
        let DeskState { pool, rng, .. } = state;
        let report = pool.advance(today, now, rng);
        if report.skipped_backwards {
            warn!(%today, "pool served as of last advance");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::clock::ManualClock;

    fn desk() -> (IpoDesk, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            TimeMs::new(1_717_977_600_000),
        ));
        let desk = IpoDesk::with_rng(
            Arc::new(StaticCatalog::builtin()),
            clock.clone(),
            TimelineOffsets::default(),
            StdRng::seed_from_u64(11),
        );
        (desk, clock)
    }

    #[tokio::test]
    async fn test_first_rotate_seeds_from_catalog() {
        let (desk, _clock) = desk();
        let snapshot = desk.rotate().await;
        assert!(!snapshot.open.is_empty());
        assert!(!snapshot.upcoming.is_empty());
        assert!(!snapshot.closed.is_empty());
    }

    #[tokio::test]
    async fn test_zero_lots_rejected_before_lookup() {
        let (desk, _clock) = desk();
        let err = desk.apply(&Symbol::new("NOPE"), 0).await.unwrap_err();
        assert!(matches!(err, DeskError::Engine(EngineError::ZeroLots)));
    }

    #[tokio::test]
    async fn test_unknown_application() {
        let (desk, _clock) = desk();
        let id = Uuid::new_v4();
        assert!(matches!(
            desk.application(id).await,
            Err(DeskError::UnknownApplication(got)) if got == id
        ));
    }

    #[tokio::test]
    async fn test_reset_reseeds_on_next_read() {
        let (desk, _clock) = desk();
        let first = desk.rotate().await;
        desk.reset().await;
        let second = desk.rotate().await;
        let ids = |s: &PoolSnapshot| s.closed.iter().map(|i| i.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }
}
