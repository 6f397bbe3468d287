//! Rotation of offerings across the open, upcoming and closed pools.
//!
//! # Invariants
//!
//! - Every offering sits in exactly one pool.
//! - After [`RotationPool::advance`] with a day not earlier than the previous one:
//!   open offerings satisfy `open <= today <= close`, upcoming ones `today < open`,
//!   closed ones `close < today` (catalog history and recycled entries aside).
//! - The open pool is never empty after an advance.
//! - A listing outcome, once stamped on a closed offering, never changes.
//!
//! Membership is recomputed from dates on every call, so advancing twice on
//! the same day changes no categories. Only recycling and the open-pool floor
//! can still act on a repeated call.

use super::{listing, synthetic, window};
use crate::catalog::CatalogSeed;
use crate::domain::{Ipo, IpoId, IpoStatus, TimeMs};
use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Recycling only runs while fewer than this many offerings are upcoming.
pub const RECYCLE_UPCOMING_BELOW: usize = 15;
/// Recycling only runs while more than this many offerings are closed.
pub const RECYCLE_CLOSED_ABOVE: usize = 8;

pub const RELISTED_SUFFIX: &str = "(Re-listed)";

/// What a single advance did. Used for logging and assertions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationReport {
    pub initialized: bool,
    /// Day went backwards; pool left untouched.
    pub skipped_backwards: bool,
    pub closed_out: Vec<IpoId>,
    pub promoted: Vec<IpoId>,
    /// Open offerings whose window had not started yet, moved back to upcoming.
    pub demoted: Vec<IpoId>,
    pub recycled: Option<IpoId>,
    pub synthesized: Option<IpoId>,
}

impl RotationReport {
    /// True when no offering changed category.
    pub fn is_quiet(&self) -> bool {
        self.closed_out.is_empty() && self.promoted.is_empty() && self.demoted.is_empty()
    }
}

/// Process-wide pool state. Owned by a single writer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RotationPool {
    pub open: Vec<Ipo>,
    pub upcoming: Vec<Ipo>,
    pub closed: Vec<Ipo>,
    #[serde(skip)]
    initialized: bool,
    #[serde(skip)]
    last_advanced: Option<NaiveDate>,
}

impl RotationPool {
    /// Uninitialized pool holding catalog seeds. The first advance assigns fresh windows.
    pub fn seeded(seed: CatalogSeed) -> Self {
        Self {
            open: seed.open,
            upcoming: seed.upcoming,
            closed: seed.closed,
            initialized: false,
            last_advanced: None,
        }
    }

    /// Already-initialized pool built from explicit contents.
    pub fn from_parts(open: Vec<Ipo>, upcoming: Vec<Ipo>, closed: Vec<Ipo>) -> Self {
        Self {
            open,
            upcoming,
            closed,
            initialized: true,
            last_advanced: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn last_advanced(&self) -> Option<NaiveDate> {
        self.last_advanced
    }

    pub fn len(&self) -> usize {
        self.open.len() + self.upcoming.len() + self.closed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locate an offering by id across all pools, with its pool category.
    pub fn find(&self, id: &IpoId) -> Option<(IpoStatus, &Ipo)> {
        let pools = [
            (IpoStatus::Open, &self.open),
            (IpoStatus::Upcoming, &self.upcoming),
            (IpoStatus::Closed, &self.closed),
        ];
        pools.into_iter().find_map(|(status, pool)| {
            pool.iter().find(|ipo| &ipo.id == id).map(|ipo| (status, ipo))
        })
    }

    /// Bring the pool in line with `today`.
    ///
    /// `now` only feeds identifiers of recycled and synthesized offerings.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        today: NaiveDate,
        now: TimeMs,
        rng: &mut R,
    ) -> RotationReport {
        let mut report = RotationReport::default();

        if !self.initialized {
            self.initialize(today, rng);
            report.initialized = true;
            self.ensure_open_floor(today, now, rng, &mut report);
            self.last_advanced = Some(today);
            return report;
        }

        if let Some(last) = self.last_advanced {
            if today < last {
                warn!(%today, %last, "rotation day moved backwards; keeping pool as of last advance");
                report.skipped_backwards = true;
                return report;
            }
        }

        self.close_out_open(today, rng, &mut report);
        self.demote_unstarted_open(today, &mut report);
        self.sweep_upcoming(today, rng, &mut report);
        self.recycle_oldest_closed(today, now, rng, &mut report);
        self.ensure_open_floor(today, now, rng, &mut report);

        self.last_advanced = Some(today);

        if !report.is_quiet() || report.recycled.is_some() || report.synthesized.is_some() {
            info!(
                %today,
                closed_out = report.closed_out.len(),
                promoted = report.promoted.len(),
                demoted = report.demoted.len(),
                recycled = report.recycled.is_some(),
                synthesized = report.synthesized.is_some(),
                "rotation advanced"
            );
        }
        report
    }

    fn initialize<R: Rng + ?Sized>(&mut self, today: NaiveDate, rng: &mut R) {
        for ipo in &mut self.open {
            ipo.window = window::open_window(today, rng);
        }
        for ipo in &mut self.upcoming {
            ipo.window = window::upcoming_window(today, rng);
        }
        self.initialized = true;
        info!(
            %today,
            open = self.open.len(),
            upcoming = self.upcoming.len(),
            closed = self.closed.len(),
            "rotation pool initialized"
        );
    }

    /// Move open offerings whose subscription ended before `today` to the front of closed.
    fn close_out_open<R: Rng + ?Sized>(
        &mut self,
        today: NaiveDate,
        rng: &mut R,
        report: &mut RotationReport,
    ) {
        let (ended, still_open): (Vec<Ipo>, Vec<Ipo>) = std::mem::take(&mut self.open)
            .into_iter()
            .partition(|ipo| ipo.window.close_date < today);
        self.open = still_open;
        self.prepend_closed(ended, rng, report);
    }

    /// Open offerings with a future open date go back to upcoming.
    fn demote_unstarted_open(&mut self, today: NaiveDate, report: &mut RotationReport) {
        let (unstarted, started): (Vec<Ipo>, Vec<Ipo>) = std::mem::take(&mut self.open)
            .into_iter()
            .partition(|ipo| today < ipo.window.open_date);
        self.open = started;
        for ipo in unstarted {
            debug!(id = %ipo.id, "open offering not yet started; back to upcoming");
            report.demoted.push(ipo.id.clone());
            self.upcoming.push(ipo);
        }
    }

    /// Keep future offerings upcoming, promote started ones, close out any whose
    /// whole window already passed.
    fn sweep_upcoming<R: Rng + ?Sized>(
        &mut self,
        today: NaiveDate,
        rng: &mut R,
        report: &mut RotationReport,
    ) {
        let mut still_upcoming = Vec::with_capacity(self.upcoming.len());
        let mut passed = Vec::new();
        for ipo in std::mem::take(&mut self.upcoming) {
            match ipo.status_on(today) {
                IpoStatus::Upcoming => still_upcoming.push(ipo),
                IpoStatus::Open => {
                    debug!(id = %ipo.id, "promoting upcoming offering to open");
                    report.promoted.push(ipo.id.clone());
                    self.open.push(ipo);
                }
                IpoStatus::Closed => passed.push(ipo),
            }
        }
        self.upcoming = still_upcoming;
        self.prepend_closed(passed, rng, report);
    }

    fn prepend_closed<R: Rng + ?Sized>(
        &mut self,
        ended: Vec<Ipo>,
        rng: &mut R,
        report: &mut RotationReport,
    ) {
        if ended.is_empty() {
            return;
        }
        let mut newly_closed = Vec::with_capacity(ended.len() + self.closed.len());
        for mut ipo in ended {
            let outcome = listing::close_out(ipo.issue_price, rng);
            ipo.settle_listing(outcome);
            ipo.window.listing_date = Some(ipo.window.listing_date_or_default());
            debug!(id = %ipo.id, "offering closed");
            report.closed_out.push(ipo.id.clone());
            newly_closed.push(ipo);
        }
        newly_closed.append(&mut self.closed);
        self.closed = newly_closed;
    }

    /// Re-list the oldest closed offering under a new identity when upcoming runs low.
    fn recycle_oldest_closed<R: Rng + ?Sized>(
        &mut self,
        today: NaiveDate,
        now: TimeMs,
        rng: &mut R,
        report: &mut RotationReport,
    ) {
        if self.upcoming.len() >= RECYCLE_UPCOMING_BELOW || self.closed.len() <= RECYCLE_CLOSED_ABOVE
        {
            return;
        }
        let Some(mut ipo) = self.closed.pop() else {
            return;
        };
        let original = ipo.id.clone();
        ipo.id = original.recycled(now);
        ipo.name = relisted_name(&ipo.name);
        ipo.window = window::upcoming_window(today, rng);
        ipo.listing = None;
        info!(from = %original, to = %ipo.id, "recycled closed offering");
        report.recycled = Some(ipo.id.clone());
        self.upcoming.push(ipo);
    }

    fn ensure_open_floor<R: Rng + ?Sized>(
        &mut self,
        today: NaiveDate,
        now: TimeMs,
        rng: &mut R,
        report: &mut RotationReport,
    ) {
        if !self.open.is_empty() {
            return;
        }
        let ipo = synthetic::synthesize(today, now, rng);
        info!(id = %ipo.id, symbol = %ipo.symbol, "open pool empty; synthesized offering");
        report.synthesized = Some(ipo.id.clone());
        self.open.push(ipo);
    }
}

fn relisted_name(name: &str) -> String {
    let base = name.trim_end();
    let base = base.strip_suffix(RELISTED_SUFFIX).unwrap_or(base).trim_end();
    format!("{} {}", base, RELISTED_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relisted_name_does_not_stack() {
        assert_eq!(relisted_name("Orion Labs"), "Orion Labs (Re-listed)");
        assert_eq!(
            relisted_name("Orion Labs (Re-listed)"),
            "Orion Labs (Re-listed)"
        );
    }

    #[test]
    fn test_default_pool_is_uninitialized() {
        let pool = RotationPool::default();
        assert!(!pool.is_initialized());
        assert!(pool.is_empty());
        assert_eq!(pool.last_advanced(), None);
    }
}
