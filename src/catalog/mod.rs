//! IPO catalog: the seed data the rotation pool starts from.

use crate::domain::Ipo;
use std::fmt;

pub mod seed_data;
pub mod static_catalog;

pub use static_catalog::StaticCatalog;

/// Seed offerings partitioned by initial category.
///
/// Windows on open and upcoming seeds are placeholders; they are replaced
/// relative to "today" when the pool initializes. Closed seeds keep theirs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSeed {
    pub open: Vec<Ipo>,
    pub upcoming: Vec<Ipo>,
    pub closed: Vec<Ipo>,
}

impl CatalogSeed {
    pub fn len(&self) -> usize {
        self.open.len() + self.upcoming.len() + self.closed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only source of seed offerings, consulted when the pool initializes.
pub trait Catalog: Send + Sync + fmt::Debug {
    fn seed(&self) -> CatalogSeed;
}
