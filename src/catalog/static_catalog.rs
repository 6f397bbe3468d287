use super::{seed_data, Catalog, CatalogSeed};
use crate::domain::Ipo;

/// In-memory catalog. `builtin()` carries the bundled seed set; `new()` starts
/// empty for tests that build their own pools.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    seed: CatalogSeed,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self {
            seed: seed_data::builtin_seed(),
        }
    }

    pub fn with_open(mut self, ipo: Ipo) -> Self {
        self.seed.open.push(ipo);
        self
    }

    pub fn with_upcoming(mut self, ipo: Ipo) -> Self {
        self.seed.upcoming.push(ipo);
        self
    }

    pub fn with_closed(mut self, ipo: Ipo) -> Self {
        self.seed.closed.push(ipo);
        self
    }
}

impl Catalog for StaticCatalog {
    fn seed(&self) -> CatalogSeed {
        self.seed.clone()
    }
}
