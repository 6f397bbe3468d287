pub mod api;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod desk;
pub mod domain;
pub mod engine;
pub mod error;

pub use catalog::{Catalog, CatalogSeed, StaticCatalog};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use desk::{IpoDesk, PoolSnapshot};
pub use domain::{
    ApplicationStatus, Decimal, Holding, Ipo, IpoApplication, IpoId, IpoStatus, IpoWindow,
    RiskLevel, Symbol, TimeMs,
};
pub use error::{AppError, EngineError};
