pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FixedPriceSource, SequencePriceSource, UniformPriceSource};
pub use config::EngineConfig;
pub use crate::core::catalog::RegionCatalog;
pub use crate::core::engine::{InteractionReport, InteractionRequest, PriceEngine};
pub use domain::model::{
    BudgetOutcome, ComparisonResult, PredictionRequest, PredictionResult, PreferenceSet,
    RecommendationEntry, RecommendationList, Region, TrendPoint,
};
pub use domain::ports::PriceSource;
pub use utils::error::{EngineError, Result};
