#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, PreferenceArgs};
pub use toml_config::{
    BonusConfig, BudgetConfig, EngineConfig, EstimatorConfig, RecommenderConfig, RegionConfig,
    TrendConfig,
};
