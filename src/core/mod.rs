pub mod budget;
pub mod catalog;
pub mod comparator;
pub mod engine;
pub mod estimator;
pub mod recommender;
pub mod trend;

pub use crate::domain::model::{
    BudgetOutcome, ComparisonResult, PredictionRequest, PredictionResult, PreferenceSet,
    RecommendationEntry, RecommendationList, Region, TrendPoint,
};
pub use crate::domain::ports::PriceSource;
pub use crate::utils::error::Result;
