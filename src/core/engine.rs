use crate::adapters::UniformPriceSource;
use crate::config::toml_config::EngineConfig;
use crate::core::catalog::RegionCatalog;
use crate::core::trend::TrendSeries;
use crate::core::{budget, comparator, estimator, recommender, trend};
use crate::domain::model::{
    BudgetOutcome, ComparisonResult, PredictionRequest, PredictionResult, PreferenceSet,
    RecommendationEntry, RecommendationList, TrendPoint,
};
use crate::domain::ports::PriceSource;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};

/// Entry point for the presentation layer. Holds the catalog, the tunables
/// and the price source; every call recomputes from scratch.
pub struct PriceEngine<S: PriceSource = UniformPriceSource> {
    catalog: RegionCatalog,
    config: EngineConfig,
    source: S,
}

/// Inputs for one full interaction: the prediction plus the two regions to
/// compare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRequest {
    pub prediction: PredictionRequest,
    pub compare_first: String,
    pub compare_second: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InteractionReport {
    pub prediction: PredictionResult,
    pub budget: u64,
    pub outcome: BudgetOutcome,
    pub comparison: ComparisonResult,
    pub trend_region: String,
    pub trend: Vec<TrendPoint>,
    pub recommendations: RecommendationList,
    pub top_k: usize,
}

impl InteractionReport {
    pub fn shortlist(&self) -> &[RecommendationEntry] {
        self.recommendations.top(self.top_k)
    }
}

impl PriceEngine<UniformPriceSource> {
    /// Default configuration with an entropy-seeded source.
    pub fn with_defaults() -> Self {
        Self {
            catalog: RegionCatalog::australian(),
            config: EngineConfig::default(),
            source: UniformPriceSource::new(),
        }
    }
}

impl<S: PriceSource> PriceEngine<S> {
    pub fn new(config: EngineConfig, source: S) -> Result<Self> {
        config.validate()?;
        let catalog = RegionCatalog::from_config(&config.regions)?;
        tracing::debug!("Engine ready with {} regions", catalog.len());
        Ok(Self {
            catalog,
            config,
            source,
        })
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn estimate(
        &self,
        region: &str,
        rooms: u32,
        preferences: &PreferenceSet,
    ) -> Result<PredictionResult> {
        estimator::estimate(
            &self.catalog,
            &self.config.estimator,
            &self.source,
            region,
            rooms,
            preferences,
        )
    }

    pub fn compare(&self, first: &str, second: &str, rooms: u32) -> Result<ComparisonResult> {
        comparator::compare(
            &self.catalog,
            &self.config.estimator,
            &self.source,
            first,
            second,
            rooms,
        )
    }

    pub fn trend(&self, region: &str) -> Result<TrendSeries<'_, S>> {
        trend::trend(&self.catalog, &self.config.trend, &self.source, region)
    }

    pub fn recommend(
        &self,
        budget: u64,
        preferences: &PreferenceSet,
        rooms: u32,
    ) -> Result<RecommendationList> {
        recommender::recommend(
            &self.catalog,
            &self.config.estimator,
            &self.config.budget,
            &self.source,
            budget,
            preferences,
            rooms,
        )
    }

    /// Rejects a budget outside the configured domain.
    pub fn check_budget(&self, budget: u64) -> Result<()> {
        recommender::validate_budget(&self.config.budget, budget)
    }

    pub fn evaluate(&self, price: u64, budget: u64) -> BudgetOutcome {
        budget::evaluate(price, budget)
    }

    /// Runs every component once, in presentation order: estimate, budget
    /// verdict, comparison, trend, recommendations.
    pub fn run(&self, request: &InteractionRequest) -> Result<InteractionReport> {
        let input = &request.prediction;
        tracing::info!(
            "Starting evaluation for {} ({} rooms, budget {})",
            input.region,
            input.rooms,
            input.budget
        );
        self.check_budget(input.budget)?;

        let prediction = self.estimate(&input.region, input.rooms, &input.preferences)?;
        tracing::info!("Predicted price for {}: {}", prediction.region, prediction.price);

        let outcome = self.evaluate(prediction.price, input.budget);
        match outcome {
            BudgetOutcome::WithinBudget => tracing::info!("Prediction fits the budget"),
            BudgetOutcome::OverBudget { deficit } => {
                tracing::info!("Prediction exceeds the budget by {}", deficit)
            }
        }

        let comparison = self.compare(&request.compare_first, &request.compare_second, input.rooms)?;
        let trend: Vec<TrendPoint> = self.trend(&input.region)?.collect();
        tracing::info!("Generated {} trend points", trend.len());

        let recommendations = self.recommend(input.budget, &input.preferences, input.rooms)?;
        tracing::info!("Ranked {} regions", recommendations.len());

        Ok(InteractionReport {
            prediction,
            budget: input.budget,
            outcome,
            comparison,
            trend_region: input.region.clone(),
            trend,
            recommendations,
            top_k: self.config.recommender.top_k,
        })
    }
}
