use crate::config::toml_config::EstimatorConfig;
use crate::core::catalog::RegionCatalog;
use crate::core::estimator::{price_at, validate_rooms};
use crate::domain::model::{ComparisonResult, PredictionResult, PreferenceSet};
use crate::domain::ports::PriceSource;
use crate::utils::error::Result;

/// Prices two regions with the same room count and no preference bonus.
/// Both regions are resolved before any draw, so either both results come
/// back or nothing is sampled.
pub fn compare<S: PriceSource + ?Sized>(
    catalog: &RegionCatalog,
    config: &EstimatorConfig,
    source: &S,
    first: &str,
    second: &str,
    rooms: u32,
) -> Result<ComparisonResult> {
    let first_index = catalog.index_of(first)?;
    let second_index = catalog.index_of(second)?;
    validate_rooms(config, rooms)?;

    let prefs = PreferenceSet::none();
    let price = |name: &str, index: usize| {
        let breakdown = price_at(config, source, index, rooms, &prefs);
        PredictionResult {
            region: name.to_string(),
            price: breakdown.total(),
            breakdown,
        }
    };

    let result = ComparisonResult {
        first: price(first, first_index),
        second: price(second, second_index),
    };
    tracing::debug!(
        "Compared {} ({}) with {} ({})",
        first,
        result.first.price,
        second,
        result.second.price
    );
    Ok(result)
}
