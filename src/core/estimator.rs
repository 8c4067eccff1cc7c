use crate::config::toml_config::{BonusConfig, EstimatorConfig};
use crate::core::catalog::RegionCatalog;
use crate::domain::model::{PredictionResult, PreferenceSet, PriceBreakdown};
use crate::domain::ports::PriceSource;
use crate::utils::error::Result;
use crate::utils::validation::validate_range;

/// `base + rooms * room_unit + index * region_unit + bonus`, with `base` drawn
/// from the price source. Two identical calls may return different prices.
pub fn estimate<S: PriceSource + ?Sized>(
    catalog: &RegionCatalog,
    config: &EstimatorConfig,
    source: &S,
    region: &str,
    rooms: u32,
    preferences: &PreferenceSet,
) -> Result<PredictionResult> {
    let index = catalog.index_of(region)?;
    validate_rooms(config, rooms)?;

    let breakdown = price_at(config, source, index, rooms, preferences);
    tracing::debug!(
        "Estimated {} ({} rooms): base {} + rooms {} + region {} + bonus {} = {}",
        region,
        rooms,
        breakdown.base,
        breakdown.room_adjustment,
        breakdown.region_adjustment,
        breakdown.preference_bonus,
        breakdown.total()
    );

    Ok(PredictionResult {
        region: region.to_string(),
        price: breakdown.total(),
        breakdown,
    })
}

pub fn validate_rooms(config: &EstimatorConfig, rooms: u32) -> Result<()> {
    validate_range("rooms", rooms, config.min_rooms, config.max_rooms)
}

/// Draws one base amount for an already-resolved catalog index.
pub(crate) fn price_at<S: PriceSource + ?Sized>(
    config: &EstimatorConfig,
    source: &S,
    index: usize,
    rooms: u32,
    preferences: &PreferenceSet,
) -> PriceBreakdown {
    PriceBreakdown {
        base: source.draw(config.base_min, config.base_max),
        room_adjustment: u64::from(rooms).saturating_mul(config.room_unit),
        region_adjustment: region_adjustment(config, index),
        preference_bonus: preference_bonus(&config.bonuses, preferences),
    }
}

pub fn region_adjustment(config: &EstimatorConfig, index: usize) -> u64 {
    u64::try_from(index)
        .unwrap_or(u64::MAX)
        .saturating_mul(config.region_unit)
}

pub fn preference_bonus(bonuses: &BonusConfig, preferences: &PreferenceSet) -> u64 {
    let mut bonus: u64 = 0;
    if preferences.near_transport {
        bonus = bonus.saturating_add(bonuses.near_transport);
    }
    if preferences.pet_friendly {
        bonus = bonus.saturating_add(bonuses.pet_friendly);
    }
    if preferences.low_crime {
        bonus = bonus.saturating_add(bonuses.low_crime);
    }
    bonus
}
