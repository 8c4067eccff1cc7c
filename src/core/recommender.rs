use crate::config::toml_config::{BudgetConfig, EstimatorConfig};
use crate::core::catalog::RegionCatalog;
use crate::core::estimator::{price_at, validate_rooms};
use crate::domain::model::{PreferenceSet, RecommendationEntry, RecommendationList};
use crate::domain::ports::PriceSource;
use crate::utils::error::Result;
use crate::utils::validation::validate_range;

/// Scores every catalog region and ranks them.
///
/// The price is drawn without a preference bonus. Each requested amenity adds
/// a point whether or not the region offers it, since the catalog carries no
/// amenity data; only the budget point differs between regions.
pub fn recommend<S: PriceSource + ?Sized>(
    catalog: &RegionCatalog,
    estimator: &EstimatorConfig,
    budget_domain: &BudgetConfig,
    source: &S,
    budget: u64,
    preferences: &PreferenceSet,
    rooms: u32,
) -> Result<RecommendationList> {
    validate_budget(budget_domain, budget)?;
    validate_rooms(estimator, rooms)?;

    let no_bonus = PreferenceSet::none();
    let mut entries: Vec<RecommendationEntry> = catalog
        .iter()
        .enumerate()
        .map(|(index, region)| {
            let price = price_at(estimator, source, index, rooms, &no_bonus).total();
            RecommendationEntry {
                region: region.name.clone(),
                catalog_index: index,
                score: score(price, budget, preferences),
                price,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.catalog_index.cmp(&b.catalog_index))
    });

    tracing::debug!(
        "Ranked {} regions for budget {} ({} amenities requested)",
        entries.len(),
        budget,
        preferences.active_count()
    );
    Ok(RecommendationList::from_ranked(entries))
}

pub fn validate_budget(domain: &BudgetConfig, budget: u64) -> Result<()> {
    validate_range("budget", budget, domain.min, domain.max)
}

pub fn score(price: u64, budget: u64, preferences: &PreferenceSet) -> u8 {
    u8::from(price <= budget) + preferences.active_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedPriceSource, SequencePriceSource, UniformPriceSource};
    use crate::domain::model::Region;
    use crate::utils::error::EngineError;

    fn run(source: &dyn PriceSource, budget: u64, prefs: PreferenceSet) -> RecommendationList {
        recommend(
            &RegionCatalog::australian(),
            &EstimatorConfig::default(),
            &BudgetConfig::default(),
            source,
            budget,
            &prefs,
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_list_is_a_ranked_permutation() {
        let source = UniformPriceSource::new();
        let list = run(&source, 900_000, PreferenceSet::none());
        let catalog = RegionCatalog::australian();

        assert_eq!(list.len(), catalog.len());
        let mut indices: Vec<usize> = list.iter().map(|e| e.catalog_index).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..catalog.len()).collect::<Vec<_>>());

        for pair in list.entries().windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                assert!(pair[0].catalog_index < pair[1].catalog_index);
            }
        }
    }

    #[test]
    fn test_budget_point_moves_affordable_regions_up() {
        // Darwin draws 400000 and lands at 685000; every other region exceeds 700000
        let source = SequencePriceSource::new(vec![
            1_200_000, 1_200_000, 1_200_000, 1_200_000, 1_200_000, 1_200_000, 1_200_000, 400_000,
        ]);
        let list = run(&source, 700_000, PreferenceSet::none());

        assert_eq!(list.entries()[0].region, "Darwin");
        assert_eq!(list.entries()[0].score, 1);
        assert_eq!(list.entries()[0].price, 400_000 + 75_000 + 7 * 30_000);
        let rest: Vec<&str> = list.iter().skip(1).map(|e| e.region.as_str()).collect();
        assert_eq!(
            rest,
            vec!["Sydney", "Melbourne", "Brisbane", "Perth", "Adelaide", "Canberra", "Hobart"]
        );
        assert!(list.iter().skip(1).all(|e| e.score == 0));
    }

    #[test]
    fn test_preferences_score_without_raising_price() {
        let source = FixedPriceSource::new(500_000);
        let prefs = PreferenceSet {
            near_transport: true,
            pet_friendly: true,
            low_crime: true,
        };
        let list = run(&source, 2_000_000, prefs);

        assert!(list.iter().all(|e| e.score == 4));
        assert_eq!(list.entries()[0].region, "Sydney");
        assert_eq!(list.entries()[0].price, 575_000);
    }

    #[test]
    fn test_top_truncates() {
        let source = UniformPriceSource::new();
        let list = run(&source, 1_000_000, PreferenceSet::none());

        assert_eq!(list.top(3).len(), 3);
        assert_eq!(list.top(3), &list.entries()[..3]);
        assert_eq!(list.top(100).len(), 8);
    }

    #[test]
    fn test_empty_catalog_yields_empty_list() {
        let catalog = RegionCatalog::new(Vec::new()).unwrap();
        let source = UniformPriceSource::new();
        let list = recommend(
            &catalog,
            &EstimatorConfig::default(),
            &BudgetConfig::default(),
            &source,
            500_000,
            &PreferenceSet::none(),
            2,
        )
        .unwrap();

        assert!(list.is_empty());
        assert!(list.top(3).is_empty());
    }

    #[test]
    fn test_out_of_domain_inputs() {
        let catalog = RegionCatalog::new(vec![Region::new("A")]).unwrap();
        let source = UniformPriceSource::new();
        let estimator = EstimatorConfig::default();
        let budget = BudgetConfig::default();
        let prefs = PreferenceSet::none();

        let err = recommend(&catalog, &estimator, &budget, &source, 100_000, &prefs, 2).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { field, .. } if field == "budget"));

        let err = recommend(&catalog, &estimator, &budget, &source, 500_000, &prefs, 0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { field, .. } if field == "rooms"));
    }

    #[test]
    fn test_score() {
        let prefs = PreferenceSet {
            low_crime: true,
            ..PreferenceSet::none()
        };
        assert_eq!(score(600_000, 600_000, &prefs), 2);
        assert_eq!(score(600_001, 600_000, &prefs), 1);
    }
}
