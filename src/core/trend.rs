use crate::config::toml_config::TrendConfig;
use crate::core::catalog::RegionCatalog;
use crate::domain::model::TrendPoint;
use crate::domain::ports::PriceSource;
use crate::utils::error::Result;

/// Lazily sampled price history for one region. Each point is drawn when the
/// iterator reaches it; calling [`trend`] again samples a fresh series.
pub struct TrendSeries<'a, S: PriceSource + ?Sized> {
    region: String,
    config: &'a TrendConfig,
    source: &'a S,
    next_year: i64,
    remaining: u32,
}

pub fn trend<'a, S: PriceSource + ?Sized>(
    catalog: &RegionCatalog,
    config: &'a TrendConfig,
    source: &'a S,
    region: &str,
) -> Result<TrendSeries<'a, S>> {
    catalog.index_of(region)?;
    let first_year = config.first_year().ok_or_else(|| config.window_error())?;
    tracing::debug!(
        "Generating {} year trend for {} ending {}",
        config.years,
        region,
        config.terminal_year
    );
    Ok(TrendSeries {
        region: region.to_string(),
        config,
        source,
        next_year: i64::from(first_year),
        remaining: config.years,
    })
}

impl<S: PriceSource + ?Sized> TrendSeries<'_, S> {
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl<S: PriceSource + ?Sized> Iterator for TrendSeries<'_, S> {
    type Item = TrendPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // trend() only builds windows whose years all fit in i32
        let year = i32::try_from(self.next_year).ok()?;
        self.next_year += 1;
        self.remaining -= 1;

        let base = self.source.draw(self.config.base_min, self.config.base_max);
        let jitter = self
            .source
            .draw(self.config.jitter_min, self.config.jitter_max);
        Some(TrendPoint {
            year,
            price: base.saturating_add(jitter),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl<S: PriceSource + ?Sized> ExactSizeIterator for TrendSeries<'_, S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedPriceSource, SequencePriceSource, UniformPriceSource};
    use crate::utils::error::EngineError;

    #[test]
    fn test_default_window_is_2015_to_2024() {
        let catalog = RegionCatalog::australian();
        let config = TrendConfig::default();
        let source = UniformPriceSource::new();

        let series: Vec<TrendPoint> = trend(&catalog, &config, &source, "Hobart").unwrap().collect();

        assert_eq!(series.len(), 10);
        let years: Vec<i32> = series.iter().map(|p| p.year).collect();
        assert_eq!(years, (2015..=2024).collect::<Vec<_>>());
        for point in &series {
            assert!((500_000..=900_000).contains(&point.price));
        }
    }

    #[test]
    fn test_custom_window() {
        let catalog = RegionCatalog::australian();
        let config = TrendConfig {
            years: 3,
            terminal_year: 2030,
            ..TrendConfig::default()
        };
        let source = FixedPriceSource::new(600_000);

        let series = trend(&catalog, &config, &source, "Perth").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.region(), "Perth");

        let points: Vec<TrendPoint> = series.collect();
        assert_eq!(points[0].year, 2028);
        assert_eq!(points[2].year, 2030);
        // base 600000, jitter clamped to 100000
        assert!(points.iter().all(|p| p.price == 700_000));
    }

    #[test]
    fn test_zero_years_is_empty() {
        let catalog = RegionCatalog::australian();
        let config = TrendConfig {
            years: 0,
            ..TrendConfig::default()
        };
        let source = UniformPriceSource::new();

        let mut series = trend(&catalog, &config, &source, "Perth").unwrap();
        assert_eq!(series.len(), 0);
        assert!(series.next().is_none());
    }

    #[test]
    fn test_points_are_drawn_lazily() {
        let catalog = RegionCatalog::australian();
        let config = TrendConfig::default();
        let source = SequencePriceSource::new(vec![550_000, 20_000]);

        let mut series = trend(&catalog, &config, &source, "Sydney").unwrap();
        assert_eq!(source.draws(), 0);

        let first = series.next().unwrap();
        assert_eq!(first.price, 570_000);
        assert_eq!(source.draws(), 2);
        assert_eq!(series.len(), 9);
    }

    #[test]
    fn test_window_before_min_year_is_rejected() {
        let catalog = RegionCatalog::australian();
        let config = TrendConfig {
            years: u32::MAX,
            ..TrendConfig::default()
        };
        let source = SequencePriceSource::new(vec![600_000]);

        let err = trend(&catalog, &config, &source, "Perth")
            .err()
            .expect("window must be rejected");
        assert!(matches!(err, EngineError::ConfigValidationError { field, .. } if field == "trend.years"));
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_window_ending_at_min_year_has_exact_length() {
        let catalog = RegionCatalog::australian();
        let config = TrendConfig {
            years: 3,
            terminal_year: i32::MIN + 2,
            ..TrendConfig::default()
        };
        let source = FixedPriceSource::new(600_000);

        let series = trend(&catalog, &config, &source, "Perth").unwrap();
        assert_eq!(series.len(), 3);
        let years: Vec<i32> = series.map(|p| p.year).collect();
        assert_eq!(years, vec![i32::MIN, i32::MIN + 1, i32::MIN + 2]);
    }

    #[test]
    fn test_unknown_region() {
        let catalog = RegionCatalog::australian();
        let config = TrendConfig::default();
        let source = UniformPriceSource::new();

        let err = trend(&catalog, &config, &source, "Atlantis")
            .err()
            .expect("unknown region must be rejected");
        assert!(matches!(err, EngineError::UnknownRegion { .. }));
    }
}
