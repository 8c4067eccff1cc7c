use crate::utils::error::{EngineError, Result};
use crate::utils::validation::{
    validate_coordinate, validate_non_empty_string, validate_ordered_bounds,
    validate_positive_number, validate_unique_names, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every tunable of the engine. Missing sections fall back to the defaults
/// below, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub estimator: EstimatorConfig,
    pub budget: BudgetConfig,
    pub trend: TrendConfig,
    pub recommender: RecommenderConfig,
    pub regions: Vec<RegionConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub base_min: u64,
    pub base_max: u64,
    pub room_unit: u64,
    pub region_unit: u64,
    pub min_rooms: u32,
    pub max_rooms: u32,
    pub bonuses: BonusConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusConfig {
    pub near_transport: u64,
    pub pet_friendly: u64,
    pub low_crime: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub min: u64,
    pub max: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub years: u32,
    pub terminal_year: i32,
    pub base_min: u64,
    pub base_max: u64,
    pub jitter_min: u64,
    pub jitter_max: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub top_k: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reference_price: Option<u64>,
}

impl RegionConfig {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            latitude: None,
            longitude: None,
            reference_price: None,
        }
    }

    fn marker(name: &str, latitude: f64, longitude: f64, reference_price: u64) -> Self {
        Self {
            name: name.to_string(),
            latitude: Some(latitude),
            longitude: Some(longitude),
            reference_price: Some(reference_price),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            estimator: EstimatorConfig::default(),
            budget: BudgetConfig::default(),
            trend: TrendConfig::default(),
            recommender: RecommenderConfig::default(),
            regions: default_regions(),
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            base_min: 400_000,
            base_max: 1_200_000,
            room_unit: 25_000,
            region_unit: 30_000,
            min_rooms: 1,
            max_rooms: 6,
            bonuses: BonusConfig::default(),
        }
    }
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            near_transport: 20_000,
            pet_friendly: 15_000,
            low_crime: 25_000,
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            min: 300_000,
            max: 2_000_000,
        }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            years: 10,
            terminal_year: 2024,
            base_min: 500_000,
            base_max: 800_000,
            jitter_min: 0,
            jitter_max: 100_000,
        }
    }
}

impl TrendConfig {
    /// First year of the window, or `None` when it would start before `i32::MIN`.
    /// An empty window reports `terminal_year`.
    pub fn first_year(&self) -> Option<i32> {
        if self.years == 0 {
            return Some(self.terminal_year);
        }
        let first = i64::from(self.terminal_year) - i64::from(self.years) + 1;
        i32::try_from(first).ok()
    }

    pub(crate) fn window_error(&self) -> EngineError {
        EngineError::ConfigValidationError {
            field: "trend.years".to_string(),
            message: format!(
                "a {} year window ending {} starts before year {}",
                self.years,
                self.terminal_year,
                i32::MIN
            ),
        }
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

/// The eight Australian capitals, in the order that drives region adjustment.
pub fn default_regions() -> Vec<RegionConfig> {
    vec![
        RegionConfig::marker("Sydney", -33.8688, 151.2093, 1_200_000),
        RegionConfig::marker("Melbourne", -37.8136, 144.9631, 950_000),
        RegionConfig::marker("Brisbane", -27.4698, 153.0251, 800_000),
        RegionConfig::marker("Perth", -31.9505, 115.8605, 750_000),
        RegionConfig::named("Adelaide"),
        RegionConfig::named("Canberra"),
        RegionConfig::named("Hobart"),
        RegionConfig::named("Darwin"),
    ]
}

impl EngineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EngineError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EngineError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` placeholders with environment values; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EngineError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let estimator = &self.estimator;
        validate_ordered_bounds("estimator.base", estimator.base_min, estimator.base_max)?;
        validate_ordered_bounds("estimator.rooms", estimator.min_rooms, estimator.max_rooms)?;
        validate_ordered_bounds("budget", self.budget.min, self.budget.max)?;
        validate_ordered_bounds("trend.base", self.trend.base_min, self.trend.base_max)?;
        validate_ordered_bounds("trend.jitter", self.trend.jitter_min, self.trend.jitter_max)?;
        validate_positive_number("recommender.top_k", self.recommender.top_k, 1)?;

        if self.trend.first_year().is_none() {
            return Err(self.trend.window_error());
        }

        for (index, region) in self.regions.iter().enumerate() {
            let field = format!("regions[{}]", index);
            validate_non_empty_string(&format!("{}.name", field), &region.name)?;
            match (region.latitude, region.longitude) {
                (Some(latitude), Some(longitude)) => {
                    validate_coordinate(&format!("{}.latitude", field), latitude, 90.0)?;
                    validate_coordinate(&format!("{}.longitude", field), longitude, 180.0)?;
                }
                (None, None) => {}
                _ => {
                    return Err(EngineError::ConfigValidationError {
                        field,
                        message: "latitude and longitude must be given together".to_string(),
                    })
                }
            }
        }
        validate_unique_names("regions", self.regions.iter().map(|r| r.name.as_str()))?;

        Ok(())
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.regions.len(), 8);
        assert_eq!(config.regions[0].name, "Sydney");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_sections() {
        let toml_content = r#"
[estimator]
room_unit = 10000

[trend]
years = 5
terminal_year = 2030

[[regions]]
name = "A"

[[regions]]
name = "B"
latitude = -33.0
longitude = 151.0
reference_price = 900000
"#;

        let config = EngineConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.estimator.room_unit, 10_000);
        assert_eq!(config.estimator.region_unit, 30_000);
        assert_eq!(config.trend.years, 5);
        assert_eq!(config.trend.base_max, 800_000);
        assert_eq!(config.regions.len(), 2);
        assert_eq!(config.regions[1].reference_price, Some(900_000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HPE_TEST_BUDGET_MAX", "1500000");

        let toml_content = r#"
[budget]
max = ${HPE_TEST_BUDGET_MAX}
"#;

        let config = EngineConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.budget.max, 1_500_000);

        std::env::remove_var("HPE_TEST_BUDGET_MAX");
    }

    #[test]
    fn test_inverted_range_fails_validation() {
        let toml_content = r#"
[estimator]
base_min = 900000
base_max = 100000
"#;

        let config = EngineConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_trend_window_before_min_year_fails_validation() {
        let mut config = EngineConfig::default();
        config.trend.years = u32::MAX;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EngineError::ConfigValidationError { field, .. } if field == "trend.years"));

        config.trend.years = 10;
        config.trend.terminal_year = i32::MIN + 9;
        assert!(config.validate().is_ok());
        config.trend.terminal_year = i32::MIN + 8;
        assert!(config.validate().is_err());

        config.trend.years = 0;
        config.trend.terminal_year = i32::MAX;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_region_fails_validation() {
        let toml_content = r#"
[[regions]]
name = "Perth"

[[regions]]
name = "Perth"
"#;

        let config = EngineConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_half_coordinates_fail_validation() {
        let toml_content = r#"
[[regions]]
name = "Perth"
latitude = -31.9505
"#;

        let config = EngineConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = EngineConfig::from_toml_str("[estimator\nroom_unit = ").unwrap_err();
        assert!(matches!(err, EngineError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[recommender]
top_k = 5
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = EngineConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.recommender.top_k, 5);
    }
}
