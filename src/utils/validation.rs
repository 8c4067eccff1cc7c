use crate::utils::error::{EngineError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Input-domain check for request values (room count, budget).
pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EngineError::invalid_input(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Configuration check that a `[min, max]` pair is not inverted.
pub fn validate_ordered_bounds<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    min: T,
    max: T,
) -> Result<()> {
    if min > max {
        return Err(EngineError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("minimum {} exceeds maximum {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(EngineError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EngineError::ConfigValidationError {
            field: field_name.to_string(),
            message: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique_names<'a>(
    field_name: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(EngineError::ConfigValidationError {
                field: field_name.to_string(),
                message: format!("duplicate name '{}'", name),
            });
        }
    }
    Ok(())
}

pub fn validate_coordinate(field_name: &str, value: f64, limit: f64) -> Result<()> {
    if !value.is_finite() || value.abs() > limit {
        return Err(EngineError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("{} is outside [-{}, {}]", value, limit, limit),
        });
    }
    Ok(())
}
