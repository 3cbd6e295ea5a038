use popcast_core::errors::{PopcastResult, ValidationError};
use popcast_core::models::FeatureVector;

/// A population must be finite and strictly positive.
pub fn validate_population(population: f64) -> PopcastResult<f64> {
    if !population.is_finite() {
        return Err(ValidationError::non_finite("population").into());
    }
    if population <= 0.0 {
        return Err(ValidationError::out_of_range("population", population, "must be positive").into());
    }
    Ok(population)
}

/// Every feature must be finite.
pub fn validate_vector(vector: &FeatureVector) -> PopcastResult<()> {
    match vector.first_non_finite() {
        Some(name) => Err(ValidationError::non_finite(name.as_str()).into()),
        None => Ok(()),
    }
}

/// Range check for a vector that was shifted after [`build`](crate::build).
///
/// Primary indicators must still satisfy the input rules: rates and life
/// expectancy non-negative, urbanization within `[0, 100]`, `gdpLog`
/// non-negative. Derived features only need to be finite.
pub fn validate_adjusted(vector: &FeatureVector) -> PopcastResult<()> {
    validate_vector(vector)?;
    required("birthRate", Some(vector.birth_rate))?;
    required("deathRate", Some(vector.death_rate))?;
    required("gdpLog", Some(vector.gdp_log))?;
    required("lifeExpectancy", Some(vector.life_expectancy))?;
    percentage("urbanization", Some(vector.urbanization))?;
    Ok(())
}

/// A required, non-negative, finite indicator.
pub(crate) fn required(field: &str, value: Option<f64>) -> PopcastResult<f64> {
    let value = value.ok_or_else(|| ValidationError::missing(field))?;
    if !value.is_finite() {
        return Err(ValidationError::non_finite(field).into());
    }
    if value < 0.0 {
        return Err(ValidationError::out_of_range(field, value, "must not be negative").into());
    }
    Ok(value)
}

/// A percentage in `[0, 100]`.
pub(crate) fn percentage(field: &str, value: Option<f64>) -> PopcastResult<f64> {
    let value = required(field, value)?;
    if value > 100.0 {
        return Err(ValidationError::out_of_range(field, value, "must not exceed 100").into());
    }
    Ok(value)
}
