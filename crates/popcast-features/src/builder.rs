use popcast_core::errors::PopcastResult;
use popcast_core::models::{CountryProfile, FeatureVector};

use crate::validate::{percentage, required, validate_vector};

/// Build the feature vector for a country snapshot.
///
/// Pure and deterministic. Fails with a validation error when birth rate,
/// death rate, GDP per capita, life expectancy, or urbanization is absent,
/// negative, or non-finite, when urbanization exceeds 100, or when a derived
/// value is not finite.
pub fn build(profile: &CountryProfile) -> PopcastResult<FeatureVector> {
    let birth_rate = required("birthRate", profile.birth_rate)?;
    let death_rate = required("deathRate", profile.death_rate)?;
    let gdp_per_capita = required("gdpPerCapita", profile.gdp_per_capita)?;
    let life_expectancy = required("lifeExpectancy", profile.life_expectancy)?;
    let urbanization = percentage("urbanization", profile.urbanization)?;

    let vector = compose(
        birth_rate,
        death_rate,
        gdp_per_capita,
        life_expectancy,
        urbanization,
    );
    validate_vector(&vector)?;
    Ok(vector)
}

/// Assemble a vector from primary indicators, deriving the rest.
///
/// No validation; callers that accept external input go through [`build`].
pub fn compose(
    birth_rate: f64,
    death_rate: f64,
    gdp_per_capita: f64,
    life_expectancy: f64,
    urbanization: f64,
) -> FeatureVector {
    FeatureVector {
        birth_rate,
        death_rate,
        natural_increase: birth_rate - death_rate,
        birth_death_ratio: birth_rate / death_rate.max(1.0),
        gdp_log: gdp_per_capita.ln_1p(),
        life_expectancy,
        urbanization,
    }
}
