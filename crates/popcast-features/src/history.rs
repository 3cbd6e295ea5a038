use popcast_core::errors::{PopcastResult, ValidationError};
use popcast_core::models::{CountryHistory, TrainingRow};
use tracing::debug;

use crate::builder::compose;
use crate::validate::{percentage, required, validate_population, validate_vector};

/// Extract one training row per consecutive pair of years.
///
/// The label is the observed percent growth from year `t` to `t + 1`; the
/// features are year `t`'s rates with the country's static life expectancy
/// and urbanization. Records are ordered by year first.
pub fn rows_from_history(history: &CountryHistory) -> PopcastResult<Vec<TrainingRow>> {
    let life_expectancy = required("lifeExpectancy", history.life_expectancy)?;
    let urbanization = percentage("urbanization", history.urbanization)?;

    let mut records = history.historical_data.clone();
    records.sort_by_key(|r| r.year);

    let mut rows = Vec::with_capacity(records.len().saturating_sub(1));
    for pair in records.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if next.year == current.year {
            return Err(ValidationError::Invalid {
                reason: format!("{}: duplicate year {}", history.name, current.year),
            }
            .into());
        }
        let pop_now = validate_population(current.population)?;
        let pop_next = validate_population(next.population)?;

        let features = compose(
            required("birthRate", Some(current.birth_rate))?,
            required("deathRate", Some(current.death_rate))?,
            required("gdpPerCapita", Some(current.gdp_per_capita))?,
            life_expectancy,
            urbanization,
        );
        validate_vector(&features)?;

        rows.push(TrainingRow {
            features,
            growth_rate: (pop_next - pop_now) / pop_now * 100.0,
        });
    }

    debug!(country = %history.name, rows = rows.len(), "extracted training rows");
    Ok(rows)
}
