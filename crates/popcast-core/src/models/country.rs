use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Point-in-time indicators for one country, supplied per request.
///
/// Indicators are optional so an absent field can be told apart from a
/// zero; the feature builder decides which ones are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct CountryProfile {
    pub name: String,
    /// ISO 3166-1 alpha-2 code.
    #[serde(alias = "country_code")]
    pub code: String,
    pub population: Option<f64>,
    /// Births per 1,000 people per year.
    pub birth_rate: Option<f64>,
    /// Deaths per 1,000 people per year.
    pub death_rate: Option<f64>,
    /// USD.
    pub gdp_per_capita: Option<f64>,
    /// Percent of population living in urban areas.
    pub urbanization: Option<f64>,
    pub education_index: Option<f64>,
    /// Percent of GDP.
    pub healthcare_spending: Option<f64>,
    /// Births per woman.
    pub fertility_rate: Option<f64>,
    pub median_age: Option<f64>,
    /// Years.
    pub life_expectancy: Option<f64>,
    /// Demographic transition stage, 1 through 5.
    pub stage: Option<u8>,
}

/// One observed year in a country's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct YearRecord {
    pub year: i32,
    #[serde(alias = "pop")]
    pub population: f64,
    #[serde(alias = "birth")]
    pub birth_rate: f64,
    #[serde(alias = "death")]
    pub death_rate: f64,
    #[serde(alias = "gdp")]
    pub gdp_per_capita: f64,
}

/// Historical series used to build training rows.
///
/// Urbanization and life expectancy are country-level values applied to
/// every year of the series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct CountryHistory {
    pub name: String,
    #[serde(alias = "country_code")]
    pub code: String,
    pub urbanization: Option<f64>,
    pub life_expectancy: Option<f64>,
    pub historical_data: Vec<YearRecord>,
}
