//! # popcast-features
//!
//! Turns raw country indicators into the fixed, ordered [`FeatureVector`]
//! the forecast model consumes, and historical series into training rows.
//!
//! | Feature | Source | Scale |
//! |---------|--------|-------|
//! | birthRate | birth rate | /50 |
//! | deathRate | death rate | /20 |
//! | naturalIncrease | birth − death | /30 |
//! | birthDeathRatio | birth / max(death, 1) | /1 |
//! | gdpLog | ln(1 + GDP per capita) | /15 |
//! | lifeExpectancy | life expectancy | /100 |
//! | urbanization | urbanization % | /100 |
//!
//! Vectors hold natural units; [`normalize`] applies the scale column.
//!
//! [`FeatureVector`]: popcast_core::models::FeatureVector

mod builder;
mod history;
mod normalize;
mod validate;

pub use builder::{build, compose};
pub use history::rows_from_history;
pub use normalize::{normalize, normalize_into};
pub use validate::{validate_adjusted, validate_population, validate_vector};
