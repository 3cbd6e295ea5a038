use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::ValidationError;

/// The fixed, ordered set of model inputs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum FeatureName {
    BirthRate,
    DeathRate,
    NaturalIncrease,
    BirthDeathRatio,
    GdpLog,
    LifeExpectancy,
    Urbanization,
}

impl FeatureName {
    pub const COUNT: usize = 7;

    /// Canonical order. Model columns follow this order.
    pub const ALL: [FeatureName; FeatureName::COUNT] = [
        FeatureName::BirthRate,
        FeatureName::DeathRate,
        FeatureName::NaturalIncrease,
        FeatureName::BirthDeathRatio,
        FeatureName::GdpLog,
        FeatureName::LifeExpectancy,
        FeatureName::Urbanization,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureName::BirthRate => "birthRate",
            FeatureName::DeathRate => "deathRate",
            FeatureName::NaturalIncrease => "naturalIncrease",
            FeatureName::BirthDeathRatio => "birthDeathRatio",
            FeatureName::GdpLog => "gdpLog",
            FeatureName::LifeExpectancy => "lifeExpectancy",
            FeatureName::Urbanization => "urbanization",
        }
    }

    /// Column index in [`FeatureName::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureName {
    type Err = ValidationError;

    /// Accepts the camelCase name or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FeatureName::ALL
            .into_iter()
            .find(|name| {
                name.as_str() == trimmed || to_snake_case(name.as_str()) == trimmed
            })
            .ok_or_else(|| ValidationError::Invalid {
                reason: format!("unknown feature name: {trimmed}"),
            })
    }
}

fn to_snake_case(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    for c in camel.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Model input in natural units.
///
/// `naturalIncrease = birthRate - deathRate`,
/// `birthDeathRatio = birthRate / max(deathRate, 1)`,
/// `gdpLog = ln(1 + gdpPerCapita)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FeatureVector {
    pub birth_rate: f64,
    pub death_rate: f64,
    pub natural_increase: f64,
    pub birth_death_ratio: f64,
    pub gdp_log: f64,
    pub life_expectancy: f64,
    pub urbanization: f64,
}

impl FeatureVector {
    pub fn get(&self, name: FeatureName) -> f64 {
        match name {
            FeatureName::BirthRate => self.birth_rate,
            FeatureName::DeathRate => self.death_rate,
            FeatureName::NaturalIncrease => self.natural_increase,
            FeatureName::BirthDeathRatio => self.birth_death_ratio,
            FeatureName::GdpLog => self.gdp_log,
            FeatureName::LifeExpectancy => self.life_expectancy,
            FeatureName::Urbanization => self.urbanization,
        }
    }

    pub fn set(&mut self, name: FeatureName, value: f64) {
        let slot = match name {
            FeatureName::BirthRate => &mut self.birth_rate,
            FeatureName::DeathRate => &mut self.death_rate,
            FeatureName::NaturalIncrease => &mut self.natural_increase,
            FeatureName::BirthDeathRatio => &mut self.birth_death_ratio,
            FeatureName::GdpLog => &mut self.gdp_log,
            FeatureName::LifeExpectancy => &mut self.life_expectancy,
            FeatureName::Urbanization => &mut self.urbanization,
        };
        *slot = value;
    }

    /// Values in [`FeatureName::ALL`] order.
    pub fn to_array(&self) -> [f64; FeatureName::COUNT] {
        FeatureName::ALL.map(|name| self.get(name))
    }

    pub fn from_array(values: [f64; FeatureName::COUNT]) -> Self {
        Self {
            birth_rate: values[0],
            death_rate: values[1],
            natural_increase: values[2],
            birth_death_ratio: values[3],
            gdp_log: values[4],
            life_expectancy: values[5],
            urbanization: values[6],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, f64)> + '_ {
        FeatureName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }

    /// The first non-finite feature, if any.
    pub fn first_non_finite(&self) -> Option<FeatureName> {
        self.iter().find(|(_, v)| !v.is_finite()).map(|(name, _)| name)
    }

    /// GDP per capita recovered from `gdpLog`.
    pub fn gdp_per_capita(&self) -> f64 {
        self.gdp_log.exp_m1()
    }
}
