//! Shared fixtures for popcast tests: synthetic ASEAN datasets, canned
//! generator outputs, test doubles for the pipeline seams, and a stub HTTP
//! server for the blocking clients.
//!
//! Data files live in `data/` next to this crate's manifest.

mod doubles;
mod stub_server;

use std::path::PathBuf;

use popcast_core::models::{CountryHistory, CountryProfile, FeatureVector, TrainingRow};
use serde::de::DeserializeOwned;

pub use doubles::{CountingAdjuster, CountingRetriever, Script, ScriptedGenerator};
pub use stub_server::StubServer;

/// Root directory of the fixture data.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Ten ASEAN countries, 2000 through 2023, with growth driven by the
/// birth/death gap plus a small migration term.
pub fn asean_histories() -> Vec<CountryHistory> {
    load_fixture("asean_histories.json")
}

/// The first `n` histories.
pub fn histories(n: usize) -> Vec<CountryHistory> {
    asean_histories().into_iter().take(n).collect()
}

/// Raw generator output by name from `narrative_responses.json`.
///
/// # Panics
/// Panics on an unknown name.
pub fn narrative_response(name: &str) -> String {
    let all: std::collections::BTreeMap<String, String> = load_fixture("narrative_responses.json");
    all.get(name)
        .cloned()
        .unwrap_or_else(|| panic!("no narrative response fixture named {name}"))
}

/// Reference profile: 100M people, birth 15, death 7, GDP 4000, 40% urban,
/// life expectancy 74, fertility 2.0.
pub fn sample_profile() -> CountryProfile {
    CountryProfile {
        name: "Thailand".into(),
        code: "TH".into(),
        population: Some(100_000_000.0),
        birth_rate: Some(15.0),
        death_rate: Some(7.0),
        gdp_per_capita: Some(4000.0),
        urbanization: Some(40.0),
        life_expectancy: Some(74.0),
        fertility_rate: Some(2.0),
        ..Default::default()
    }
}

/// `n` synthetic rows whose label is `(birth - death) / 10`, with birth and
/// death rates sweeping a plausible range.
pub fn synthetic_rows(n: usize) -> Vec<TrainingRow> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n.max(1) as f64;
            let birth = 10.0 + 20.0 * t;
            let death = 5.0 + 4.0 * ((i * 7) % n.max(1)) as f64 / n.max(1) as f64;
            let gdp: f64 = 500.0 + 20_000.0 * t;
            TrainingRow {
                features: FeatureVector {
                    birth_rate: birth,
                    death_rate: death,
                    natural_increase: birth - death,
                    birth_death_ratio: birth / death.max(1.0),
                    gdp_log: gdp.ln_1p(),
                    life_expectancy: 68.0 + 10.0 * t,
                    urbanization: 30.0 + 50.0 * t,
                },
                growth_rate: (birth - death) / 10.0,
            }
        })
        .collect()
}
