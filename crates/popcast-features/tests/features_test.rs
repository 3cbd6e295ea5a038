use popcast_core::models::{CountryHistory, CountryProfile, FeatureName, YearRecord};
use popcast_features::{build, normalize, rows_from_history};
use proptest::prelude::*;

fn profile_strategy() -> impl Strategy<Value = CountryProfile> {
    (
        0.0f64..60.0,
        0.0f64..30.0,
        0.0f64..150_000.0,
        30.0f64..95.0,
        0.0f64..=100.0,
    )
        .prop_map(|(birth, death, gdp, life, urban)| CountryProfile {
            name: "Synthetic".into(),
            code: "SY".into(),
            birth_rate: Some(birth),
            death_rate: Some(death),
            gdp_per_capita: Some(gdp),
            life_expectancy: Some(life),
            urbanization: Some(urban),
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn build_is_deterministic(profile in profile_strategy()) {
        let a = build(&profile).unwrap();
        let b = build(&profile).unwrap();
        prop_assert_eq!(
            a.to_array().map(f64::to_bits),
            b.to_array().map(f64::to_bits)
        );
    }

    #[test]
    fn derived_features_are_consistent(profile in profile_strategy()) {
        let v = build(&profile).unwrap();
        prop_assert_eq!(v.natural_increase, v.birth_rate - v.death_rate);
        prop_assert!(v.birth_death_ratio <= v.birth_rate);
        prop_assert!(normalize(&v).iter().all(|x| x.is_finite()));
    }
}

#[test]
fn reference_profile_builds() {
    let profile = test_fixtures::sample_profile();
    let v = build(&profile).unwrap();
    assert_eq!(v.birth_rate, 15.0);
    assert_eq!(v.urbanization, 40.0);
    assert_eq!(v.iter().count(), FeatureName::COUNT);
}

#[test]
fn history_yields_one_row_per_year_pair() {
    let histories = test_fixtures::asean_histories();
    for history in &histories {
        let rows = rows_from_history(history).unwrap();
        assert_eq!(rows.len(), history.historical_data.len() - 1);
    }
}

#[test]
fn history_label_is_percent_growth() {
    let history = CountryHistory {
        name: "Testland".into(),
        code: "TL".into(),
        urbanization: Some(50.0),
        life_expectancy: Some(70.0),
        historical_data: vec![
            YearRecord {
                year: 2001,
                population: 110.0,
                birth_rate: 14.0,
                death_rate: 7.0,
                gdp_per_capita: 2100.0,
            },
            YearRecord {
                year: 2000,
                population: 100.0,
                birth_rate: 15.0,
                death_rate: 7.0,
                gdp_per_capita: 2000.0,
            },
        ],
    };
    let rows = rows_from_history(&history).unwrap();
    assert_eq!(rows.len(), 1);
    assert!((rows[0].growth_rate - 10.0).abs() < 1e-9);
    assert_eq!(rows[0].features.birth_rate, 15.0);
    assert_eq!(rows[0].features.life_expectancy, 70.0);
}

#[test]
fn history_with_zero_population_is_rejected() {
    let mut history = test_fixtures::asean_histories().remove(0);
    history.historical_data[3].population = 0.0;
    assert!(rows_from_history(&history).is_err());
}

#[test]
fn history_without_country_meta_is_rejected() {
    let mut history = test_fixtures::asean_histories().remove(0);
    history.urbanization = None;
    assert!(rows_from_history(&history).is_err());
}
