use popcast_core::config::AugmentationConfig;
use popcast_core::models::TrainingRow;
use popcast_features::compose;
use rand::rngs::StdRng;
use rand::Rng;

/// Append `copies_per_row` jittered copies of every row.
///
/// Each primary indicator (birth rate, death rate, GDP per capita, life
/// expectancy, urbanization) and the label are scaled by independent factors
/// drawn from `[1 - noise_scale, 1 + noise_scale]`. Derived features are
/// recomputed so copies stay internally consistent.
pub fn augment(rows: &[TrainingRow], config: &AugmentationConfig, rng: &mut StdRng) -> Vec<TrainingRow> {
    let mut out = Vec::with_capacity(rows.len() * (config.copies_per_row + 1));
    out.extend_from_slice(rows);

    let s = config.noise_scale;
    let jitter = |rng: &mut StdRng| {
        if s > 0.0 {
            1.0 + rng.gen_range(-s..=s)
        } else {
            1.0
        }
    };

    for row in rows {
        let f = &row.features;
        let gdp = f.gdp_per_capita();
        for _ in 0..config.copies_per_row {
            let features = compose(
                f.birth_rate * jitter(rng),
                f.death_rate * jitter(rng),
                gdp * jitter(rng),
                f.life_expectancy * jitter(rng),
                f.urbanization * jitter(rng),
            );
            out.push(TrainingRow {
                features,
                growth_rate: row.growth_rate * jitter(rng),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn config(copies: usize, noise: f64) -> AugmentationConfig {
        AugmentationConfig {
            enabled: true,
            copies_per_row: copies,
            noise_scale: noise,
            ..Default::default()
        }
    }

    #[test]
    fn multiplies_row_count() {
        let rows = test_fixtures::synthetic_rows(12);
        let out = augment(&rows, &config(9, 0.08), &mut StdRng::seed_from_u64(42));
        assert_eq!(out.len(), 120);
        assert_eq!(&out[..12], &rows[..]);
    }

    #[test]
    fn jitter_stays_within_bounds_and_derivations_hold() {
        let rows = test_fixtures::synthetic_rows(5);
        let out = augment(&rows, &config(20, 0.08), &mut StdRng::seed_from_u64(3));
        for (i, copy) in out[5..].iter().enumerate() {
            let source = &rows[i / 20];
            let ratio = copy.features.birth_rate / source.features.birth_rate;
            assert!((0.92 - 1e-12..=1.08 + 1e-12).contains(&ratio));
            let label_ratio = copy.growth_rate / source.growth_rate;
            assert!((0.92 - 1e-12..=1.08 + 1e-12).contains(&label_ratio));
            let f = copy.features;
            assert!((f.natural_increase - (f.birth_rate - f.death_rate)).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_noise_duplicates_rows() {
        let rows = test_fixtures::synthetic_rows(3);
        let out = augment(&rows, &config(2, 0.0), &mut StdRng::seed_from_u64(1));
        assert_eq!(out.len(), 9);
        assert!((out[3].features.gdp_log - rows[0].features.gdp_log).abs() < 1e-9);
        assert_eq!(out[3].growth_rate, rows[0].growth_rate);
    }
}
