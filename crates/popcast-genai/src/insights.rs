//! Analyst insights for a forecast, with a rule-based fallback.

use popcast_core::models::{CountryProfile, ForecastSummary, ModelMetrics};
use popcast_core::traits::ITextGenerator;
use tracing::warn;

use crate::prompts::insights_prompt;

#[derive(Debug, Clone, PartialEq)]
pub struct InsightsOutcome {
    pub insights: Vec<String>,
    /// Why the rule-based fallback was used.
    pub degraded: Option<String>,
}

pub fn generate_insights(
    generator: &dyn ITextGenerator,
    metrics: Option<&ModelMetrics>,
    forecast: &ForecastSummary,
    profile: &CountryProfile,
    max_insights: usize,
) -> InsightsOutcome {
    let max_insights = max_insights.max(1);
    let fallback = |reason: String| InsightsOutcome {
        insights: rule_based_insights(metrics, forecast, profile)
            .into_iter()
            .take(max_insights)
            .collect(),
        degraded: Some(reason),
    };

    if !generator.is_available() {
        return fallback(format!("text generation unavailable ({})", generator.name()));
    }
    match generator.generate(&insights_prompt(metrics, forecast, profile)) {
        Ok(text) => {
            let insights = parse_bullets(&text, max_insights);
            if insights.is_empty() {
                return fallback("empty insights response".to_string());
            }
            InsightsOutcome {
                insights,
                degraded: None,
            }
        }
        Err(e) => {
            warn!(generator = generator.name(), error = %e, "insight generation failed");
            fallback(e.to_string())
        }
    }
}

/// Bullet or numbered lines with their markers stripped. Text without any
/// bullets is returned whole as a single insight.
pub fn parse_bullets(text: &str, max: usize) -> Vec<String> {
    let bullets: Vec<String> = text
        .lines()
        .filter_map(strip_marker)
        .filter(|s| !s.is_empty())
        .take(max)
        .collect();
    if !bullets.is_empty() {
        return bullets;
    }
    let whole = text.trim();
    if whole.is_empty() {
        Vec::new()
    } else {
        vec![whole.to_string()]
    }
}

fn strip_marker(line: &str) -> Option<String> {
    let line = line.trim();
    for marker in ["•", "-", "*"] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest.trim().to_string());
        }
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return Some(rest.trim().to_string());
        }
    }
    None
}

/// Deterministic insights from the numbers alone.
pub fn rule_based_insights(
    metrics: Option<&ModelMetrics>,
    forecast: &ForecastSummary,
    profile: &CountryProfile,
) -> Vec<String> {
    let mut out = Vec::new();

    match metrics {
        Some(m) => {
            let band = if m.val_r2 > 0.9 {
                "very high accuracy"
            } else if m.val_r2 > 0.8 {
                "high accuracy"
            } else {
                "acceptable accuracy"
            };
            out.push(format!("Model R² = {:.1}%: {band}.", m.val_r2 * 100.0));
            out.push(format!(
                "RMSE {:.3} percentage points of annual growth.",
                m.val_rmse
            ));
        }
        None => out.push("Model accuracy unavailable: no trained model metrics.".to_string()),
    }

    match profile.stage {
        Some(2) => out.push(
            "Stage 2 (expansion): rapid growth calls for investment in schools and jobs.".to_string(),
        ),
        Some(3) => out.push(
            "Stage 3: a demographic dividend window with a large working-age share.".to_string(),
        ),
        Some(s) if s >= 4 => out.push(
            "Stage 4+: population ageing; pension and healthcare support will matter.".to_string(),
        ),
        _ => {}
    }

    let direction = if forecast.growth_rate >= 0.0 { "grow" } else { "shrink" };
    out.push(format!(
        "Population is forecast to {direction} {:.2}% over {} years.",
        forecast.growth_rate.abs(),
        forecast.years
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_are_stripped_and_capped() {
        let text = "Intro line\n- first\n* second\n• third\n1. fourth\n2) fifth\n3. sixth";
        assert_eq!(
            parse_bullets(text, 5),
            vec!["first", "second", "third", "fourth", "fifth"]
        );
    }

    #[test]
    fn unbulleted_text_is_one_insight() {
        assert_eq!(parse_bullets("  Growth slows.  ", 5), vec!["Growth slows."]);
        assert!(parse_bullets("   ", 5).is_empty());
    }

    #[test]
    fn rule_based_covers_stage_and_direction() {
        let forecast = ForecastSummary {
            growth_rate: -1.25,
            years: 10,
            final_population: 1.0,
        };
        let profile = CountryProfile {
            stage: Some(4),
            ..CountryProfile::default()
        };
        let out = rule_based_insights(None, &forecast, &profile);
        assert_eq!(out.len(), 3);
        assert!(out[1].contains("ageing"));
        assert!(out[2].contains("shrink 1.25%"));
    }
}
