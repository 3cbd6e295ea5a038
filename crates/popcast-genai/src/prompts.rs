//! Prompt templates.

use std::fmt::Write;

use popcast_core::models::{
    ChatContext, CountryProfile, FeatureName, FeatureVector, ForecastSummary, ModelMetrics,
    RetrievedContext,
};

/// Prompt asking for feature adjustments justified by the retrieved context.
pub fn adjustment_prompt(base: &FeatureVector, context: &RetrievedContext, max_abs_delta: f64) -> String {
    let mut p = String::from(
        "You are adjusting the inputs of a gradient-boosted population growth model \
         using recent news and policy documents.\n\nCurrent model inputs:\n",
    );
    for (name, value) in base.iter() {
        let _ = writeln!(p, "- {name}: {value:.3}");
    }
    let _ = writeln!(p, "- (gdpPerCapita, USD: {:.0})", base.gdp_per_capita());

    p.push_str("\nRelevant documents:\n");
    for (i, s) in context.iter().enumerate() {
        let _ = writeln!(
            p,
            "{}. {} (relevance {:.2})\n   {}",
            i + 1,
            s.title,
            s.relevance_score,
            s.snippet
        );
    }

    let names: Vec<&str> = FeatureName::ALL.iter().map(|n| n.as_str()).collect();
    let _ = write!(
        p,
        "\nBased only on these documents, propose signed additive changes to the inputs. \
         Allowed keys: {}. Each change must be within ±{max_abs_delta}. \
         Omit inputs that should not change. A birth incentive policy may raise birthRate; \
         an epidemic may raise deathRate.\n\n\
         Reply with JSON only, in this format:\n\
         {{\"adjustments\": {{\"birthRate\": 0.3}}, \"summary\": \"one or two sentences\", \
         \"insights\": [\"short point\"], \"confidence\": 0.6}}\n",
        names.join(", ")
    );
    p
}

/// Prompt for 3 to 5 analyst bullet points about a forecast.
pub fn insights_prompt(
    metrics: Option<&ModelMetrics>,
    forecast: &ForecastSummary,
    profile: &CountryProfile,
) -> String {
    let name = if profile.name.is_empty() { "the country" } else { profile.name.as_str() };
    let mut p = format!("A gradient-boosted model forecasts population for {name}.\n\n");

    if let Some(m) = metrics {
        let top = m.top_feature().map(|f| f.as_str()).unwrap_or("n/a");
        let _ = write!(
            p,
            "Model results:\n- R²: {:.3} ({:.1}%)\n- RMSE: {:.3}%\n- MAE: {:.3}%\n- Most important input: {top}\n\n",
            m.val_r2,
            m.val_r2 * 100.0,
            m.val_rmse,
            m.val_mae
        );
    }

    p.push_str("Country data:\n");
    let fields = [
        ("Population", profile.population),
        ("Birth rate (per 1,000)", profile.birth_rate),
        ("Death rate (per 1,000)", profile.death_rate),
        ("GDP per capita (USD)", profile.gdp_per_capita),
        ("Median age", profile.median_age),
        ("Fertility rate", profile.fertility_rate),
    ];
    for (label, value) in fields {
        if let Some(v) = value {
            let _ = writeln!(p, "- {label}: {v}");
        }
    }
    if let Some(stage) = profile.stage {
        let _ = writeln!(p, "- Demographic transition stage: {stage}");
    }

    let _ = write!(
        p,
        "\nForecast:\n- Total growth: {:.2}% over {} years\n- Final population: {:.0}\n\n\
         Write 3 to 5 short bullet points, one per line starting with \"- \", as a demographer \
         would: assess model accuracy, describe the population trend, suggest policy where \
         relevant and flag risks.\n",
        forecast.growth_rate, forecast.years, forecast.final_population
    );
    p
}

/// Stateless chat prompt built from the dashboard context.
pub fn chat_prompt(message: &str, context: &ChatContext, model_r2: Option<f64>) -> String {
    let mut p = String::from(
        "You are an assistant specialised in population analysis and demography. \
         Answer questions about population trends, forecasts and related policy.\n",
    );

    let mut ctx = String::new();
    if let Some(country) = context.country.as_deref().filter(|c| !c.is_empty()) {
        let _ = writeln!(ctx, "- Country: {country}");
    }
    if let Some(pop) = context.population {
        let _ = writeln!(ctx, "- Population: {pop:.0}");
    }
    if let Some(years) = context.forecast_years {
        let _ = writeln!(ctx, "- Forecast horizon: {years} years");
    }
    let _ = writeln!(
        ctx,
        "- Context-aware adjustments: {}",
        if context.use_rag { "enabled" } else { "disabled" }
    );
    for (name, delta) in &context.adjustments {
        let _ = writeln!(ctx, "- Adjustment {name}: {delta:+}");
    }
    if let Some(r2) = model_r2 {
        let _ = writeln!(ctx, "- Model R²: {r2:.3}");
    }
    let _ = write!(p, "\nContext:\n{ctx}\nUser question: {message}\n\nAnswer clearly and accurately.");
    p
}
