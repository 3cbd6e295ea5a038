//! Structured log events for key pipeline operations.

pub fn model_trained(model_version: &str, rows: usize, val_r2: f64, training_time: f64) {
    tracing::info!(
        event = "model_trained",
        model_version = %model_version,
        rows = rows,
        val_r2 = val_r2,
        training_time = training_time,
        "model trained"
    );
}

pub fn forecast_completed(country: &str, years: u32, narrative: &str) {
    tracing::info!(
        event = "forecast_completed",
        country = %country,
        years = years,
        narrative = %narrative,
        "forecast completed"
    );
}

pub fn adjustments_applied(country: &str, count: usize, ignored: usize) {
    tracing::info!(
        event = "adjustments_applied",
        country = %country,
        count = count,
        ignored = ignored,
        "narrative adjustments applied"
    );
}

pub fn documents_ingested(inserted: usize, replaced: usize) {
    tracing::info!(
        event = "documents_ingested",
        inserted = inserted,
        replaced = replaced,
        "context documents ingested"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

pub fn component_recovered(component: &str) {
    tracing::info!(
        event = "component_recovered",
        component = %component,
        "component recovered"
    );
}
