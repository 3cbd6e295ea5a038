//! Span definitions per operation: training, forecast, retrieval, generation.

/// Create a training span.
#[macro_export]
macro_rules! training_span {
    ($rows:expr) => {
        tracing::info_span!("popcast.training", rows = $rows)
    };
}

/// Create a forecast span.
#[macro_export]
macro_rules! forecast_span {
    ($country:expr, $years:expr, $use_rag:expr) => {
        tracing::info_span!(
            "popcast.forecast",
            country = %$country,
            years = $years,
            use_rag = $use_rag
        )
    };
}

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($country:expr, $top_k:expr) => {
        tracing::info_span!("popcast.retrieval", country = %$country, top_k = $top_k)
    };
}

/// Create a text generation span.
#[macro_export]
macro_rules! generation_span {
    ($purpose:expr, $generator:expr) => {
        tracing::info_span!("popcast.generation", purpose = %$purpose, generator = %$generator)
    };
}

pub mod names {
    pub const TRAINING: &str = "popcast.training";
    pub const FORECAST: &str = "popcast.forecast";
    pub const RETRIEVAL: &str = "popcast.retrieval";
    pub const GENERATION: &str = "popcast.generation";
}
