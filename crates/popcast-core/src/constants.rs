/// popcast version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the persisted model artifact layout.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Fixed divisors mapping natural-unit features to model inputs, in
/// `FeatureName::ALL` order.
pub const FEATURE_SCALES: [f64; 7] = [50.0, 20.0, 30.0, 1.0, 15.0, 100.0, 100.0];

/// Component names used in degradation events and log fields.
pub mod components {
    pub const RETRIEVER: &str = "context_retriever";
    pub const ADJUSTER: &str = "narrative_adjuster";
    pub const INSIGHTS: &str = "insights";
    pub const CHAT: &str = "chat";
    pub const EMBEDDINGS: &str = "embeddings";
}

/// ASEAN member states served by the dashboard, as `(code, name)`.
pub const ASEAN_COUNTRIES: [(&str, &str); 10] = [
    ("BN", "Brunei"),
    ("KH", "Cambodia"),
    ("ID", "Indonesia"),
    ("LA", "Laos"),
    ("MY", "Malaysia"),
    ("MM", "Myanmar"),
    ("PH", "Philippines"),
    ("SG", "Singapore"),
    ("TH", "Thailand"),
    ("VN", "Vietnam"),
];

/// Display name for an ISO code, if it is an ASEAN member.
pub fn country_name(code: &str) -> Option<&'static str> {
    ASEAN_COUNTRIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}
