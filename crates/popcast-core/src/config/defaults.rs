// Single source of truth for all default values.

// --- Model (gradient boosting) ---
pub const DEFAULT_N_ESTIMATORS: usize = 300;
pub const DEFAULT_LEARNING_RATE: f64 = 0.05;
pub const DEFAULT_MAX_DEPTH: usize = 4;
pub const DEFAULT_MIN_CHILD_WEIGHT: f64 = 3.0;
pub const DEFAULT_SUBSAMPLE: f64 = 0.8;
pub const DEFAULT_COLSAMPLE_BYTREE: f64 = 0.8;
pub const DEFAULT_GAMMA: f64 = 0.3;
pub const DEFAULT_REG_ALPHA: f64 = 0.5;
pub const DEFAULT_REG_LAMBDA: f64 = 1.0;
pub const DEFAULT_ARTIFACT_PATH: &str = "./models/population_model.json";

// --- Training ---
pub const DEFAULT_MIN_TRAINING_ROWS: usize = 10;
pub const DEFAULT_VALIDATION_FRACTION: f64 = 0.2;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_AUGMENTATION_ENABLED: bool = true;
pub const DEFAULT_AUGMENTATION_COPIES: usize = 9;
pub const DEFAULT_AUGMENTATION_NOISE: f64 = 0.08;
pub const DEFAULT_AUGMENTATION_MAX_ORGANIC_ROWS: usize = 1_000;

// --- Forecast ---
pub const DEFAULT_MAX_YEARS: u32 = 75;
pub const DEFAULT_BASE_YEAR: i32 = 2025;
pub const DEFAULT_FORECAST_YEARS: i64 = 10;
pub const DEFAULT_BIRTH_RATE_FACTOR: f64 = 0.995;
pub const DEFAULT_DEATH_RATE_FACTOR: f64 = 1.01;
pub const DEFAULT_GDP_GROWTH_FACTOR: f64 = 1.03;
pub const DEFAULT_LIFE_EXPECTANCY_STEP: f64 = 0.1;

// --- Retrieval ---
pub const DEFAULT_INDEX_PATH: &str = "./vector_db/context.db";
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_MAX_TOP_K: usize = 20;
pub const DEFAULT_MIN_SCORE: f64 = 0.0;
pub const DEFAULT_SNIPPET_CHARS: usize = 280;
pub const DEFAULT_RETRIEVAL_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_RETRIEVAL_CACHE_CAPACITY: u64 = 256;
pub const DEFAULT_QUERY_TEMPLATE: &str =
    "{country} population birth incentive policy pandemic demographic change";

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashing";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_API_KEY_ENV: &str = "OPENAI_API_KEY";

// --- GenAI ---
pub const DEFAULT_GENAI_PROVIDER: &str = "gemini";
pub const DEFAULT_GEMINI_MODEL: &str = "models/gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_GENAI_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_GENAI_MAX_RETRIES: u32 = 1;
pub const DEFAULT_GENAI_MAX_TOKENS: u32 = 500;
pub const DEFAULT_GENAI_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_ABS_DELTA: f64 = 5.0;
pub const DEFAULT_MAX_INSIGHTS: usize = 5;

// --- Server ---
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
