mod adjuster;
mod embedding;
mod generator;
mod retriever;

pub use adjuster::INarrativeAdjuster;
pub use embedding::IEmbeddingProvider;
pub use generator::ITextGenerator;
pub use retriever::IContextRetriever;
