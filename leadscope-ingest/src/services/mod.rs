//! Pipeline services

pub mod batch;
pub mod cache;
pub mod categorizer;
pub mod dedup;
pub mod expand;
pub mod gemini;
pub mod pipeline;
pub mod prompts;
pub mod scoring;
pub mod single;

pub use batch::{BatchCategorizer, BatchConfig, BatchOutcome, ProgressFn};
pub use cache::CategorizationCache;
pub use categorizer::{Categorizer, CategorizerError};
pub use gemini::GeminiClient;
pub use pipeline::{IngestPipeline, IngestSummary};
pub use scoring::{LeadScorer, ScoringConfig};
pub use single::SingleCategorizer;
