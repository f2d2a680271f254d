pub mod prompt_builder;
pub mod response_normalizer;

pub use prompt_builder::{PromptBuilder, SUMMARY_MARKER};
pub use response_normalizer::{ExtractionFailure, ExtractionOutcome, JsonSource, ResponseNormalizer};
