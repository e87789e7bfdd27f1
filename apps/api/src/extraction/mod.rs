// CV extraction core: normalization plus heuristic field extraction.
// Pure and synchronous; callers run it on the blocking pool.

pub mod confidence;
pub mod entries;
pub mod extractor;
pub mod identity;
pub mod keywords;
pub mod models;
pub mod normalize;
pub mod patterns;
pub mod scan;
pub mod vocabulary;

pub use extractor::CvExtractor;
pub use models::ExtractionResult;
pub use vocabulary::Vocabulary;
