//! Entity extraction: span types, extractor backends and the merge policy.
//!
//! Two extractors run over the same normalized text. The domain extractor
//! labels bibliographic fields (title, edition, volume, ISBN, authors); the
//! general extractor finds person names. [`EntityMerger`] combines both into
//! the final ordered span list and [`ExtractionPipeline`] drives a request
//! end to end.

mod types;
mod traits;
mod pattern_extractor;
mod remote_extractor;
pub mod config;
pub mod merger;
pub mod pipeline;

pub use types::*;
pub use traits::*;
pub use pattern_extractor::*;
pub use remote_extractor::*;
pub use config::*;
pub use merger::*;
pub use pipeline::*;
