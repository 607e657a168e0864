// ============================================================================
// FILE: src/lib.rs - Library Root
// ============================================================================
pub mod config;
pub mod errors;
pub mod info;
pub mod loader;
pub mod retrieval;
pub mod stamp;

pub use config::{LoaderConfig, SourceConfig};
pub use errors::{BuildInfoError, LoadFailure};
pub use info::{BuildMetadata, LoadState, UNAVAILABLE_ID};
pub use loader::BuildInfoService;
pub use retrieval::{Retrieval, RetrievalStrategy};
