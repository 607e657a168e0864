// src/retrieval/mod.rs
pub mod fixed;
pub mod local;
pub mod network;

pub use fixed::FixedEnvironmentSource;
pub use local::LocalFileSource;
pub use network::NetworkSource;

use futures::future::BoxFuture;

use crate::{
    config::{LoaderConfig, SourceConfig},
    errors::LoadFailure,
    info::BuildMetadata,
};

pub type FetchFuture = BoxFuture<'static, Result<String, LoadFailure>>;

/// Outcome of starting a retrieval.
pub enum Retrieval {
    /// Text read on the calling thread, still to be parsed.
    Text(Result<String, LoadFailure>),
    /// A record built without any external source.
    Record(BuildMetadata),
    /// Text that arrives later.
    Pending(FetchFuture),
}

pub trait RetrievalStrategy: Send + Sync {
    /// Human readable source location, used in logs.
    fn location(&self) -> String;

    fn retrieve(&self) -> Retrieval;
}

pub fn from_config(config: &LoaderConfig) -> Box<dyn RetrievalStrategy> {
    match &config.source {
        SourceConfig::LocalFile { base_dir } => {
            Box::new(LocalFileSource::new(config.local_path(base_dir)))
        }
        SourceConfig::Network { base_url } => Box::new(NetworkSource::new(config.url(base_url))),
        SourceConfig::FixedEnvironment {
            id,
            tag,
            branch,
            bundle_version,
        } => Box::new(FixedEnvironmentSource::new(fixed::FixedValues {
            id: id.clone(),
            tag: tag.clone(),
            branch: branch.clone(),
            bundle_version: bundle_version.clone(),
        })),
    }
}
