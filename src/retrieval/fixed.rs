// src/retrieval/fixed.rs
use chrono::Utc;

use super::{Retrieval, RetrievalStrategy};
use crate::info::{filetime::format_timestamp, BuildMetadata};

pub const ENV_ID: &str = "BUILDINFO_ID";
pub const ENV_TAG: &str = "BUILDINFO_TAG";
pub const ENV_BRANCH: &str = "BUILDINFO_BRANCH";
pub const ENV_BUNDLE_VERSION: &str = "BUILDINFO_BUNDLE_VERSION";

/// Id used when neither the config nor the environment provides one.
pub const DEFAULT_FIXED_ID: &str = "editor";

#[derive(Debug, Clone, Default)]
pub struct FixedValues {
    pub id: Option<String>,
    pub tag: Option<String>,
    pub branch: Option<String>,
    pub bundle_version: Option<String>,
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Development builds have no descriptor on disk, so the record is assembled
/// from whatever the local environment knows.
pub struct FixedEnvironmentSource {
    values: FixedValues,
    lookup: EnvLookup,
}

impl FixedEnvironmentSource {
    pub fn new(values: FixedValues) -> Self {
        Self::with_lookup(values, |var| std::env::var(var).ok())
    }

    /// Reads fallback values through `lookup` instead of the process environment.
    pub fn with_lookup(
        values: FixedValues,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            values,
            lookup: Box::new(lookup),
        }
    }

    pub fn build_record(&self) -> BuildMetadata {
        BuildMetadata {
            id: self
                .pick(&self.values.id, ENV_ID)
                .unwrap_or_else(|| DEFAULT_FIXED_ID.to_string()),
            date: format_timestamp(&Utc::now()),
            bundle_version: self
                .pick(&self.values.bundle_version, ENV_BUNDLE_VERSION)
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            tag: self.pick(&self.values.tag, ENV_TAG).unwrap_or_default(),
            branch: self.pick(&self.values.branch, ENV_BRANCH).unwrap_or_default(),
        }
    }

    fn pick(&self, configured: &Option<String>, var: &str) -> Option<String> {
        configured
            .clone()
            .filter(|value| !value.is_empty())
            .or_else(|| (self.lookup)(var).filter(|value| !value.is_empty()))
    }
}

impl RetrievalStrategy for FixedEnvironmentSource {
    fn location(&self) -> String {
        "<environment>".to_string()
    }

    fn retrieve(&self) -> Retrieval {
        Retrieval::Record(self.build_record())
    }
}
