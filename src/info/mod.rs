// src/info/mod.rs
pub mod escape;
pub mod filetime;
pub mod parser;

pub use parser::parse_build_info;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Id reported when no valid build descriptor could be loaded.
pub const UNAVAILABLE_ID: &str = "unavailable";

/// Lifecycle of a loader. `Loaded` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Error,
    Loaded,
}

impl LoadState {
    pub fn is_terminal(self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Error)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMetadata {
    pub id: String,
    pub date: String,
    pub bundle_version: String,
    pub tag: String,
    pub branch: String,
}

impl BuildMetadata {
    /// Placeholder written when loading fails.
    pub fn unavailable() -> Self {
        Self {
            id: UNAVAILABLE_ID.to_string(),
            ..Self::default()
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.id == UNAVAILABLE_ID
    }
}

impl fmt::Display for BuildMetadata {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({}) {}", self.id, self.bundle_version, self.date)?;
        if !self.tag.is_empty() {
            write!(f, " tag={}", self.tag)?;
        }
        if !self.branch.is_empty() {
            write!(f, " branch={}", self.branch)?;
        }
        Ok(())
    }
}
