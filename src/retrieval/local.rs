// src/retrieval/local.rs
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{Retrieval, RetrievalStrategy};
use crate::errors::LoadFailure;

/// Reads the descriptor from disk on the caller's thread.
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn read(&self) -> Result<String, LoadFailure> {
        std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoadFailure::MissingSource,
            _ => LoadFailure::ReadError(e.to_string()),
        })
    }
}

impl RetrievalStrategy for LocalFileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn retrieve(&self) -> Retrieval {
        Retrieval::Text(self.read())
    }
}
