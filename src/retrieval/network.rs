// src/retrieval/network.rs
use std::time::Duration;

use super::{Retrieval, RetrievalStrategy};
use crate::errors::LoadFailure;

/// Fetches the descriptor over HTTP on the runtime's blocking pool.
pub struct NetworkSource {
    url: String,
    agent: ureq::Agent,
}

impl NetworkSource {
    pub fn new(url: String) -> Self {
        // Connect timeout only; the body read is left unbounded.
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .build();
        Self { url, agent }
    }
}

impl RetrievalStrategy for NetworkSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn retrieve(&self) -> Retrieval {
        let agent = self.agent.clone();
        let url = self.url.clone();

        Retrieval::Pending(Box::pin(async move {
            match tokio::task::spawn_blocking(move || fetch(&agent, &url)).await {
                Ok(result) => result,
                Err(e) => Err(LoadFailure::UnexpectedException(format!(
                    "fetch task failed: {}",
                    e
                ))),
            }
        }))
    }
}

fn fetch(agent: &ureq::Agent, url: &str) -> Result<String, LoadFailure> {
    log::debug!("Requesting build info from {}", url);

    let response = match agent.get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(status, response)) => {
            return Err(LoadFailure::ProtocolFailure {
                status,
                reason: response.status_text().to_string(),
            });
        }
        Err(ureq::Error::Transport(transport)) => {
            return Err(LoadFailure::TransportFailure(transport.to_string()));
        }
    };

    if !(200..300).contains(&response.status()) {
        return Err(LoadFailure::ProtocolFailure {
            status: response.status(),
            reason: response.status_text().to_string(),
        });
    }

    response
        .into_string()
        .map_err(|e| LoadFailure::TransportFailure(format!("failed to read response: {}", e)))
}
