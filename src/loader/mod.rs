// src/loader/mod.rs
pub mod callbacks;

pub use callbacks::{Callback, PendingCallbacks};

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::channel::oneshot;
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::runtime::Handle;

use crate::{
    config::LoaderConfig,
    errors::LoadFailure,
    info::{parse_build_info, BuildMetadata, LoadState},
    retrieval::{self, Retrieval, RetrievalStrategy},
};
use callbacks::panic_message;

/// Shared handle to the build descriptor loader.
///
/// Cloning is cheap and every clone talks to the same state. The first access
/// (explicit [`request_load`](Self::request_load) or any accessor) starts the
/// single retrieval; later calls only wait for it or read the cache.
#[derive(Clone)]
pub struct BuildInfoService {
    inner: Arc<Inner>,
}

struct Inner {
    strategy: Box<dyn RetrievalStrategy>,
    runtime: Option<Handle>,
    shared: Mutex<Shared>,
    retrievals: AtomicUsize,
}

struct Shared {
    state: LoadState,
    metadata: BuildMetadata,
    pending: PendingCallbacks,
    failure: Option<String>,
}

impl BuildInfoService {
    pub fn new(config: &LoaderConfig) -> Self {
        Self::with_strategy(retrieval::from_config(config))
    }

    /// Captures the current tokio runtime, if any, for asynchronous sources.
    pub fn with_strategy(strategy: Box<dyn RetrievalStrategy>) -> Self {
        Self::build(strategy, Handle::try_current().ok())
    }

    pub fn with_runtime(strategy: Box<dyn RetrievalStrategy>, runtime: Handle) -> Self {
        Self::build(strategy, Some(runtime))
    }

    fn build(strategy: Box<dyn RetrievalStrategy>, runtime: Option<Handle>) -> Self {
        Self {
            inner: Arc::new(Inner {
                strategy,
                runtime,
                shared: Mutex::new(Shared {
                    state: LoadState::NotLoaded,
                    metadata: BuildMetadata::default(),
                    pending: PendingCallbacks::default(),
                    failure: None,
                }),
                retrievals: AtomicUsize::new(0),
            }),
        }
    }

    /// Starts loading if nothing has been attempted yet.
    ///
    /// `callback` runs immediately when the loader is already terminal, and
    /// otherwise once the pending load finishes.
    pub fn request_load(&self, callback: Option<Callback>) {
        let mut shared = self.inner.shared.lock();

        if shared.state.is_terminal() {
            drop(shared);
            if let Some(callback) = callback {
                callback();
            }
            return;
        }

        if let Some(callback) = callback {
            shared.pending.push(callback);
        }

        if shared.state == LoadState::Loading {
            return;
        }

        shared.state = LoadState::Loading;
        drop(shared);

        self.start_retrieval();
    }

    pub fn on_loaded(&self, callback: impl FnOnce() + Send + 'static) {
        self.request_load(Some(Box::new(callback)));
    }

    /// Waits for the load to finish and reports whether it succeeded.
    pub async fn loaded(&self) -> bool {
        let (tx, rx) = oneshot::channel();
        self.on_loaded(move || {
            let _ = tx.send(());
        });
        let _ = rx.await;
        self.is_available()
    }

    pub fn id(&self) -> String {
        self.read(|shared| shared.metadata.id.clone())
    }

    pub fn date(&self) -> String {
        self.read(|shared| shared.metadata.date.clone())
    }

    pub fn tag(&self) -> String {
        self.read(|shared| shared.metadata.tag.clone())
    }

    pub fn branch(&self) -> String {
        self.read(|shared| shared.metadata.branch.clone())
    }

    pub fn bundle_version(&self) -> String {
        self.read(|shared| shared.metadata.bundle_version.clone())
    }

    pub fn is_available(&self) -> bool {
        self.read(|shared| shared.state == LoadState::Loaded)
    }

    pub fn is_loading(&self) -> bool {
        self.read(|shared| shared.state == LoadState::Loading)
    }

    pub fn snapshot(&self) -> BuildMetadata {
        self.read(|shared| shared.metadata.clone())
    }

    /// Current state, without triggering a load.
    pub fn state(&self) -> LoadState {
        self.inner.shared.lock().state
    }

    /// Logged reason of a failed load.
    pub fn failure_reason(&self) -> Option<String> {
        self.inner.shared.lock().failure.clone()
    }

    pub fn source_location(&self) -> String {
        self.inner.strategy.location()
    }

    /// Number of retrievals started so far; never exceeds one.
    pub fn retrieval_count(&self) -> usize {
        self.inner.retrievals.load(Ordering::SeqCst)
    }

    fn read<T>(&self, f: impl FnOnce(&Shared) -> T) -> T {
        self.request_load(None);
        let shared = self.inner.shared.lock();
        f(&shared)
    }

    fn start_retrieval(&self) {
        self.inner.retrievals.fetch_add(1, Ordering::SeqCst);
        log::debug!("Loading build info from {}", self.source_location());

        let strategy = &self.inner.strategy;
        let retrieval = match panic::catch_unwind(AssertUnwindSafe(|| strategy.retrieve())) {
            Ok(retrieval) => retrieval,
            Err(payload) => {
                self.fail(LoadFailure::UnexpectedException(panic_message(
                    payload.as_ref(),
                )));
                return;
            }
        };

        match retrieval {
            Retrieval::Record(metadata) => self.resolve(metadata),
            Retrieval::Text(text) => self.complete(text),
            Retrieval::Pending(fetch) => {
                let runtime = Handle::try_current()
                    .ok()
                    .or_else(|| self.inner.runtime.clone());
                let Some(runtime) = runtime else {
                    self.fail(LoadFailure::UnexpectedException(
                        "no async runtime".to_string(),
                    ));
                    return;
                };

                let guard = CompletionGuard {
                    service: Some(self.clone()),
                };
                runtime.spawn(async move {
                    let text = match AssertUnwindSafe(fetch).catch_unwind().await {
                        Ok(text) => text,
                        Err(payload) => Err(LoadFailure::UnexpectedException(panic_message(
                            payload.as_ref(),
                        ))),
                    };
                    guard.complete(text);
                });
            }
        }
    }

    fn complete(&self, text: Result<String, LoadFailure>) {
        let parsed = text.and_then(|text| {
            panic::catch_unwind(|| parse_build_info(&text)).unwrap_or_else(|payload| {
                Err(LoadFailure::UnexpectedException(panic_message(
                    payload.as_ref(),
                )))
            })
        });

        match parsed {
            Ok(metadata) => self.resolve(metadata),
            Err(failure) => self.fail(failure),
        }
    }

    fn resolve(&self, metadata: BuildMetadata) {
        log::info!(
            "Build info loaded: id={} date={} bundle_version={} tag={} branch={}",
            metadata.id,
            metadata.date,
            metadata.bundle_version,
            metadata.tag,
            metadata.branch
        );
        self.finish(LoadState::Loaded, metadata, None);
    }

    fn fail(&self, failure: LoadFailure) {
        log::error!(
            "Failed to load build info from {}: {}",
            self.source_location(),
            failure
        );
        self.finish(
            LoadState::Error,
            BuildMetadata::unavailable(),
            Some(failure.to_string()),
        );
    }

    fn finish(&self, state: LoadState, metadata: BuildMetadata, failure: Option<String>) {
        let drained = {
            let mut shared = self.inner.shared.lock();
            if shared.state.is_terminal() {
                log::warn!("Build info already resolved, dropping late result");
                return;
            }
            shared.state = state;
            shared.metadata = metadata;
            shared.failure = failure;
            shared.pending.take()
        };
        drained.fire();
    }
}

/// Fails the load if the fetch task is dropped before it completes, e.g. when
/// the runtime it was spawned on has shut down.
struct CompletionGuard {
    service: Option<BuildInfoService>,
}

impl CompletionGuard {
    fn complete(mut self, text: Result<String, LoadFailure>) {
        if let Some(service) = self.service.take() {
            service.complete(text);
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(service) = self.service.take() {
            service.fail(LoadFailure::UnexpectedException(
                "async runtime shut down".to_string(),
            ));
        }
    }
}
