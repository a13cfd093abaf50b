// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loaded-dataset state machine.
//!
//! A [`Catalog`] starts in [`CatalogState::Loading`] while a background task
//! reads the CSV tables, then settles into `Ready` or `Failed`. Searching is
//! only possible once it is `Ready`; until then callers get an explicit
//! [`SearchState`] instead of results computed from partial data.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::dataset::{self, Dataset, DatasetPaths, FoodSummary, LoadError};
use crate::search::{search, SearchOutcome, TokenIndex};

/// Identity of a dataset version: blake3 over the food name list.
pub fn dataset_fingerprint(summaries: &[FoodSummary]) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(summaries.len() as u64).to_le_bytes());
    for summary in summaries {
        hasher.update(summary.name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

/// Memoized token index, rebuilt only when the dataset fingerprint changes.
#[derive(Debug, Default)]
pub struct IndexCache {
    entry: Option<(blake3::Hash, Arc<TokenIndex>)>,
    builds: usize,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&mut self, summaries: &[FoodSummary]) -> Arc<TokenIndex> {
        let fingerprint = dataset_fingerprint(summaries);
        if let Some((cached, index)) = &self.entry {
            if *cached == fingerprint {
                debug!(fingerprint = %fingerprint.to_hex(), "Token index cache hit");
                return Arc::clone(index);
            }
        }
        let index = Arc::new(TokenIndex::build(summaries));
        self.entry = Some((fingerprint, Arc::clone(&index)));
        self.builds += 1;
        index
    }

    /// How many times an index was actually built.
    pub fn builds(&self) -> usize {
        self.builds
    }
}

/// A dataset together with its derived index.
#[derive(Debug, Clone)]
pub struct ReadyCatalog {
    pub dataset: Dataset,
    pub index: Arc<TokenIndex>,
}

impl ReadyCatalog {
    pub fn new(dataset: Dataset, cache: &mut IndexCache) -> Self {
        let index = cache.get_or_build(&dataset.summaries);
        Self { dataset, index }
    }

    pub fn search(&self, query: &str) -> SearchOutcome<'_> {
        search(
            query,
            &self.dataset.summaries,
            &self.dataset.synonyms,
            &self.index,
        )
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::of(&self.dataset.summaries)
    }
}

#[derive(Debug, Clone)]
pub enum CatalogState {
    Loading,
    Ready(ReadyCatalog),
    Failed(String),
}

impl CatalogState {
    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogState::Loading)
    }

    pub fn ready(&self) -> Option<&ReadyCatalog> {
        match self {
            CatalogState::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    pub fn search(&self, query: &str) -> SearchState<'_> {
        match self {
            CatalogState::Loading => SearchState::NotReady,
            CatalogState::Failed(message) => SearchState::Failed(message),
            CatalogState::Ready(ready) => SearchState::Results(ready.search(query)),
        }
    }
}

/// Outcome of searching a catalog in any state.
#[derive(Debug)]
pub enum SearchState<'a> {
    NotReady,
    Failed(&'a str),
    Results(SearchOutcome<'a>),
}

/// Headline counts for the loaded dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Distinct trimmed food names.
    pub foods: usize,
    /// Distinct source URLs, compared trimmed and lowercased.
    pub sources: usize,
}

impl CatalogStats {
    pub fn of(summaries: &[FoodSummary]) -> Self {
        let foods: HashSet<&str> = summaries
            .iter()
            .map(|s| s.name.trim())
            .filter(|name| !name.is_empty())
            .collect();
        let sources: HashSet<String> = summaries
            .iter()
            .flat_map(|s| &s.entries)
            .filter_map(|e| e.url.as_deref())
            .map(|url| url.trim().to_lowercase())
            .filter(|url| !url.is_empty())
            .collect();
        Self {
            foods: foods.len(),
            sources: sources.len(),
        }
    }
}

/// Observable catalog, fed by a one-shot background load.
#[derive(Debug)]
pub struct Catalog {
    state: watch::Receiver<CatalogState>,
    cache: Arc<Mutex<IndexCache>>,
}

impl Catalog {
    /// Wrap an already-loaded dataset.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let cache = Arc::new(Mutex::new(IndexCache::new()));
        let ready = {
            let mut guard = cache.lock().unwrap_or_else(PoisonError::into_inner);
            ReadyCatalog::new(dataset, &mut guard)
        };
        let (_tx, rx) = watch::channel(CatalogState::Ready(ready));
        Self { state: rx, cache }
    }

    /// Start loading `paths` in a tokio task. Must be called within a runtime.
    pub fn spawn_load(paths: DatasetPaths) -> Self {
        let cache = Arc::new(Mutex::new(IndexCache::new()));
        let state = spawn_load_task(paths, Arc::clone(&cache));
        Self { state, cache }
    }

    /// Discard the current state and load again, reusing the index cache.
    pub fn reload(&mut self, paths: DatasetPaths) {
        self.state = spawn_load_task(paths, Arc::clone(&self.cache));
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Wait until the load finishes and return the settled state.
    pub async fn settled(&mut self) -> CatalogState {
        loop {
            let current = self.state.borrow_and_update().clone();
            if !current.is_loading() {
                return current;
            }
            if self.state.changed().await.is_err() {
                let err = LoadError::Aborted {
                    reason: "loader exited without reporting".to_string(),
                };
                return CatalogState::Failed(err.to_string());
            }
        }
    }

    /// Number of index builds so far; cache hits don't count.
    pub fn index_builds(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .builds()
    }
}

fn spawn_load_task(
    paths: DatasetPaths,
    cache: Arc<Mutex<IndexCache>>,
) -> watch::Receiver<CatalogState> {
    let (tx, rx) = watch::channel(CatalogState::Loading);
    tokio::spawn(async move {
        let next = match dataset::load(&paths).await {
            Ok(dataset) => {
                let mut guard = cache.lock().unwrap_or_else(PoisonError::into_inner);
                let ready = ReadyCatalog::new(dataset, &mut guard);
                info!(foods = ready.dataset.summaries.len(), "Catalog ready");
                CatalogState::Ready(ready)
            }
            Err(err) => {
                error!(error = %err, "Catalog load failed");
                CatalogState::Failed(err.to_string())
            }
        };
        // receivers may already be gone; nothing left to notify then
        let _ = tx.send(next);
    });
    rx
}
