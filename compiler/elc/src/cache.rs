//! Compile cache keyed by source text.
//!
//! Compiled trees are immutable, so one cached entry can back any number of
//! expressions and evaluations on any thread. Two threads compiling the same
//! text at once may both do the work; `insert` keeps whichever entry landed
//! first and hands it to both.

use std::sync::Arc;

use dashmap::DashMap;
use el_parse::CompiledTemplate;
use tracing::trace;

/// Storage for compiled expressions.
pub trait ExpressionCache: Send + Sync {
    fn get(&self, source: &str) -> Option<Arc<CompiledTemplate>>;

    /// Store `compiled` unless `source` already has an entry, and return the
    /// entry that is now cached.
    fn insert(&self, source: &str, compiled: CompiledTemplate) -> Arc<CompiledTemplate>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&self);
}

/// Lock-striped concurrent cache.
#[derive(Debug, Default)]
pub struct ConcurrentCache {
    entries: DashMap<Arc<str>, Arc<CompiledTemplate>>,
}

impl ConcurrentCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExpressionCache for ConcurrentCache {
    fn get(&self, source: &str) -> Option<Arc<CompiledTemplate>> {
        let hit = self.entries.get(source).map(|entry| Arc::clone(&*entry));
        trace!(hit = hit.is_some(), "compile cache lookup");
        hit
    }

    fn insert(&self, source: &str, compiled: CompiledTemplate) -> Arc<CompiledTemplate> {
        let entry = self
            .entries
            .entry(Arc::from(source))
            .or_insert_with(|| Arc::new(compiled));
        Arc::clone(&*entry)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&self) {
        self.entries.clear();
    }
}

/// Caches nothing; every lookup misses.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoCache;

impl ExpressionCache for NoCache {
    fn get(&self, _source: &str) -> Option<Arc<CompiledTemplate>> {
        None
    }

    fn insert(&self, _source: &str, compiled: CompiledTemplate) -> Arc<CompiledTemplate> {
        Arc::new(compiled)
    }

    fn len(&self) -> usize {
        0
    }

    fn clear(&self) {}
}
