//! The process-wide index handle.

use crate::snapshot::{IndexSnapshot, IndexStats};
use crate::{IndexError, Result, SearchResult};
use mcp_graphql_introspect::SchemaDescriptor;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared handle over the currently published [`IndexSnapshot`].
///
/// The index is either uninitialized (no snapshot) or ready. Rebuilds
/// construct a complete snapshot off to the side and publish it with a
/// single pointer swap, so readers holding the previous snapshot keep a
/// consistent view. Each rebuild takes a generation ticket when it starts;
/// a rebuild that finishes after a newer one has been published is
/// discarded.
#[derive(Default)]
pub struct SchemaIndex {
    current: RwLock<Option<Arc<IndexSnapshot>>>,
    tickets: AtomicU64,
}

/// Summary of the index state, as reported by status tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatus {
    pub initialized: bool,
    pub generation: u64,
    /// Number of distinct keywords.
    pub index_size: usize,
    pub fields: usize,
    pub cached_types: usize,
}

/// A rebuild that has taken its generation ticket.
#[must_use = "a rebuild does nothing until `index` is called"]
pub struct Rebuild<'a> {
    index: &'a SchemaIndex,
    generation: u64,
}

impl Rebuild<'_> {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Builds the snapshot for `schema` and publishes it unless a newer
    /// generation got there first.
    ///
    /// On error nothing is published and the previous snapshot stays in
    /// place.
    #[tracing::instrument(skip_all, fields(generation = self.generation))]
    pub fn index(self, schema: SchemaDescriptor) -> Result<IndexStats> {
        let snapshot = IndexSnapshot::build(schema, self.generation)?;

        let mut current = self.index.current.write();
        let superseded = current
            .as_ref()
            .is_some_and(|published| published.generation() > self.generation);
        if superseded {
            tracing::warn!("Discarding index build superseded by a newer generation");
            return Ok(snapshot.stats(false));
        }

        let stats = snapshot.stats(true);
        *current = Some(Arc::new(snapshot));
        Ok(stats)
    }
}

impl SchemaIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the next generation ticket. Use this when the schema still has
    /// to be fetched, so that a slow fetch cannot overwrite a newer one.
    pub fn begin_rebuild(&self) -> Rebuild<'_> {
        let generation = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(generation, "Starting index rebuild");
        Rebuild {
            index: self,
            generation,
        }
    }

    /// Indexes `schema` and publishes the result.
    pub fn index_schema(&self, schema: SchemaDescriptor) -> Result<IndexStats> {
        self.begin_rebuild().index(schema)
    }

    /// The currently published snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<IndexSnapshot>> {
        self.current.read().clone()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.current.read().is_some()
    }

    /// Ranked keyword search over the published snapshot.
    ///
    /// Keywords are matched case-insensitively, exactly against the index
    /// keys and fuzzily when a key contains the keyword or the keyword
    /// contains a key. Results are unique by path and sorted by descending
    /// relevance with ties in discovery order. An uninitialized index
    /// yields no results.
    #[must_use]
    pub fn search_fields<S: AsRef<str>>(&self, keywords: &[S], max_results: usize) -> Vec<SearchResult> {
        match self.snapshot() {
            Some(snapshot) => snapshot.search(keywords, max_results),
            None => {
                tracing::debug!("Search on uninitialized index");
                Vec::new()
            }
        }
    }

    /// Bounded-depth definition of `type_name`; see
    /// [`IndexSnapshot::type_definition`].
    pub fn type_definition(&self, type_name: &str, max_depth: usize) -> Result<String> {
        self.snapshot()
            .ok_or(IndexError::NotInitialized)?
            .type_definition(type_name, max_depth)
    }

    #[must_use]
    pub fn status(&self) -> IndexStatus {
        self.snapshot().map_or(
            IndexStatus {
                initialized: false,
                generation: 0,
                index_size: 0,
                fields: 0,
                cached_types: 0,
            },
            |snapshot| IndexStatus {
                initialized: true,
                generation: snapshot.generation(),
                index_size: snapshot.keyword_count(),
                fields: snapshot.field_count(),
                cached_types: snapshot.cached_type_count(),
            },
        )
    }
}
