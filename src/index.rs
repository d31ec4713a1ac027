//! Primary-key indexing for edge endpoint resolution.
//!
//! Edges in the archive reference vertices by archive-local dense ids; the
//! bulk loader wants primary-key values. [`PrimaryKeyIndex`] maps local id to
//! decoded key for one vertex label. [`IndexRegistry`] shares those indexes
//! across every reader of one import run: built lazily, exactly once per
//! label, immutable afterwards.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::archive::{Archive, LocalId};
use crate::decode;
use crate::errors::ImportError;
use crate::schema;
use crate::value::GenericValue;

/// Hit/miss counters for one registry. A miss is a build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Immutable mapping from archive-local vertex id to decoded primary-key
/// value, scoped to one vertex label.
#[derive(Debug)]
pub struct PrimaryKeyIndex {
    label: String,
    keys: AHashMap<LocalId, GenericValue>,
}

impl PrimaryKeyIndex {
    /// Builds the index by scanning every chunk of the label's vertex table
    /// and decoding the primary-key column of each row.
    pub fn build(archive: &dyn Archive, label: &str) -> Result<PrimaryKeyIndex, ImportError> {
        let vertex = archive
            .vertex_type(label)
            .ok_or_else(|| ImportError::schema(format!("unknown vertex label '{label}'")))?;
        let (column, primary) = schema::primary_key_of(vertex)?;
        let declared = primary.data_type.clone();

        let mut keys = AHashMap::new();
        for chunk in 0..archive.vertex_chunk_count(label)? {
            for row in archive.read_vertex_chunk(label, chunk)? {
                let cell = row.cells.get(column).ok_or_else(|| {
                    ImportError::decode(format!(
                        "vertex row {} of '{label}' is missing its primary-key cell",
                        row.local_id
                    ))
                })?;
                let key = decode::decode(cell, &declared)?;
                if keys.insert(row.local_id, key).is_some() {
                    return Err(ImportError::schema(format!(
                        "duplicate local id {} in vertex label '{label}'",
                        row.local_id
                    )));
                }
            }
        }
        debug!(label, entries = keys.len(), "built primary-key index");
        Ok(PrimaryKeyIndex {
            label: label.to_string(),
            keys,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, local_id: LocalId) -> Option<&GenericValue> {
        self.keys.get(&local_id)
    }

    /// Resolves a local id to its primary-key value. A missing id means an
    /// edge references a vertex that does not exist in the archive.
    pub fn resolve(&self, local_id: LocalId) -> Result<&GenericValue, ImportError> {
        self.keys.get(&local_id).ok_or_else(|| {
            ImportError::dangling_reference(format!(
                "local id {local_id} has no entry in vertex label '{}'",
                self.label
            ))
        })
    }
}

#[derive(Default)]
struct LabelSlot {
    built: Mutex<Option<Arc<PrimaryKeyIndex>>>,
}

/// Process-wide registry of primary-key indexes, one per vertex label,
/// with lifecycle bound to one import run.
///
/// Concurrent first demands for one label serialize on that label's slot so
/// the index is built exactly once; demands for distinct labels build in
/// parallel. A failed build is not cached, so a later caller may retry it.
#[derive(Default)]
pub struct IndexRegistry {
    slots: Mutex<AHashMap<String, Arc<LabelSlot>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl IndexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the label's index, building it on first demand.
    pub fn get_or_build(
        &self,
        archive: &dyn Archive,
        label: &str,
    ) -> Result<Arc<PrimaryKeyIndex>, ImportError> {
        let slot = {
            let mut slots = self.slots.lock();
            slots.entry(label.to_string()).or_default().clone()
        };
        // Holding the slot lock across the build serializes same-label
        // demands; the outer map lock is already released, so other labels
        // proceed independently.
        let mut built = slot.built.lock();
        if let Some(index) = built.as_ref() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(index));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let index = Arc::new(PrimaryKeyIndex::build(archive, label)?);
        *built = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Index for a label if it has already been built.
    pub fn get(&self, label: &str) -> Option<Arc<PrimaryKeyIndex>> {
        let slot = self.slots.lock().get(label).cloned()?;
        let built = slot.built.lock();
        built.as_ref().map(Arc::clone)
    }

    pub fn stats(&self) -> RegistryStats {
        let slots = self.slots.lock();
        let entries = slots
            .values()
            .filter(|slot| slot.built.lock().is_some())
            .count();
        RegistryStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }
}
