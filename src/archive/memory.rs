//! In-memory [`Archive`] implementation.
//!
//! Holds chunked vertex and edge tables behind the same oracle contract a
//! file-backed archive would implement. Used by tests and benches, and by
//! embedders that already hold decoded archive data in memory.

use ahash::AHashMap;

use crate::archive::{Archive, EdgeRow, VertexRow};
use crate::catalog::{AdjacencyLayout, EdgeType, GraphCatalog, VertexType};
use crate::errors::ImportError;

struct VertexTable {
    info: VertexType,
    chunks: Vec<Vec<VertexRow>>,
}

struct EdgeTable {
    info: EdgeType,
    chunks: AHashMap<AdjacencyLayout, Vec<Vec<EdgeRow>>>,
}

/// Chunked in-memory archive.
#[derive(Default)]
pub struct MemoryArchive {
    vertices: AHashMap<String, VertexTable>,
    edges: AHashMap<String, EdgeTable>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every type of `catalog` with empty tables.
    pub fn from_catalog(catalog: &GraphCatalog) -> Self {
        let mut archive = MemoryArchive::new();
        for vertex in &catalog.vertices {
            archive.add_vertex_type(vertex.clone());
        }
        for edge in &catalog.edges {
            archive.add_edge_type(edge.clone());
        }
        archive
    }

    /// Registers a vertex label with an empty table. Replaces any existing
    /// table for the same label.
    pub fn add_vertex_type(&mut self, info: VertexType) {
        let label = info.label.clone();
        self.vertices.insert(
            label,
            VertexTable {
                info,
                chunks: Vec::new(),
            },
        );
    }

    /// Registers an edge label with empty per-layout tables. Replaces any
    /// existing table for the same label.
    pub fn add_edge_type(&mut self, info: EdgeType) {
        let label = info.label.clone();
        let chunks = info
            .layouts
            .iter()
            .map(|layout| (*layout, Vec::new()))
            .collect();
        self.edges.insert(label, EdgeTable { info, chunks });
    }

    /// Appends one chunk of rows to a vertex label's table.
    pub fn push_vertex_chunk(
        &mut self,
        label: &str,
        rows: Vec<VertexRow>,
    ) -> Result<(), ImportError> {
        let table = self
            .vertices
            .get_mut(label)
            .ok_or_else(|| ImportError::archive(format!("unknown vertex label '{label}'")))?;
        let arity = table.info.properties.len();
        for row in &rows {
            if row.cells.len() != arity {
                return Err(ImportError::archive(format!(
                    "vertex row {} of '{label}' has {} cells, expected {arity}",
                    row.local_id,
                    row.cells.len()
                )));
            }
        }
        table.chunks.push(rows);
        Ok(())
    }

    /// Appends one chunk of rows to an edge label's table under `layout`.
    /// The layout must be declared as materialized by the edge type.
    pub fn push_edge_chunk(
        &mut self,
        label: &str,
        layout: AdjacencyLayout,
        rows: Vec<EdgeRow>,
    ) -> Result<(), ImportError> {
        let table = self
            .edges
            .get_mut(label)
            .ok_or_else(|| ImportError::archive(format!("unknown edge label '{label}'")))?;
        let arity = table.info.properties.len();
        for row in &rows {
            if row.cells.len() != arity {
                return Err(ImportError::archive(format!(
                    "edge row {}->{} of '{label}' has {} cells, expected {arity}",
                    row.source,
                    row.dest,
                    row.cells.len()
                )));
            }
        }
        table
            .chunks
            .get_mut(&layout)
            .ok_or_else(|| {
                ImportError::archive(format!(
                    "edge label '{label}' does not materialize layout {layout}"
                ))
            })?
            .push(rows);
        Ok(())
    }
}

impl Archive for MemoryArchive {
    fn vertex_type(&self, label: &str) -> Option<&VertexType> {
        self.vertices.get(label).map(|t| &t.info)
    }

    fn edge_type(&self, label: &str) -> Option<&EdgeType> {
        self.edges.get(label).map(|t| &t.info)
    }

    fn vertex_chunk_count(&self, label: &str) -> Result<usize, ImportError> {
        self.vertices
            .get(label)
            .map(|t| t.chunks.len())
            .ok_or_else(|| ImportError::archive(format!("unknown vertex label '{label}'")))
    }

    fn read_vertex_chunk(&self, label: &str, chunk: usize) -> Result<Vec<VertexRow>, ImportError> {
        let table = self
            .vertices
            .get(label)
            .ok_or_else(|| ImportError::archive(format!("unknown vertex label '{label}'")))?;
        table.chunks.get(chunk).cloned().ok_or_else(|| {
            ImportError::archive(format!(
                "vertex label '{label}' has no chunk {chunk} (of {})",
                table.chunks.len()
            ))
        })
    }

    fn edge_chunk_count(
        &self,
        label: &str,
        layout: AdjacencyLayout,
    ) -> Result<usize, ImportError> {
        let table = self
            .edges
            .get(label)
            .ok_or_else(|| ImportError::archive(format!("unknown edge label '{label}'")))?;
        table.chunks.get(&layout).map(Vec::len).ok_or_else(|| {
            ImportError::archive(format!(
                "edge label '{label}' does not materialize layout {layout}"
            ))
        })
    }

    fn read_edge_chunk(
        &self,
        label: &str,
        layout: AdjacencyLayout,
        chunk: usize,
    ) -> Result<Vec<EdgeRow>, ImportError> {
        let table = self
            .edges
            .get(label)
            .ok_or_else(|| ImportError::archive(format!("unknown edge label '{label}'")))?;
        let chunks = table.chunks.get(&layout).ok_or_else(|| {
            ImportError::archive(format!(
                "edge label '{label}' does not materialize layout {layout}"
            ))
        })?;
        chunks.get(chunk).cloned().ok_or_else(|| {
            ImportError::archive(format!(
                "edge label '{label}' has no chunk {chunk} under {layout} (of {})",
                chunks.len()
            ))
        })
    }
}
