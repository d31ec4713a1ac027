//! Read-only oracle contract over a columnar graph archive.
//!
//! An [`Archive`] answers type-descriptor lookups by label and serves raw row
//! chunks. Vertex tables are chunked per label; edge tables are chunked per
//! label and per materialized adjacency layout. Implementations are local and
//! blocking; callers parallelize across independent work units.

pub mod memory;

use crate::catalog::{AdjacencyLayout, EdgeType, VertexType};
use crate::errors::ImportError;
use crate::value::RawValue;

pub use memory::MemoryArchive;

/// Archive-local dense vertex identifier, scoped to one label. Distinct from
/// any primary-key property value.
pub type LocalId = i64;

/// One physical vertex row: local id plus raw cells aligned with the vertex
/// type's declared property order.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexRow {
    pub local_id: LocalId,
    pub cells: Vec<RawValue>,
}

/// One physical edge row: endpoint local ids plus raw property cells aligned
/// with the edge type's declared property order.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRow {
    pub source: LocalId,
    pub dest: LocalId,
    pub cells: Vec<RawValue>,
}

/// Read-only access to one columnar graph archive.
pub trait Archive: Send + Sync {
    /// Descriptor for a vertex label, if the archive declares it.
    fn vertex_type(&self, label: &str) -> Option<&VertexType>;

    /// Descriptor for an edge label, if the archive declares it.
    fn edge_type(&self, label: &str) -> Option<&EdgeType>;

    /// Number of physical chunks in a vertex label's table.
    fn vertex_chunk_count(&self, label: &str) -> Result<usize, ImportError>;

    /// Raw rows of one vertex chunk.
    fn read_vertex_chunk(&self, label: &str, chunk: usize) -> Result<Vec<VertexRow>, ImportError>;

    /// Number of physical chunks an edge label materializes under `layout`.
    fn edge_chunk_count(
        &self,
        label: &str,
        layout: AdjacencyLayout,
    ) -> Result<usize, ImportError>;

    /// Raw rows of one edge chunk under `layout`.
    fn read_edge_chunk(
        &self,
        label: &str,
        layout: AdjacencyLayout,
        chunk: usize,
    ) -> Result<Vec<EdgeRow>, ImportError>;
}
