//! Caller-owned description of one unit of import work.
//!
//! A [`WorkDescriptor`] names the label to read, which physical chunk, and
//! the column projection the caller expects. It is immutable for the
//! lifetime of the reader it configures; one reader instance reads exactly
//! one chunk, and callers fan out one reader per chunk.

/// One position of the produced row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnSpec {
    /// The source endpoint's primary-key value. Edge units only.
    Source,
    /// The destination endpoint's primary-key value. Edge units only.
    Destination,
    /// A declared property of the vertex or edge type.
    Property(String),
}

impl ColumnSpec {
    pub fn property(name: impl Into<String>) -> Self {
        ColumnSpec::Property(name.into())
    }
}

/// Which table a work unit reads from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkTarget {
    Vertices { label: String },
    Edges { label: String },
}

/// Immutable description of one unit of work: a label, a chunk, and the
/// column projection of the rows to produce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkDescriptor {
    pub target: WorkTarget,
    pub chunk: usize,
    pub columns: Vec<ColumnSpec>,
}

impl WorkDescriptor {
    pub fn vertices(label: impl Into<String>, chunk: usize, columns: Vec<ColumnSpec>) -> Self {
        WorkDescriptor {
            target: WorkTarget::Vertices {
                label: label.into(),
            },
            chunk,
            columns,
        }
    }

    pub fn edges(label: impl Into<String>, chunk: usize, columns: Vec<ColumnSpec>) -> Self {
        WorkDescriptor {
            target: WorkTarget::Edges {
                label: label.into(),
            },
            chunk,
            columns,
        }
    }

    pub fn label(&self) -> &str {
        match &self.target {
            WorkTarget::Vertices { label } | WorkTarget::Edges { label } => label,
        }
    }

    pub fn is_edge_unit(&self) -> bool {
        matches!(self.target, WorkTarget::Edges { .. })
    }
}
