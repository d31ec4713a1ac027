//! Archive metadata model: vertex/edge type descriptors, declared column
//! types, and the physical adjacency layouts an edge type materializes.
//!
//! The catalog is a read-only oracle. This crate never constructs or mutates
//! archive files; it only queries descriptors by label. All types are
//! serde-derived so a catalog can be loaded from a serialized JSON descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ImportError;

/// A declared external column type.
///
/// This domain is open-ended on the archive side; nested types are declared
/// here but have no mapping onto [`crate::GenericValue`] and fail decoding
/// with [`ImportError::UnsupportedType`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExternalType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Utf8,
    Binary,
    List(Box<ExternalType>),
    Map,
}

impl fmt::Display for ExternalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalType::Bool => write!(f, "bool"),
            ExternalType::Int8 => write!(f, "int8"),
            ExternalType::Int16 => write!(f, "int16"),
            ExternalType::Int32 => write!(f, "int32"),
            ExternalType::Int64 => write!(f, "int64"),
            ExternalType::UInt8 => write!(f, "uint8"),
            ExternalType::UInt16 => write!(f, "uint16"),
            ExternalType::UInt32 => write!(f, "uint32"),
            ExternalType::UInt64 => write!(f, "uint64"),
            ExternalType::Float32 => write!(f, "float32"),
            ExternalType::Float64 => write!(f, "float64"),
            ExternalType::Utf8 => write!(f, "utf8"),
            ExternalType::Binary => write!(f, "binary"),
            ExternalType::List(inner) => write!(f, "list<{inner}>"),
            ExternalType::Map => write!(f, "map"),
        }
    }
}

/// One declared property of a vertex or edge type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub data_type: ExternalType,
    /// Whether this property is the vertex type's primary key. Exactly one
    /// property per vertex type must carry this flag; edge properties never do.
    #[serde(default)]
    pub is_primary: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, data_type: ExternalType) -> Self {
        Property {
            name: name.into(),
            data_type,
            is_primary: false,
        }
    }

    pub fn primary(name: impl Into<String>, data_type: ExternalType) -> Self {
        Property {
            name: name.into(),
            data_type,
            is_primary: true,
        }
    }
}

/// Descriptor for one vertex label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexType {
    pub label: String,
    /// Declared properties in physical column order.
    pub properties: Vec<Property>,
}

impl VertexType {
    /// Column position and descriptor of a declared property.
    pub fn property(&self, name: &str) -> Option<(usize, &Property)> {
        self.properties
            .iter()
            .enumerate()
            .find(|(_, p)| p.name == name)
    }
}

/// One physical ordering an edge type may be materialized in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjacencyLayout {
    OrderedBySource,
    OrderedByDest,
    UnorderedBySource,
    UnorderedByDest,
}

impl AdjacencyLayout {
    pub fn is_ordered(self) -> bool {
        matches!(
            self,
            AdjacencyLayout::OrderedBySource | AdjacencyLayout::OrderedByDest
        )
    }

    pub fn is_by_source(self) -> bool {
        matches!(
            self,
            AdjacencyLayout::OrderedBySource | AdjacencyLayout::UnorderedBySource
        )
    }
}

impl fmt::Display for AdjacencyLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjacencyLayout::OrderedBySource => write!(f, "ordered_by_source"),
            AdjacencyLayout::OrderedByDest => write!(f, "ordered_by_dest"),
            AdjacencyLayout::UnorderedBySource => write!(f, "unordered_by_source"),
            AdjacencyLayout::UnorderedByDest => write!(f, "unordered_by_dest"),
        }
    }
}

/// Descriptor for one edge label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeType {
    pub label: String,
    /// Vertex label the source endpoint belongs to.
    pub src_label: String,
    /// Vertex label the destination endpoint belongs to.
    pub dst_label: String,
    /// Declared edge properties in physical column order (endpoints excluded).
    pub properties: Vec<Property>,
    /// Adjacency layouts the archive actually materializes for this type.
    pub layouts: Vec<AdjacencyLayout>,
}

impl EdgeType {
    pub fn property(&self, name: &str) -> Option<(usize, &Property)> {
        self.properties
            .iter()
            .enumerate()
            .find(|(_, p)| p.name == name)
    }
}

/// Full type catalog of one archive: every vertex and edge descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphCatalog {
    pub vertices: Vec<VertexType>,
    pub edges: Vec<EdgeType>,
}

impl GraphCatalog {
    /// Parses a catalog from its serialized JSON descriptor.
    pub fn from_json(text: &str) -> Result<GraphCatalog, ImportError> {
        serde_json::from_str(text)
            .map_err(|e| ImportError::schema(format!("invalid catalog descriptor: {e}")))
    }

    pub fn vertex_type(&self, label: &str) -> Option<&VertexType> {
        self.vertices.iter().find(|v| v.label == label)
    }

    pub fn edge_type(&self, label: &str) -> Option<&EdgeType> {
        self.edges.iter().find(|e| e.label == label)
    }
}
