//! Schema resolution over archive type descriptors: which property is a
//! vertex type's primary key, and which materialized adjacency layout to read
//! for an edge type.

use crate::catalog::{AdjacencyLayout, EdgeType, Property, VertexType};
use crate::errors::ImportError;

/// Layout preference: ordered before unordered, by-source before by-dest.
/// Ordered layouts enable merge-style downstream processing.
const LAYOUT_PREFERENCE: [AdjacencyLayout; 4] = [
    AdjacencyLayout::OrderedBySource,
    AdjacencyLayout::OrderedByDest,
    AdjacencyLayout::UnorderedBySource,
    AdjacencyLayout::UnorderedByDest,
];

/// Returns the column position and descriptor of the one property marked as
/// primary key. Zero or multiple marked properties mean the archive is
/// malformed for this importer's assumptions.
pub fn primary_key_of(vertex: &VertexType) -> Result<(usize, &Property), ImportError> {
    let mut found: Option<(usize, &Property)> = None;
    for (position, property) in vertex.properties.iter().enumerate() {
        if property.is_primary {
            if found.is_some() {
                return Err(ImportError::schema(format!(
                    "vertex type '{}' declares more than one primary key",
                    vertex.label
                )));
            }
            found = Some((position, property));
        }
    }
    found.ok_or_else(|| {
        ImportError::schema(format!(
            "vertex type '{}' declares no primary key",
            vertex.label
        ))
    })
}

/// Picks exactly one of the adjacency layouts the archive materializes for
/// `edge`, in [`LAYOUT_PREFERENCE`] order.
pub fn adjacency_layout_for(edge: &EdgeType) -> Result<AdjacencyLayout, ImportError> {
    LAYOUT_PREFERENCE
        .into_iter()
        .find(|layout| edge.layouts.contains(layout))
        .ok_or_else(|| {
            ImportError::schema(format!(
                "edge type '{}' materializes no adjacency layout",
                edge.label
            ))
        })
}
