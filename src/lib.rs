//! Schema-driven decoder turning columnar graph archives into bulk-import rows.
//!
//! An archive stores vertex and edge tables grouped by label, each column
//! typed by a declared external type and physically chunked. This crate reads
//! such an archive through a pull-based block contract and produces batches
//! of generic rows for a downstream bulk loader.
//!
//! # Features
//!
//! - **Strict type decoding**: every declared external type maps onto exactly
//!   one [`GenericValue`] tag, preserving bit-width and signedness; mismatch
//!   is a decode failure, never a silent cast
//! - **Endpoint resolution**: edge endpoints stored as archive-local ids are
//!   replaced with the referenced vertex's primary-key value
//! - **Shared key indexes**: per-label primary-key indexes are built lazily,
//!   exactly once per run, and shared across all readers via [`IndexRegistry`]
//! - **Layout selection**: one adjacency layout per edge type, ordered
//!   preferred over unordered, by-source preferred over by-destination
//! - **One-shot delivery**: a reader delivers its unit of work at most once
//!
//! # Quick Start
//!
//! ```rust
//! use graph_archive_import::{
//!     BlockRead, BlockReader, ColumnSpec, ExternalType, IndexRegistry, MemoryArchive,
//!     Property, RawValue, VertexRow, VertexType, WorkDescriptor,
//! };
//! use std::sync::Arc;
//!
//! let mut archive = MemoryArchive::new();
//! archive.add_vertex_type(VertexType {
//!     label: "person".into(),
//!     properties: vec![
//!         Property::primary("id", ExternalType::Int64),
//!         Property::new("name", ExternalType::Utf8),
//!     ],
//! });
//! archive.push_vertex_chunk(
//!     "person",
//!     vec![VertexRow {
//!         local_id: 0,
//!         cells: vec![RawValue::Int(7), RawValue::Text("ada".into())],
//!     }],
//! )?;
//!
//! let registry = Arc::new(IndexRegistry::new());
//! let work = WorkDescriptor::vertices(
//!     "person",
//!     0,
//!     vec![ColumnSpec::property("id"), ColumnSpec::property("name")],
//! );
//! let mut reader = BlockReader::new(Arc::new(archive), registry, work);
//!
//! let mut rows = Vec::new();
//! assert!(reader.read_batch(&mut rows)?);
//! assert_eq!(rows.len(), 1);
//! // The unit of work is delivered exactly once.
//! assert!(!reader.read_batch(&mut rows)?);
//! # Ok::<(), graph_archive_import::ImportError>(())
//! ```
//!
//! # Public API Organization
//!
//! ## Core Types
//! - [`GenericValue`] / [`RawValue`] - decoded and physical cell values
//! - [`GraphCatalog`], [`VertexType`], [`EdgeType`], [`Property`] - archive metadata
//! - [`Archive`] - read-only oracle trait over one archive
//! - [`MemoryArchive`] - chunked in-memory implementation
//!
//! ## Operations
//! - [`decode::decode()`] - strict cell decoding under a declared type
//! - [`schema::primary_key_of()`], [`schema::adjacency_layout_for()`] - schema resolution
//! - [`IndexRegistry::get_or_build()`] - shared build-once key indexes
//! - [`BlockReader`] / [`BlockRead`] - batch production
//!
//! ## Utilities
//! - [`ImportError`] - non-retryable error taxonomy
//! - [`RegistryStats`] - index registry hit/miss counters

pub mod archive;
pub mod catalog;
pub mod decode;
pub mod errors;
pub mod index;
pub mod reader;
pub mod schema;
pub mod value;
pub mod work;

// Re-export the archive oracle and row types
pub use archive::{Archive, EdgeRow, LocalId, MemoryArchive, VertexRow};

// Re-export catalog descriptors
pub use catalog::{AdjacencyLayout, EdgeType, ExternalType, GraphCatalog, Property, VertexType};

// Re-export error types
pub use errors::ImportError;

// Re-export indexing
pub use index::{IndexRegistry, PrimaryKeyIndex, RegistryStats};

// Re-export the reader and its contract
pub use reader::{BlockRead, BlockReader, DeliveryState};

// Re-export cell values
pub use value::{GenericValue, RawValue};

// Re-export work descriptors
pub use work::{ColumnSpec, WorkDescriptor, WorkTarget};
