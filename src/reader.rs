//! The orchestrating block reader.
//!
//! A [`BlockReader`] owns one unit of work: it resolves schema through
//! [`crate::schema`], decodes raw cells through [`crate::decode`], resolves
//! edge endpoints through the shared [`IndexRegistry`], and delivers the
//! unit's rows exactly once through the [`BlockRead`] contract.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::archive::Archive;
use crate::catalog::{AdjacencyLayout, Property};
use crate::decode;
use crate::errors::ImportError;
use crate::index::{IndexRegistry, PrimaryKeyIndex};
use crate::schema;
use crate::value::GenericValue;
use crate::work::{ColumnSpec, WorkDescriptor, WorkTarget};

/// Pull-based batch contract shared by every format-specific reader in the
/// import pipeline.
pub trait BlockRead {
    /// Appends one batch of decoded rows to `out` and reports whether more
    /// batches remain. Errors abort the batch: nothing is appended and the
    /// failure is surfaced without retry.
    fn read_batch(&mut self, out: &mut Vec<Vec<GenericValue>>) -> Result<bool, ImportError>;
}

/// One-shot delivery state of a reader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryState {
    Unstarted,
    Delivering,
    Exhausted,
}

/// Decodes one work unit of a columnar graph archive into generic rows.
///
/// One instance delivers exactly one chunk; callers needing more chunks
/// construct more instances. The registry is shared across instances so
/// endpoint indexes are built once per label per run.
pub struct BlockReader {
    archive: Arc<dyn Archive>,
    registry: Arc<IndexRegistry>,
    work: WorkDescriptor,
    state: DeliveryState,
    layout: Option<AdjacencyLayout>,
}

enum EdgeColumn<'a> {
    Endpoint {
        keys: Arc<PrimaryKeyIndex>,
        dest: bool,
    },
    Cell {
        position: usize,
        property: &'a Property,
    },
}

impl BlockReader {
    pub fn new(archive: Arc<dyn Archive>, registry: Arc<IndexRegistry>, work: WorkDescriptor) -> Self {
        BlockReader {
            archive,
            registry,
            work,
            state: DeliveryState::Unstarted,
            layout: None,
        }
    }

    pub fn state(&self) -> DeliveryState {
        self.state
    }

    pub fn work(&self) -> &WorkDescriptor {
        &self.work
    }

    /// Adjacency layout fixed at first use for an edge unit. Stable for the
    /// reader's lifetime; `None` until the first batch or for vertex units.
    pub fn layout(&self) -> Option<AdjacencyLayout> {
        self.layout
    }

    fn read_vertex_unit(
        &self,
        label: &str,
        out: &mut Vec<Vec<GenericValue>>,
    ) -> Result<(), ImportError> {
        let vertex = self
            .archive
            .vertex_type(label)
            .ok_or_else(|| ImportError::schema(format!("unknown vertex label '{label}'")))?
            .clone();
        // Validate the type's shape before any row is read.
        schema::primary_key_of(&vertex)?;

        let mut plan: Vec<(usize, &Property)> = Vec::with_capacity(self.work.columns.len());
        for spec in &self.work.columns {
            match spec {
                ColumnSpec::Property(name) => {
                    let (position, property) = vertex.property(name).ok_or_else(|| {
                        ImportError::schema(format!(
                            "vertex label '{label}' declares no property '{name}'"
                        ))
                    })?;
                    plan.push((position, property));
                }
                ColumnSpec::Source | ColumnSpec::Destination => {
                    return Err(ImportError::schema(format!(
                        "vertex unit '{label}' cannot project edge endpoints"
                    )));
                }
            }
        }

        let rows = self.archive.read_vertex_chunk(label, self.work.chunk)?;
        for row in &rows {
            let mut decoded = Vec::with_capacity(plan.len());
            for (position, property) in &plan {
                let cell = row.cells.get(*position).ok_or_else(|| {
                    ImportError::decode(format!(
                        "vertex row {} of '{label}' is missing cell '{}'",
                        row.local_id, property.name
                    ))
                })?;
                decoded.push(decode::decode(cell, &property.data_type)?);
            }
            out.push(decoded);
        }
        trace!(label, rows = out.len(), "decoded vertex chunk");
        Ok(())
    }

    fn read_edge_unit(
        &mut self,
        label: &str,
        out: &mut Vec<Vec<GenericValue>>,
    ) -> Result<(), ImportError> {
        let edge = self
            .archive
            .edge_type(label)
            .ok_or_else(|| ImportError::schema(format!("unknown edge label '{label}'")))?
            .clone();
        let layout = match self.layout {
            Some(layout) => layout,
            None => {
                let layout = schema::adjacency_layout_for(&edge)?;
                debug!(label, %layout, "selected adjacency layout");
                self.layout = Some(layout);
                layout
            }
        };

        // Endpoint indexes are fetched through the shared registry, so the
        // first reader to need a label builds it and everyone else reuses it.
        let mut plan: Vec<EdgeColumn<'_>> = Vec::with_capacity(self.work.columns.len());
        for spec in &self.work.columns {
            match spec {
                ColumnSpec::Source => plan.push(EdgeColumn::Endpoint {
                    keys: self.registry.get_or_build(&*self.archive, &edge.src_label)?,
                    dest: false,
                }),
                ColumnSpec::Destination => plan.push(EdgeColumn::Endpoint {
                    keys: self.registry.get_or_build(&*self.archive, &edge.dst_label)?,
                    dest: true,
                }),
                ColumnSpec::Property(name) => {
                    let (position, property) = edge.property(name).ok_or_else(|| {
                        ImportError::schema(format!(
                            "edge label '{label}' declares no property '{name}'"
                        ))
                    })?;
                    plan.push(EdgeColumn::Cell { position, property });
                }
            }
        }

        let rows = self.archive.read_edge_chunk(label, layout, self.work.chunk)?;
        for row in &rows {
            let mut decoded = Vec::with_capacity(plan.len());
            for column in &plan {
                match column {
                    EdgeColumn::Endpoint { keys, dest } => {
                        let local_id = if *dest { row.dest } else { row.source };
                        decoded.push(keys.resolve(local_id)?.clone());
                    }
                    EdgeColumn::Cell { position, property } => {
                        let cell = row.cells.get(*position).ok_or_else(|| {
                            ImportError::decode(format!(
                                "edge row {}->{} of '{label}' is missing cell '{}'",
                                row.source, row.dest, property.name
                            ))
                        })?;
                        decoded.push(decode::decode(cell, &property.data_type)?);
                    }
                }
            }
            out.push(decoded);
        }
        trace!(label, rows = out.len(), "decoded edge chunk");
        Ok(())
    }
}

impl BlockRead for BlockReader {
    fn read_batch(&mut self, out: &mut Vec<Vec<GenericValue>>) -> Result<bool, ImportError> {
        match self.state {
            DeliveryState::Unstarted => {}
            DeliveryState::Delivering | DeliveryState::Exhausted => {
                self.state = DeliveryState::Exhausted;
                return Ok(false);
            }
        }
        self.state = DeliveryState::Delivering;

        // Rows are staged locally so a mid-batch failure delivers nothing.
        let mut rows = Vec::new();
        let result = match self.work.target.clone() {
            WorkTarget::Vertices { label } => self.read_vertex_unit(&label, &mut rows),
            WorkTarget::Edges { label } => self.read_edge_unit(&label, &mut rows),
        };
        match result {
            Ok(()) => {
                out.append(&mut rows);
                Ok(true)
            }
            Err(err) => {
                self.state = DeliveryState::Exhausted;
                Err(err)
            }
        }
    }
}
