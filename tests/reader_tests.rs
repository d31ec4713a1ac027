use std::sync::Arc;

use graph_archive_import::{
    AdjacencyLayout, Archive, BlockRead, BlockReader, ColumnSpec, DeliveryState, EdgeRow,
    EdgeType, ExternalType, GenericValue, ImportError, IndexRegistry, MemoryArchive, Property,
    RawValue, VertexRow, VertexType, WorkDescriptor,
};

#[test]
fn test_vertex_unit_decodes_projection_in_descriptor_order() {
    let archive = sample_archive();
    let registry = Arc::new(IndexRegistry::new());
    let work = WorkDescriptor::vertices(
        "person",
        0,
        vec![ColumnSpec::property("name"), ColumnSpec::property("id")],
    );
    let mut reader = BlockReader::new(archive, registry, work);

    let mut rows = Vec::new();
    assert!(reader.read_batch(&mut rows).unwrap());
    assert_eq!(
        rows,
        vec![
            vec![
                GenericValue::String("A".to_string()),
                GenericValue::Int64(100)
            ],
            vec![
                GenericValue::String("B".to_string()),
                GenericValue::Int64(101)
            ],
        ]
    );
}

#[test]
fn test_unit_of_work_is_delivered_exactly_once() {
    let archive = sample_archive();
    let registry = Arc::new(IndexRegistry::new());
    let work = WorkDescriptor::vertices("person", 0, vec![ColumnSpec::property("id")]);
    let mut reader = BlockReader::new(archive, registry, work);
    assert_eq!(reader.state(), DeliveryState::Unstarted);

    let mut rows = Vec::new();
    assert!(reader.read_batch(&mut rows).unwrap());
    assert_eq!(rows.len(), 2);
    assert_eq!(reader.state(), DeliveryState::Delivering);

    let before = rows.len();
    assert!(!reader.read_batch(&mut rows).unwrap());
    assert!(!reader.read_batch(&mut rows).unwrap());
    assert_eq!(rows.len(), before);
    assert_eq!(reader.state(), DeliveryState::Exhausted);
}

#[test]
fn test_edge_unit_resolves_endpoints_to_primary_keys() {
    let archive = sample_archive();
    let registry = Arc::new(IndexRegistry::new());
    let work = WorkDescriptor::edges(
        "knows",
        0,
        vec![
            ColumnSpec::Source,
            ColumnSpec::Destination,
            ColumnSpec::property("since"),
        ],
    );
    let mut reader = BlockReader::new(archive, Arc::clone(&registry), work);

    let mut rows = Vec::new();
    assert!(reader.read_batch(&mut rows).unwrap());
    // Raw endpoint local id 1 resolves to primary key "B".
    assert_eq!(
        rows,
        vec![vec![
            GenericValue::String("A".to_string()),
            GenericValue::String("B".to_string()),
            GenericValue::Int32(2020),
        ]]
    );
    // The index build is visible through the shared registry.
    assert_eq!(registry.stats().entries, 1);
}

#[test]
fn test_edge_unit_fixes_preferred_layout_at_first_use() {
    let archive = sample_archive();
    let registry = Arc::new(IndexRegistry::new());
    let work = WorkDescriptor::edges("knows", 0, vec![ColumnSpec::Source]);
    let mut reader = BlockReader::new(archive, registry, work);
    assert_eq!(reader.layout(), None);

    let mut rows = Vec::new();
    reader.read_batch(&mut rows).unwrap();
    // Both ordered-by-source and unordered-by-dest are materialized; the
    // ordered by-source layout wins.
    assert_eq!(reader.layout(), Some(AdjacencyLayout::OrderedBySource));
}

#[test]
fn test_dangling_endpoint_aborts_batch_with_no_rows() {
    let mut archive = sample_archive_mut();
    archive
        .push_edge_chunk(
            "knows",
            AdjacencyLayout::OrderedBySource,
            vec![EdgeRow {
                source: 0,
                dest: 9, // no such person
                cells: vec![RawValue::Int(2021)],
            }],
        )
        .unwrap();
    let registry = Arc::new(IndexRegistry::new());
    let work = WorkDescriptor::edges(
        "knows",
        1,
        vec![ColumnSpec::Source, ColumnSpec::Destination],
    );
    let mut reader = BlockReader::new(Arc::new(archive), registry, work);

    let mut rows = Vec::new();
    let err = reader
        .read_batch(&mut rows)
        .expect_err("expected dangling reference");
    assert!(matches!(err, ImportError::DanglingReference(_)));
    assert!(rows.is_empty());
    assert_eq!(reader.state(), DeliveryState::Exhausted);
    // The failed unit is not retried; later calls signal completion.
    assert!(!reader.read_batch(&mut rows).unwrap());
}

#[test]
fn test_two_edge_readers_share_one_index_build() {
    let archive = sample_archive();
    let registry = Arc::new(IndexRegistry::new());
    let columns = vec![ColumnSpec::Source, ColumnSpec::Destination];

    let mut first = BlockReader::new(
        Arc::clone(&archive),
        Arc::clone(&registry),
        WorkDescriptor::edges("knows", 0, columns.clone()),
    );
    let mut second = BlockReader::new(
        Arc::clone(&archive),
        Arc::clone(&registry),
        WorkDescriptor::edges("knows", 0, columns),
    );

    let mut rows = Vec::new();
    first.read_batch(&mut rows).unwrap();
    second.read_batch(&mut rows).unwrap();

    // Both endpoints are the same label, so exactly one build happened.
    assert_eq!(registry.stats().misses, 1);
    assert_eq!(registry.stats().entries, 1);
}

#[test]
fn test_vertex_unit_rejects_endpoint_projection() {
    let archive = sample_archive();
    let registry = Arc::new(IndexRegistry::new());
    let work = WorkDescriptor::vertices("person", 0, vec![ColumnSpec::Source]);
    let mut reader = BlockReader::new(archive, registry, work);
    let err = reader
        .read_batch(&mut Vec::new())
        .expect_err("expected schema error");
    assert!(matches!(err, ImportError::Schema(_)));
}

#[test]
fn test_unknown_labels_and_properties_are_schema_errors() {
    let archive = sample_archive();
    let registry = Arc::new(IndexRegistry::new());

    let work = WorkDescriptor::vertices("nobody", 0, vec![]);
    let mut reader = BlockReader::new(Arc::clone(&archive), Arc::clone(&registry), work);
    assert!(matches!(
        reader.read_batch(&mut Vec::new()),
        Err(ImportError::Schema(_))
    ));

    let work = WorkDescriptor::vertices("person", 0, vec![ColumnSpec::property("salary")]);
    let mut reader = BlockReader::new(Arc::clone(&archive), Arc::clone(&registry), work);
    assert!(matches!(
        reader.read_batch(&mut Vec::new()),
        Err(ImportError::Schema(_))
    ));

    let work = WorkDescriptor::edges("hates", 0, vec![ColumnSpec::Source]);
    let mut reader = BlockReader::new(archive, registry, work);
    assert!(matches!(
        reader.read_batch(&mut Vec::new()),
        Err(ImportError::Schema(_))
    ));
}

#[test]
fn test_ambiguous_primary_key_fails_before_rows_are_read() {
    let mut archive = MemoryArchive::new();
    archive.add_vertex_type(VertexType {
        label: "person".to_string(),
        properties: vec![
            Property::primary("id", ExternalType::Int64),
            Property::primary("uuid", ExternalType::Utf8),
        ],
    });
    let registry = Arc::new(IndexRegistry::new());
    // No chunk exists; the schema failure must come first anyway.
    let work = WorkDescriptor::vertices("person", 0, vec![ColumnSpec::property("id")]);
    let mut reader = BlockReader::new(Arc::new(archive), registry, work);
    let err = reader
        .read_batch(&mut Vec::new())
        .expect_err("expected schema error");
    assert!(matches!(err, ImportError::Schema(_)));
    assert!(err.to_string().contains("more than one primary key"));
}

#[test]
fn test_reader_works_through_trait_object() {
    let archive = sample_archive();
    let registry = Arc::new(IndexRegistry::new());
    let work = WorkDescriptor::vertices("person", 0, vec![ColumnSpec::property("id")]);
    let mut reader: Box<dyn BlockRead> = Box::new(BlockReader::new(archive, registry, work));
    let mut rows = Vec::new();
    while reader.read_batch(&mut rows).unwrap() {}
    assert_eq!(rows.len(), 2);
}

fn sample_archive() -> Arc<dyn Archive> {
    Arc::new(sample_archive_mut())
}

/// Two persons {0: "A", 1: "B"} and one "knows" edge 0 -> 1, with both an
/// ordered-by-source and an unordered-by-dest layout materialized.
fn sample_archive_mut() -> MemoryArchive {
    let mut archive = MemoryArchive::new();
    archive.add_vertex_type(VertexType {
        label: "person".to_string(),
        properties: vec![
            Property::primary("name", ExternalType::Utf8),
            Property::new("id", ExternalType::Int64),
        ],
    });
    archive
        .push_vertex_chunk(
            "person",
            vec![
                VertexRow {
                    local_id: 0,
                    cells: vec![RawValue::Text("A".to_string()), RawValue::Int(100)],
                },
                VertexRow {
                    local_id: 1,
                    cells: vec![RawValue::Text("B".to_string()), RawValue::Int(101)],
                },
            ],
        )
        .unwrap();

    archive.add_edge_type(EdgeType {
        label: "knows".to_string(),
        src_label: "person".to_string(),
        dst_label: "person".to_string(),
        properties: vec![Property::new("since", ExternalType::Int32)],
        layouts: vec![
            AdjacencyLayout::OrderedBySource,
            AdjacencyLayout::UnorderedByDest,
        ],
    });
    archive
        .push_edge_chunk(
            "knows",
            AdjacencyLayout::OrderedBySource,
            vec![EdgeRow {
                source: 0,
                dest: 1,
                cells: vec![RawValue::Int(2020)],
            }],
        )
        .unwrap();
    archive
}
