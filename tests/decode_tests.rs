use graph_archive_import::decode::decode;
use graph_archive_import::{ExternalType, GenericValue, ImportError, RawValue};

#[test]
fn test_scalar_round_trips_preserve_width_and_signedness() {
    let cases = [
        (RawValue::Bool(true), ExternalType::Bool, GenericValue::Bool(true)),
        (RawValue::Int(-128), ExternalType::Int8, GenericValue::Int8(-128)),
        (
            RawValue::Int(-32768),
            ExternalType::Int16,
            GenericValue::Int16(-32768),
        ),
        (
            RawValue::Int(2_147_483_647),
            ExternalType::Int32,
            GenericValue::Int32(2_147_483_647),
        ),
        (
            RawValue::Int(i64::MIN),
            ExternalType::Int64,
            GenericValue::Int64(i64::MIN),
        ),
        (RawValue::UInt(255), ExternalType::UInt8, GenericValue::UInt8(255)),
        (
            RawValue::UInt(65_535),
            ExternalType::UInt16,
            GenericValue::UInt16(65_535),
        ),
        (
            RawValue::UInt(4_294_967_295),
            ExternalType::UInt32,
            GenericValue::UInt32(4_294_967_295),
        ),
        (
            RawValue::UInt(u64::MAX),
            ExternalType::UInt64,
            GenericValue::UInt64(u64::MAX),
        ),
        (
            RawValue::Float(1.5),
            ExternalType::Float32,
            GenericValue::Float32(1.5),
        ),
        (
            RawValue::Float(std::f64::consts::PI),
            ExternalType::Float64,
            GenericValue::Float64(std::f64::consts::PI),
        ),
        (
            RawValue::Text("ada".into()),
            ExternalType::Utf8,
            GenericValue::String("ada".into()),
        ),
        (
            RawValue::Bytes(vec![0xde, 0xad]),
            ExternalType::Binary,
            GenericValue::Bytes(vec![0xde, 0xad]),
        ),
    ];
    for (raw, declared, expected) in cases {
        assert_eq!(decode(&raw, &declared).unwrap(), expected);
    }
}

#[test]
fn test_int_cell_decodes_to_declared_width_not_int64() {
    let value = decode(&RawValue::Int(1), &ExternalType::Int32).unwrap();
    assert_eq!(value, GenericValue::Int32(1));
    assert_eq!(value.tag(), "int32");
}

#[test]
fn test_null_decodes_to_null_under_any_declared_type() {
    let declared_types = [
        ExternalType::Bool,
        ExternalType::Int8,
        ExternalType::UInt64,
        ExternalType::Float32,
        ExternalType::Utf8,
        ExternalType::Binary,
        ExternalType::List(Box::new(ExternalType::Int32)),
        ExternalType::Map,
    ];
    for declared in declared_types {
        assert_eq!(decode(&RawValue::Null, &declared).unwrap(), GenericValue::Null);
    }
}

#[test]
fn test_out_of_range_int_narrowing_fails() {
    let err = decode(&RawValue::Int(128), &ExternalType::Int8).expect_err("expected range error");
    assert!(matches!(err, ImportError::Decode(_)));
    assert!(err.to_string().contains("out of range"));

    let err = decode(&RawValue::UInt(70_000), &ExternalType::UInt16).expect_err("expected range error");
    assert!(matches!(err, ImportError::Decode(_)));
}

#[test]
fn test_shape_mismatch_is_not_coerced() {
    // A signed cell never decodes under an unsigned declared type, and the
    // other way round, even when the value would fit.
    assert!(matches!(
        decode(&RawValue::Int(1), &ExternalType::UInt32),
        Err(ImportError::Decode(_))
    ));
    assert!(matches!(
        decode(&RawValue::UInt(1), &ExternalType::Int32),
        Err(ImportError::Decode(_))
    ));
    assert!(matches!(
        decode(&RawValue::Text("7".into()), &ExternalType::Int64),
        Err(ImportError::Decode(_))
    ));
    assert!(matches!(
        decode(&RawValue::Float(1.0), &ExternalType::Int64),
        Err(ImportError::Decode(_))
    ));
    assert!(matches!(
        decode(&RawValue::Int(1), &ExternalType::Bool),
        Err(ImportError::Decode(_))
    ));
    assert!(matches!(
        decode(&RawValue::Bytes(vec![1]), &ExternalType::Utf8),
        Err(ImportError::Decode(_))
    ));
}

#[test]
fn test_float32_requires_exact_round_trip() {
    // 0.1 has no exact f32 representation.
    let err = decode(&RawValue::Float(0.1), &ExternalType::Float32).expect_err("expected precision error");
    assert!(matches!(err, ImportError::Decode(_)));

    // Values that are exactly representable pass, including NaN.
    assert_eq!(
        decode(&RawValue::Float(0.25), &ExternalType::Float32).unwrap(),
        GenericValue::Float32(0.25)
    );
    match decode(&RawValue::Float(f64::NAN), &ExternalType::Float32).unwrap() {
        GenericValue::Float32(f) => assert!(f.is_nan()),
        other => panic!("unexpected value {other:?}"),
    }
}

#[test]
fn test_nested_types_are_unsupported_and_named() {
    let err = decode(
        &RawValue::Int(1),
        &ExternalType::List(Box::new(ExternalType::Int32)),
    )
    .expect_err("expected unsupported type");
    assert!(matches!(err, ImportError::UnsupportedType(_)));
    assert!(err.to_string().contains("list<int32>"));

    let err = decode(&RawValue::Int(1), &ExternalType::Map).expect_err("expected unsupported type");
    assert!(err.to_string().contains("map"));
}
