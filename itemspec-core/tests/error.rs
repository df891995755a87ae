use itemspec_core::{MetadataError, MetadataSource};
use std::error::Error;

#[test]
fn forbidden_has_no_source() {
    let err = MetadataError::Forbidden("role 'guest' may not read fields".into());
    assert!(err.is_forbidden());
    assert!(err.source().is_none());
    assert_eq!(err.to_string(), "Forbidden: role 'guest' may not read fields");
}

#[test]
fn storage_wraps_its_cause() {
    let err = MetadataError::storage(std::io::Error::other("connection reset"));
    assert!(!err.is_forbidden());
    assert_eq!(err.to_string(), "Storage error: connection reset");
    assert_eq!(err.source().unwrap().to_string(), "connection reset");
}

#[test]
fn json_errors_are_storage_errors() {
    let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(MetadataError::from(parse), MetadataError::Storage(_)));
}

#[test]
fn source_names() {
    assert_eq!(MetadataSource::Collections.to_string(), "collections");
    assert_eq!(MetadataSource::Fields.as_str(), "fields");
    assert_eq!(MetadataSource::Relations.as_str(), "relations");
}
