//! Unit tests for domain error types

use authkeys_domain::Error;

#[test]
fn test_not_found_error() {
    let error = Error::not_found("rsa:7");
    match error {
        Error::NotFound { resource } => assert_eq!(resource, "rsa:7"),
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_invalid_argument_error() {
    let error = Error::invalid_argument("key strength too small");
    match error {
        Error::InvalidArgument { message } => assert_eq!(message, "key strength too small"),
        _ => panic!("Expected InvalidArgument error"),
    }
}

#[test]
fn test_storage_error_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error = Error::storage_with_source("Redis unreachable", io);
    match &error {
        Error::Storage { message, source } => {
            assert_eq!(message, "Redis unreachable");
            assert!(source.is_some());
        }
        _ => panic!("Expected Storage error"),
    }
    assert!(error.to_string().contains("Redis unreachable"));
}

#[test]
fn test_integrity_failure_classification() {
    assert!(Error::decryption("tag mismatch").is_integrity_failure());
    assert!(!Error::encryption("rng failure").is_integrity_failure());
    assert!(!Error::storage("timeout").is_integrity_failure());
}

#[test]
fn test_configuration_error_display() {
    let error = Error::configuration("rotation.interval_secs must be at least 1");
    assert_eq!(
        error.to_string(),
        "Configuration error: rotation.interval_secs must be at least 1"
    );
}
