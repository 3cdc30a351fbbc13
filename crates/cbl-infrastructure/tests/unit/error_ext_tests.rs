//! Error Extension Tests

use cbl_domain::error::{Error, Result};
use cbl_infrastructure::error_ext::ErrorContext;
use std::io;

fn not_found() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "file not found")
}

#[test]
fn test_io_context() {
    let result: Result<()> = Err(not_found()).io_context("failed to read file");

    if let Err(Error::Io { source, message }) = result {
        assert!(message.contains("failed to read file"));
        assert!(message.contains("file not found"));
        assert!(source.is_some());
    } else {
        panic!("Expected Io error");
    }
}

#[test]
fn test_config_context() {
    let result: Result<()> = Err(not_found()).config_context("bad config");

    match result {
        Err(Error::Configuration { message, source }) => {
            assert!(message.starts_with("bad config"));
            assert!(source.is_some());
        }
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_network_context() {
    let result: Result<()> = Err(not_found()).network_context("unreachable");

    assert!(matches!(result, Err(Error::Network { .. })));
}

#[test]
fn test_context_is_infrastructure() {
    let result: Result<()> = Err(not_found()).context("generic failure");

    match result {
        Err(Error::Infrastructure { message, source }) => {
            assert_eq!(message, "generic failure: file not found");
            assert!(source.is_some());
        }
        other => panic!("Expected Infrastructure error, got {other:?}"),
    }
}

#[test]
fn test_with_context_is_lazy() {
    let ok: std::result::Result<u8, io::Error> = Ok(1);
    let value = ok
        .with_context(|| -> String { panic!("context built for a success") })
        .unwrap();
    assert_eq!(value, 1);

    let result: Result<()> = Err(not_found()).with_context(|| format!("reading {}", "cbl.toml"));
    assert!(result.unwrap_err().to_string().contains("reading cbl.toml"));
}
