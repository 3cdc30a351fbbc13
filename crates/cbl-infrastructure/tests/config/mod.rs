//! Configuration Tests
//!
//! Tests for configuration loading, presets and validation.

mod validation_test;
