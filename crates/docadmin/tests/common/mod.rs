//! Shared test utilities for docadmin integration tests.
//!
//! This module provides:
//! - `TestHarness`, a migrated in-memory database per test
//! - Builders for the rows most tests need as parents

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::{TestHarness, TEST_COST};
