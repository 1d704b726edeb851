//! Mock implementations for testing
//!
//! This module provides mock implementations for all external dependencies.

pub mod facts;

pub use facts::*;
