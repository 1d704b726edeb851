//! Testing utilities and fixtures
//!
//! This module provides test doubles for the classifier's external
//! collaborators, shared by unit and integration tests.

pub mod mocks;

pub use mocks::{MockFactSource, MockFactSourceBuilder};
