//! # Number Classifier
//!
//! A small HTTP service that classifies an integer and decorates the result
//! with a math fun fact from a third-party service.
//!
//! ## Usage
//!
//! ```bash
//! PORT=3000 number-classifier -v
//! curl 'http://localhost:3000/api/classify-number?number=371'
//! ```
//!
//! ## Modules
//!
//! - `api_server` - axum router and server lifecycle
//! - `classify` - Pure arithmetic predicates (prime, perfect, Armstrong, digit sum)
//! - `config` - Startup configuration read from the environment
//! - `error` - Error type and error code registry
//! - `facts` - Trait-based fun fact lookup with a reqwest implementation
//! - `response` - Request lifecycle and fallback policy for failed lookups
//! - `validate` - Query parameter validation
//! - `testing` - Test doubles for external collaborators
pub mod api_server;
pub mod classify;
pub mod config;
pub mod error;
pub mod facts;
pub mod response;
pub mod validate;

pub mod testing;
