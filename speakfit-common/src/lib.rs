//! Shared library for SpeakFit modules
//!
//! Holds the pieces both the API service and auxiliary tooling need:
//! error taxonomy, configuration resolution, and the database layer
//! (pool initialization, schema, models, query helpers, catalog seeding).

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
