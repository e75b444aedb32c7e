//! Database layer: pool initialization, schema, models, and query helpers

pub mod catalog;
pub mod init;
pub mod models;
pub mod results;
pub mod sessions;
pub mod tokens;
pub mod users;

pub use init::{init_database, init_memory_database};
