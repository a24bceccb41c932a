//! Configuration, loaded from environment variables.
//!
//! - [`cors`]: allowed origins for the browser frontend
//! - [`database`]: SQLite connection pool initialization

pub mod cors;
pub mod database;
