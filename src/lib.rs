//! In-memory JSON item services.
//!
//! Two identical services, RunA and RunB, each keep their own ordered list of
//! client-supplied JSON objects and expose it over HTTP:
//!
//! ```text
//! GET  /items   -> 200 {"items": [...]}
//! POST /items   -> 201 {"item": {...}}
//!               -> 400 {"error": "Invalid item"}   (body absent or not an object)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: The in-memory item collection
//! - [`api`]: HTTP routes and handlers
//! - [`server`]: Listener setup and graceful shutdown
//! - [`exerciser`]: Client that smoke-tests both services
//! - [`metrics`]: Counters and latency histograms
//! - [`utils`]: Logging and signal helpers

pub mod api;
pub mod config;
pub mod error;
pub mod exerciser;
pub mod metrics;
pub mod server;
pub mod store;
pub mod utils;

pub use config::{Config, Instance};
pub use error::{Result, ServiceError};
pub use store::{Item, ItemStore};
