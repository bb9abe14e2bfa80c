//! Cross-cutting service plumbing: tracing, middleware, health checks,
//! configuration helpers, serialization helpers, and store error helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
