//! Test utilities for ForgeXP services.
//!
//! Import from `[dev-dependencies]` only, never from production code.

pub mod auth;
