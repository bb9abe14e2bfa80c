//! Auth types shared across ForgeXP crates.
//!
//! Provides the `AuthProvider` capability, its JWT implementation, and the
//! `Identity` bearer-token extractor.

pub mod identity;
pub mod token;
