//! Domain types shared across ForgeXP crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers freely.

pub mod actor;
pub mod id;
