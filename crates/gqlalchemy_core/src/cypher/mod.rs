//! Cypher text rendering primitives.
//!
//! # Responsibility
//! - Turn typed Rust values into Cypher literal text.
//! - Render label chains and property maps used by node/edge patterns.
//!
//! # Invariants
//! - Rendering is deterministic: maps render in key order.
//! - String literals are always quoted and escaped.

pub mod format;
pub mod value;
