//! Shared value types used across VetLink crates.

pub mod pagination;
