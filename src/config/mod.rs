//! # heapdb Configuration Module
//!
//! This module centralizes the configuration constants for heapdb. The on-disk
//! sizes that depend on each other (record header fields and their sum) are
//! co-located and checked at compile time.
//!
//! ## Module Organization
//!
//! - [`constants`]: File layout sizes, file extensions and reserved names

pub mod constants;
pub use constants::*;
