//! Common utilities for the cssxpath compiler.
//!
//! This crate provides shared infrastructure used by the library and the CLI:
//! - **Warning System** - colored terminal output for skipped or degraded input

pub mod warning;
