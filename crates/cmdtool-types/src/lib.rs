//! Foundation types for cmdtool.
//!
//! This crate holds the pieces shared by every other cmdtool crate: the error
//! taxonomy, the TOML configuration, and the backend probe boundary with its
//! recursive value type.

pub mod config;
pub mod error;
pub mod probe;
