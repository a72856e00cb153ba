//! Configuration parsing
//!
//! Target definition files are YAML documents; the built-in definition set is
//! used when a directory has none.

pub mod builtin;
pub mod targets;
