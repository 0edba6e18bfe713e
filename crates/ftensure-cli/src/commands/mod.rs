//! CLI command implementations

pub mod ensure;
