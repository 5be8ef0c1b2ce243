//! CLI command implementations.

pub mod common;
pub mod config;
pub mod mask;
pub mod project;
