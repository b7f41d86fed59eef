//! Shared utilities: short code generation and target URL preparation.

pub mod code_generator;
pub mod target_url;
