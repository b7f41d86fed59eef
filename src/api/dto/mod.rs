//! Request and response DTOs for the HTTP API.
//!
//! Request types carry `validator` annotations and are validated in the
//! handlers before any service call; response types never expose internal
//! fields such as token hashes.

pub mod admin;
pub mod health;
pub mod links;
pub mod pagination;
pub mod qr;
pub mod stats;
