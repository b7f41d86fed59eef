//! Infrastructure layer: database access and outbound HTTP.
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`reachability`] - Target URL liveness probing

pub mod persistence;
pub mod reachability;
