//! Application layer containing the business services.

pub mod services;
