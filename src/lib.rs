//! Link management platform: URL shortening, redirect analytics, and QR
//! code generation.
//!
//! # Architecture
//!
//! - [`domain`] - Entities, repository contracts, click classification
//! - [`application`] - Business services
//! - [`infrastructure`] - PostgreSQL repositories, outbound HTTP
//! - [`api`] - Axum handlers, DTOs, middleware
//! - [`qr`] - QR rendering engine (PNG and SVG)
//!
//! The binary entry point wires configuration from the environment into
//! [`server::run`].

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod qr;
pub mod routes;
pub mod server;
pub mod state;
pub mod utils;
