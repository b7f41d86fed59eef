//! Repository trait definitions for the domain layer.
//!
//! Traits define the contracts for data access; concrete implementations
//! live in [`crate::infrastructure::persistence`]. Mock implementations are
//! generated via `mockall` for unit tests; integration tests use in-memory
//! implementations under `tests/common`.

pub mod click_repository;
pub mod link_repository;
pub mod qr_repository;
pub mod user_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;
pub use qr_repository::QrRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use qr_repository::MockQrRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
