//! PostgreSQL implementations of the domain repository traits.
//!
//! All queries use runtime binding; schema changes surface as row-decoding
//! errors at the repository boundary and are mapped through
//! [`crate::error::AppError`].

pub mod pg_click_repository;
pub mod pg_link_repository;
pub mod pg_qr_repository;
pub mod pg_user_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_qr_repository::PgQrRepository;
pub use pg_user_repository::PgUserRepository;
