//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without I/O; creation inputs use
//! separate `New*` structs and partial updates use `*Patch` structs.
//!
//! - [`Link`] - A shortened URL mapping with its click counter
//! - [`Click`] - One immutable redirect visit record
//! - [`QrCodeRecord`] - A stored QR render and its style parameters
//! - [`User`] - The owning side of links and QR codes

pub mod click;
pub mod link;
pub mod qr_code;
pub mod user;

pub use click::{BucketCount, Click, ClickBreakdown, NewClick};
pub use link::{Link, LinkPatch, NewLink};
pub use qr_code::{NewQrCode, QrCodeRecord};
pub use user::{CurrentUser, NewUser, User};
