//! HTTP request handlers.

pub mod admin;
pub mod health;
pub mod links;
pub mod qr;
pub mod redirect;
pub mod stats;

pub use admin::{
    delete_any_link_handler, delete_user_handler, list_all_links_handler, list_users_handler,
    set_user_active_handler,
};
pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    update_link_handler,
};
pub use qr::{
    create_qr_handler, delete_qr_handler, download_qr_handler, get_qr_handler, list_qr_handler,
    preview_qr_handler, update_qr_handler,
};
pub use redirect::redirect_handler;
pub use stats::{link_stats_handler, overview_handler};
