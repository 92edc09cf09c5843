//! Studio-rs: booking and administration server for a yoga and wellness
//! studio.
//!
//! This crate provides a small HTTP JSON API: a public class schedule with
//! bookings and an enquiry form, image hosting, and an admin area with
//! invitation-based accounts. Listings are paginated through a URL-driven
//! pagination core that keeps the `page` query parameter canonical.
//!
//! # Example
//!
//! ```no_run
//! use studio_rs::{Config, StudioServer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = StudioServer::new(Config::default());
//!     server.run().await.unwrap();
//! }
//! ```

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod router;
pub mod server;
pub mod store;

// Re-exports for convenience
pub use config::{Args, Config, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_KEY, DEFAULT_PAGE_SIZE, DEFAULT_PORT};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use pagination::{page_link, Location, NavigationError, Navigator, PageState, PaginationView, RedirectNavigator};
pub use server::{StudioServer, StudioServerBuilder};
pub use store::{ImageStore, MemoryImageStore, MemoryStudioStore, StudioStore};
