//! Request routing for the studio API.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::config::Config;
use crate::handlers;
use crate::store::{ImageStore, StudioStore};

/// Application state shared between handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn StudioStore>,
    pub images: Arc<dyn ImageStore>,
}

/// Creates the main router for the studio API.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Service
        .route("/", get(handlers::service_info))
        // Public schedule and bookings
        .route("/api/classes", get(handlers::list_classes))
        .route("/api/classes/:id", get(handlers::get_class))
        .route("/api/classes/:id/bookings", post(handlers::create_booking))
        // Public enquiry form and images
        .route("/api/enquiries", post(handlers::submit_enquiry))
        .route("/api/images/:id", get(handlers::download_image))
        // Admin sessions and invitations
        .route("/api/admin/sessions", post(handlers::create_session))
        .route("/api/admin/me", get(handlers::current_admin))
        .route("/api/admin/invites", post(handlers::create_invite))
        .route("/api/admin/invites/accept", post(handlers::accept_invite))
        // Admin schedule management
        .route("/api/admin/classes", post(handlers::create_class))
        .route(
            "/api/admin/classes/:id",
            put(handlers::update_class).delete(handlers::delete_class),
        )
        // Admin bookings and enquiries
        .route("/api/admin/bookings", get(handlers::list_bookings))
        .route("/api/admin/bookings/:id", delete(handlers::cancel_booking))
        .route("/api/admin/enquiries", get(handlers::list_enquiries))
        // Admin images
        .route("/api/admin/images", post(handlers::upload_image))
        .route("/api/admin/images/:id", delete(handlers::delete_image))
        .with_state(state)
}
