//! Storage layer for persistence.

mod images;
mod memory;
mod sweeper;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{
    AdminModel, BookingModel, BookingStatus, ClassModel, EnquiryModel, ImageModel, InviteModel,
};

pub use images::*;
pub use memory::*;
pub use sweeper::*;

/// Trait for studio record storage. Handlers treat the backing service as
/// opaque and reach it only through these request/response calls.
#[async_trait]
pub trait StudioStore: Send + Sync {
    // Class operations
    async fn create_class(&self, class: ClassModel) -> ApiResult<()>;
    async fn get_class(&self, id: Uuid) -> ApiResult<ClassModel>;
    async fn update_class(&self, class: ClassModel) -> ApiResult<()>;
    async fn delete_class(&self, id: Uuid) -> ApiResult<()>;
    /// Lists classes soonest first. Returns the page slice and the total
    /// number of classes.
    async fn list_classes(&self, offset: u64, limit: u64) -> ApiResult<(Vec<ClassModel>, u64)>;

    // Booking operations
    async fn create_booking(&self, booking: BookingModel) -> ApiResult<()>;
    async fn get_booking(&self, id: Uuid) -> ApiResult<BookingModel>;
    async fn update_booking(&self, booking: BookingModel) -> ApiResult<()>;
    /// Lists bookings newest first, optionally filtered by status. Returns
    /// the page slice and the total matching count.
    async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
        offset: u64,
        limit: u64,
    ) -> ApiResult<(Vec<BookingModel>, u64)>;
    /// Confirmed spots taken on a class.
    async fn confirmed_spots(&self, class_id: Uuid) -> ApiResult<u64>;

    // Enquiry operations
    async fn create_enquiry(&self, enquiry: EnquiryModel) -> ApiResult<()>;
    async fn list_enquiries(&self, offset: u64, limit: u64)
        -> ApiResult<(Vec<EnquiryModel>, u64)>;

    // Image metadata operations
    async fn create_image(&self, image: ImageModel) -> ApiResult<()>;
    async fn get_image(&self, id: Uuid) -> ApiResult<ImageModel>;
    async fn delete_image(&self, id: Uuid) -> ApiResult<()>;

    // Administrator operations
    async fn create_admin(&self, admin: AdminModel) -> ApiResult<()>;
    async fn get_admin(&self, id: Uuid) -> ApiResult<AdminModel>;
    async fn get_admin_by_email(&self, email: &str) -> ApiResult<AdminModel>;

    // Invitation operations
    async fn create_invite(&self, invite: InviteModel) -> ApiResult<()>;
    async fn get_invite(&self, token: &str) -> ApiResult<InviteModel>;
    async fn update_invite(&self, invite: InviteModel) -> ApiResult<()>;
    /// Removes unredeemed invitations past their expiry. Returns the number
    /// removed.
    async fn purge_expired_invites(&self, now: DateTime<Utc>) -> ApiResult<u64>;
}
