//! In-memory studio store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::models::{
    AdminModel, BookingModel, BookingStatus, ClassModel, EnquiryModel, ImageModel, InviteModel,
};

use super::StudioStore;

/// In-memory implementation of the studio store.
pub struct MemoryStudioStore {
    /// Classes indexed by id.
    classes: DashMap<Uuid, ClassModel>,

    /// Bookings indexed by id.
    bookings: DashMap<Uuid, BookingModel>,

    /// Enquiries indexed by id.
    enquiries: DashMap<Uuid, EnquiryModel>,

    /// Image metadata indexed by id.
    images: DashMap<Uuid, ImageModel>,

    /// Administrators indexed by id.
    admins: DashMap<Uuid, AdminModel>,

    /// Secondary index: admin email -> id.
    admin_emails: DashMap<String, Uuid>,

    /// Invitations indexed by token.
    invites: DashMap<String, InviteModel>,
}

impl MemoryStudioStore {
    pub fn new() -> Self {
        Self {
            classes: DashMap::new(),
            bookings: DashMap::new(),
            enquiries: DashMap::new(),
            images: DashMap::new(),
            admins: DashMap::new(),
            admin_emails: DashMap::new(),
            invites: DashMap::new(),
        }
    }

    /// Sorts, totals, and slices a collected listing.
    fn paginate<T>(mut items: Vec<T>, offset: u64, limit: u64) -> (Vec<T>, u64) {
        let total = items.len() as u64;
        let offset = offset.min(total) as usize;
        let end = (offset + limit as usize).min(items.len());
        (items.drain(offset..end).collect(), total)
    }
}

impl Default for MemoryStudioStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudioStore for MemoryStudioStore {
    async fn create_class(&self, class: ClassModel) -> ApiResult<()> {
        self.classes.insert(class.id, class);
        Ok(())
    }

    async fn get_class(&self, id: Uuid) -> ApiResult<ClassModel> {
        self.classes
            .get(&id)
            .map(|c| c.clone())
            .ok_or_else(|| ApiError::new(ErrorCode::ClassNotFound))
    }

    async fn update_class(&self, class: ClassModel) -> ApiResult<()> {
        if !self.classes.contains_key(&class.id) {
            return Err(ApiError::new(ErrorCode::ClassNotFound));
        }
        self.classes.insert(class.id, class);
        Ok(())
    }

    async fn delete_class(&self, id: Uuid) -> ApiResult<()> {
        self.classes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::new(ErrorCode::ClassNotFound))
    }

    async fn list_classes(&self, offset: u64, limit: u64) -> ApiResult<(Vec<ClassModel>, u64)> {
        let mut classes: Vec<ClassModel> =
            self.classes.iter().map(|c| c.value().clone()).collect();
        classes.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then(a.id.cmp(&b.id)));
        Ok(Self::paginate(classes, offset, limit))
    }

    async fn create_booking(&self, booking: BookingModel) -> ApiResult<()> {
        self.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn get_booking(&self, id: Uuid) -> ApiResult<BookingModel> {
        self.bookings
            .get(&id)
            .map(|b| b.clone())
            .ok_or_else(|| ApiError::new(ErrorCode::BookingNotFound))
    }

    async fn update_booking(&self, booking: BookingModel) -> ApiResult<()> {
        if !self.bookings.contains_key(&booking.id) {
            return Err(ApiError::new(ErrorCode::BookingNotFound));
        }
        self.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
        offset: u64,
        limit: u64,
    ) -> ApiResult<(Vec<BookingModel>, u64)> {
        let mut bookings: Vec<BookingModel> = self
            .bookings
            .iter()
            .map(|b| b.value().clone())
            .filter(|b| status.map_or(true, |s| b.status == s))
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(Self::paginate(bookings, offset, limit))
    }

    async fn confirmed_spots(&self, class_id: Uuid) -> ApiResult<u64> {
        let spots = self
            .bookings
            .iter()
            .filter(|b| b.class_id == class_id && b.status == BookingStatus::Confirmed)
            .map(|b| u64::from(b.spots))
            .sum();
        Ok(spots)
    }

    async fn create_enquiry(&self, enquiry: EnquiryModel) -> ApiResult<()> {
        self.enquiries.insert(enquiry.id, enquiry);
        Ok(())
    }

    async fn list_enquiries(
        &self,
        offset: u64,
        limit: u64,
    ) -> ApiResult<(Vec<EnquiryModel>, u64)> {
        let mut enquiries: Vec<EnquiryModel> =
            self.enquiries.iter().map(|e| e.value().clone()).collect();
        enquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(Self::paginate(enquiries, offset, limit))
    }

    async fn create_image(&self, image: ImageModel) -> ApiResult<()> {
        self.images.insert(image.id, image);
        Ok(())
    }

    async fn get_image(&self, id: Uuid) -> ApiResult<ImageModel> {
        self.images
            .get(&id)
            .map(|i| i.clone())
            .ok_or_else(|| ApiError::new(ErrorCode::ImageNotFound))
    }

    async fn delete_image(&self, id: Uuid) -> ApiResult<()> {
        self.images
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::new(ErrorCode::ImageNotFound))
    }

    async fn create_admin(&self, admin: AdminModel) -> ApiResult<()> {
        if self.admin_emails.contains_key(&admin.email) {
            return Err(ApiError::new(ErrorCode::AdminAlreadyExists));
        }
        self.admin_emails.insert(admin.email.clone(), admin.id);
        self.admins.insert(admin.id, admin);
        Ok(())
    }

    async fn get_admin(&self, id: Uuid) -> ApiResult<AdminModel> {
        self.admins
            .get(&id)
            .map(|a| a.clone())
            .ok_or_else(|| ApiError::new(ErrorCode::AdminNotFound))
    }

    async fn get_admin_by_email(&self, email: &str) -> ApiResult<AdminModel> {
        let id = self
            .admin_emails
            .get(email)
            .map(|id| *id)
            .ok_or_else(|| ApiError::new(ErrorCode::AdminNotFound))?;
        self.get_admin(id).await
    }

    async fn create_invite(&self, invite: InviteModel) -> ApiResult<()> {
        self.invites.insert(invite.token.clone(), invite);
        Ok(())
    }

    async fn get_invite(&self, token: &str) -> ApiResult<InviteModel> {
        self.invites
            .get(token)
            .map(|i| i.clone())
            .ok_or_else(|| ApiError::new(ErrorCode::InviteNotFound))
    }

    async fn update_invite(&self, invite: InviteModel) -> ApiResult<()> {
        if !self.invites.contains_key(&invite.token) {
            return Err(ApiError::new(ErrorCode::InviteNotFound));
        }
        self.invites.insert(invite.token.clone(), invite);
        Ok(())
    }

    async fn purge_expired_invites(&self, now: DateTime<Utc>) -> ApiResult<u64> {
        let before = self.invites.len();
        self.invites
            .retain(|_, invite| invite.redeemed || !invite.is_expired(now));
        Ok((before - self.invites.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn class_at(hours_from_now: i64) -> ClassModel {
        ClassModel::new(
            "Morning Flow".to_string(),
            crate::models::Discipline::Yoga,
            "Slow vinyasa to start the day.".to_string(),
            "Mara".to_string(),
            "Garden room".to_string(),
            Utc::now() + Duration::hours(hours_from_now),
            60,
            12,
        )
    }

    #[tokio::test]
    async fn classes_list_soonest_first() {
        let store = MemoryStudioStore::new();
        let late = class_at(48);
        let early = class_at(2);
        store.create_class(late.clone()).await.unwrap();
        store.create_class(early.clone()).await.unwrap();

        let (classes, total) = store.list_classes(0, 10).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(classes[0].id, early.id);
        assert_eq!(classes[1].id, late.id);
    }

    #[tokio::test]
    async fn listing_slices_and_reports_totals() {
        let store = MemoryStudioStore::new();
        for hour in 0..25 {
            store.create_class(class_at(hour + 1)).await.unwrap();
        }

        let (page, total) = store.list_classes(20, 10).await.unwrap();
        assert_eq!(total, 25);
        assert_eq!(page.len(), 5);

        let (page, total) = store.list_classes(100, 10).await.unwrap();
        assert_eq!(total, 25);
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn confirmed_spots_ignore_cancelled_bookings() {
        let store = MemoryStudioStore::new();
        let class = class_at(4);
        store.create_class(class.clone()).await.unwrap();

        let keep = BookingModel::new(class.id, "Ana".into(), "ana@example.com".into(), 2);
        let mut drop = BookingModel::new(class.id, "Ben".into(), "ben@example.com".into(), 3);
        drop.status = BookingStatus::Cancelled;
        store.create_booking(keep).await.unwrap();
        store.create_booking(drop).await.unwrap();

        assert_eq!(store.confirmed_spots(class.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn duplicate_admin_email_is_rejected() {
        let store = MemoryStudioStore::new();
        let first = AdminModel::new("owner@studio.test".into(), "Owner".into(), "k1".into(), None);
        let second = AdminModel::new("owner@studio.test".into(), "Clone".into(), "k2".into(), None);

        store.create_admin(first).await.unwrap();
        let err = store.create_admin(second).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminAlreadyExists);
    }

    #[tokio::test]
    async fn purge_removes_only_expired_unredeemed_invites() {
        let store = MemoryStudioStore::new();
        let admin_id = Uuid::new_v4();

        let live = InviteModel::new("a@example.com".into(), admin_id, 7);
        let mut expired = InviteModel::new("b@example.com".into(), admin_id, 7);
        expired.expires_at = Utc::now() - Duration::days(1);
        let mut redeemed = InviteModel::new("c@example.com".into(), admin_id, 7);
        redeemed.expires_at = Utc::now() - Duration::days(1);
        redeemed.redeemed = true;

        store.create_invite(live.clone()).await.unwrap();
        store.create_invite(expired.clone()).await.unwrap();
        store.create_invite(redeemed.clone()).await.unwrap();

        let removed = store.purge_expired_invites(Utc::now()).await.unwrap();
        assert_eq!(removed, 1);
        assert!(store.get_invite(&live.token).await.is_ok());
        assert!(store.get_invite(&expired.token).await.is_err());
        assert!(store.get_invite(&redeemed.token).await.is_ok());
    }
}
