//! Owner-scoped notification management.

use std::sync::Arc;

use uuid::Uuid;

use vetlink_core::error::AppError;
use vetlink_core::result::AppResult;
use vetlink_core::types::pagination::{PageRequest, PageResponse};
use vetlink_database::repositories::notification::NotificationRepository;
use vetlink_entity::notification::Notification;

use crate::context::RequestContext;

/// Manages a user's own notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notification_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Create a new notification service.
    pub fn new(notification_repo: Arc<NotificationRepository>) -> Self {
        Self { notification_repo }
    }

    /// List the current user's notifications, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.notification_repo
            .find_by_recipient(ctx.user_id, &page)
            .await
    }

    /// Count the current user's unread notifications.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.notification_repo.count_unread(ctx.user_id).await
    }

    /// Mark one notification as read.
    ///
    /// Marking an already-read notification is a no-op acknowledgment;
    /// a notification belonging to another user reads as absent either way.
    pub async fn mark_read(&self, ctx: &RequestContext, notification_id: Uuid) -> AppResult<()> {
        self.notification_repo
            .mark_read(notification_id, ctx.user_id)
            .await?;
        Ok(())
    }

    /// Mark all of the current user's notifications as read.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.notification_repo.mark_all_read(ctx.user_id).await
    }

    /// Delete a notification owned by the current user.
    pub async fn delete(&self, ctx: &RequestContext, notification_id: Uuid) -> AppResult<()> {
        let deleted = self
            .notification_repo
            .delete(notification_id, ctx.user_id)
            .await?;
        if !deleted {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }
}
