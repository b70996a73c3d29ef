use tokio::sync::broadcast;

use crate::error::{AppError, Result};
use super::{
    notification_models::{Notification, NotificationKind, Priority},
    notification_repository::{NotificationRepository, FEED_LIMIT},
};

#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
    tx: broadcast::Sender<Notification>,
}

impl NotificationService {
    pub fn new(repo: NotificationRepository, tx: broadcast::Sender<Notification>) -> Self {
        Self { repo, tx }
    }

    /// Record a notification and push it to live subscribers.
    ///
    /// Failures are logged and swallowed: a notification must never fail the
    /// write that triggered it.
    pub async fn notify(
        &self,
        kind: NotificationKind,
        title: &str,
        message: &str,
        priority: Priority,
    ) -> Option<Notification> {
        match self.repo.create(kind, title, message, priority).await {
            Ok(notification) => {
                // No receivers is fine.
                let _ = self.tx.send(notification.clone());
                Some(notification)
            }
            Err(e) => {
                tracing::error!(kind = kind.as_str(), "Failed to record notification: {:?}", e);
                None
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub async fn recent(&self) -> Result<Vec<Notification>> {
        self.repo.find_recent(FEED_LIMIT).await
    }

    pub async fn unread_count(&self) -> Result<i64> {
        self.repo.count_unread().await
    }

    pub async fn mark_as_read(&self, id: i64) -> Result<Notification> {
        self.repo
            .mark_as_read(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))
    }

    pub async fn mark_all_as_read(&self) -> Result<u64> {
        self.repo.mark_all_as_read().await
    }
}
