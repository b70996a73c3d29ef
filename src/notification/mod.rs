pub mod notification_models;
pub mod notification_dto;
pub mod notification_repository;
pub mod notification_handlers;
pub mod notification_service;

pub use notification_models::{Notification, NotificationKind, Priority};
pub use notification_dto::{MessageResponse, UnreadCountResponse};
pub use notification_repository::NotificationRepository;
pub use notification_handlers::{
    get_notifications, get_unread_count, mark_all_read, mark_notification_read, notification_stream,
};
pub use notification_service::NotificationService;
