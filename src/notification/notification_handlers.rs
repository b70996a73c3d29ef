use crate::{
    error::Result,
    state::AppState,
};
use super::{
    notification_dto::{MessageResponse, UnreadCountResponse},
    notification_models::Notification,
};
use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};

/// Latest notifications, newest first
#[utoipa::path(
    get,
    path = "/api/notifications/",
    responses(
        (status = 200, description = "List of notifications", body = Vec<Notification>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn get_notifications(State(state): State<AppState>) -> Result<Json<Vec<Notification>>> {
    Ok(Json(state.notification_service.recent().await?))
}

/// Number of unread notifications
#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn get_unread_count(State(state): State<AppState>) -> Result<Json<UnreadCountResponse>> {
    let count = state.notification_service.unread_count().await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// Mark notification as read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked as read", body = MessageResponse),
        (status = 404, description = "Notification not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(notification_id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    state.notification_service.mark_as_read(notification_id).await?;
    Ok(Json(MessageResponse::new("Notification marked as read")))
}

/// Mark every notification as read
#[utoipa::path(
    put,
    path = "/api/notifications/mark-all-read",
    responses(
        (status = 200, description = "All notifications marked as read", body = MessageResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_all_read(State(state): State<AppState>) -> Result<Json<MessageResponse>> {
    let updated = state.notification_service.mark_all_as_read().await?;
    tracing::debug!(updated, "Marked notifications as read");
    Ok(Json(MessageResponse::new("All notifications marked as read")))
}

/// Subscribe to new notifications via Server-Sent Events
#[utoipa::path(
    get,
    path = "/api/notifications/stream",
    responses(
        (status = 200, description = "SSE stream of notifications"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn notification_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let rx = state.notification_service.subscribe();

    // Lagged receivers skip the missed messages.
    let stream = BroadcastStream::new(rx).filter_map(|msg| {
        let notification = msg.ok()?;
        let event = Event::default()
            .event(notification.kind.clone())
            .json_data(&notification)
            .ok()?;
        Some(Ok(event))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
