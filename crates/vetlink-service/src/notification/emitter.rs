//! Fire-and-forget notification emission.
//!
//! Notifications are a side effect of state transitions and never mutate
//! business state. Persistence failures here are logged and swallowed so
//! that the primary operation always wins.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use vetlink_database::repositories::notification::NotificationRepository;
use vetlink_entity::notification::model::CreateNotification;
use vetlink_entity::notification::NotificationKind;

/// A domain event that produces a notification.
///
/// Each variant carries the recipient, the acting user, and the actor's
/// resolved display name; the emitter composes title and message from
/// them.
#[derive(Debug, Clone)]
pub enum NotificationEvent {
    /// `actor` sent `recipient` a connection request.
    ConnectionRequest {
        recipient_id: Uuid,
        actor_id: Uuid,
        actor_name: String,
    },
    /// `actor` accepted `recipient`'s connection request.
    ConnectionAccepted {
        recipient_id: Uuid,
        actor_id: Uuid,
        actor_name: String,
    },
    /// `actor` liked `recipient`'s post.
    PostLiked {
        recipient_id: Uuid,
        actor_id: Uuid,
        actor_name: String,
        post_id: Uuid,
    },
    /// `actor` commented on `recipient`'s post.
    PostCommented {
        recipient_id: Uuid,
        actor_id: Uuid,
        actor_name: String,
        post_id: Uuid,
    },
    /// `actor` sent `recipient` a direct message.
    NewMessage {
        recipient_id: Uuid,
        actor_id: Uuid,
        actor_name: String,
    },
}

impl NotificationEvent {
    /// Compose the persistable notification for this event.
    pub fn compose(&self) -> CreateNotification {
        match self {
            Self::ConnectionRequest {
                recipient_id,
                actor_id,
                actor_name,
            } => CreateNotification {
                recipient_id: *recipient_id,
                kind: NotificationKind::ConnectionRequest,
                title: "Nueva solicitud de conexión".to_string(),
                message: format!("{actor_name} quiere conectar contigo"),
                action_url: Some("/connections/requests".to_string()),
                actor_id: Some(*actor_id),
                post_id: None,
                event_id: None,
                job_id: None,
            },
            Self::ConnectionAccepted {
                recipient_id,
                actor_id,
                actor_name,
            } => CreateNotification {
                recipient_id: *recipient_id,
                kind: NotificationKind::ConnectionAccepted,
                title: "Solicitud aceptada".to_string(),
                message: format!("{actor_name} ha aceptado tu solicitud de conexión"),
                action_url: Some(format!("/profile/{actor_id}")),
                actor_id: Some(*actor_id),
                post_id: None,
                event_id: None,
                job_id: None,
            },
            Self::PostLiked {
                recipient_id,
                actor_id,
                actor_name,
                post_id,
            } => CreateNotification {
                recipient_id: *recipient_id,
                kind: NotificationKind::PostLiked,
                title: "Nueva reacción".to_string(),
                message: format!("A {actor_name} le gusta tu publicación"),
                action_url: Some(format!("/posts/{post_id}")),
                actor_id: Some(*actor_id),
                post_id: Some(*post_id),
                event_id: None,
                job_id: None,
            },
            Self::PostCommented {
                recipient_id,
                actor_id,
                actor_name,
                post_id,
            } => CreateNotification {
                recipient_id: *recipient_id,
                kind: NotificationKind::PostCommented,
                title: "Nuevo comentario".to_string(),
                message: format!("{actor_name} ha comentado tu publicación"),
                action_url: Some(format!("/posts/{post_id}")),
                actor_id: Some(*actor_id),
                post_id: Some(*post_id),
                event_id: None,
                job_id: None,
            },
            Self::NewMessage {
                recipient_id,
                actor_id,
                actor_name,
            } => CreateNotification {
                recipient_id: *recipient_id,
                kind: NotificationKind::NewMessage,
                title: "Nuevo mensaje".to_string(),
                message: format!("{actor_name} te ha enviado un mensaje"),
                action_url: Some("/messages".to_string()),
                actor_id: Some(*actor_id),
                post_id: None,
                event_id: None,
                job_id: None,
            },
        }
    }
}

/// Persists notifications produced by domain events.
#[derive(Debug, Clone)]
pub struct NotificationEmitter {
    /// Notification repository.
    notification_repo: Arc<NotificationRepository>,
}

impl NotificationEmitter {
    /// Create a new emitter.
    pub fn new(notification_repo: Arc<NotificationRepository>) -> Self {
        Self { notification_repo }
    }

    /// Emit a notification for the given event.
    ///
    /// Failures are logged and swallowed: notification delivery must
    /// never fail the operation that triggered it.
    pub async fn emit(&self, event: NotificationEvent) {
        let data = event.compose();
        if let Err(e) = self.notification_repo.create(&data).await {
            warn!(
                recipient_id = %data.recipient_id,
                kind = %data.kind,
                error = %e,
                "Failed to persist notification"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_request_template() {
        let recipient = Uuid::new_v4();
        let actor = Uuid::new_v4();
        let data = NotificationEvent::ConnectionRequest {
            recipient_id: recipient,
            actor_id: actor,
            actor_name: "Clínica Mascota Feliz".to_string(),
        }
        .compose();

        assert_eq!(data.recipient_id, recipient);
        assert_eq!(data.kind, NotificationKind::ConnectionRequest);
        assert_eq!(data.message, "Clínica Mascota Feliz quiere conectar contigo");
        assert_eq!(data.actor_id, Some(actor));
        assert!(data.post_id.is_none());
    }

    #[test]
    fn test_connection_accepted_links_to_actor_profile() {
        let actor = Uuid::new_v4();
        let data = NotificationEvent::ConnectionAccepted {
            recipient_id: Uuid::new_v4(),
            actor_id: actor,
            actor_name: "Ana García".to_string(),
        }
        .compose();

        assert_eq!(data.kind, NotificationKind::ConnectionAccepted);
        assert_eq!(data.action_url, Some(format!("/profile/{actor}")));
    }

    #[test]
    fn test_post_engagement_templates_reference_post() {
        let post = Uuid::new_v4();
        let liked = NotificationEvent::PostLiked {
            recipient_id: Uuid::new_v4(),
            actor_id: Uuid::new_v4(),
            actor_name: "Ana".to_string(),
            post_id: post,
        }
        .compose();
        assert_eq!(liked.post_id, Some(post));
        assert_eq!(liked.action_url, Some(format!("/posts/{post}")));

        let commented = NotificationEvent::PostCommented {
            recipient_id: Uuid::new_v4(),
            actor_id: Uuid::new_v4(),
            actor_name: "Ana".to_string(),
            post_id: post,
        }
        .compose();
        assert_eq!(commented.kind, NotificationKind::PostCommented);
        assert_eq!(commented.post_id, Some(post));
    }
}
