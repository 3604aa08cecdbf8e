//! Connection lifecycle: send, accept, reject, cancel, remove, status,
//! listings, and suggestions.
//!
//! State machine: `none → pending → {accepted, rejected}`; a pending
//! request may be cancelled (deleted) by the requester; an accepted
//! connection may be removed (deleted) by either party. `blocked` is set
//! by administrative action only and blocks new requests in both
//! directions. A rejected row does not block a later request; it is
//! replaced when either party sends again.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use vetlink_core::error::AppError;
use vetlink_core::result::AppResult;
use vetlink_core::types::pagination::{PageRequest, PageResponse};
use vetlink_database::repositories::connection::ConnectionRepository;
use vetlink_database::repositories::user::UserRepository;
use vetlink_entity::connection::model::CreateConnection;
use vetlink_entity::connection::{Connection, ConnectionStatus, RelationshipView};
use vetlink_entity::user::model::UserSummary;
use vetlink_entity::user::User;

use crate::context::RequestContext;
use crate::notification::{NotificationEmitter, NotificationEvent};

/// Default number of connection suggestions returned.
const SUGGESTION_LIMIT: u64 = 10;

/// A connection enriched with the other party's public projection.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionView {
    /// The connection row.
    #[serde(flatten)]
    pub connection: Connection,
    /// The other party, as seen by the viewer.
    pub peer: UserSummary,
}

/// Manages the connection request lifecycle between users.
#[derive(Debug, Clone)]
pub struct ConnectionService {
    /// Connection repository.
    connection_repo: Arc<ConnectionRepository>,
    /// User repository, for peer projections and existence checks.
    user_repo: Arc<UserRepository>,
    /// Fire-and-forget notification emitter.
    emitter: Arc<NotificationEmitter>,
}

impl ConnectionService {
    /// Create a new connection service.
    pub fn new(
        connection_repo: Arc<ConnectionRepository>,
        user_repo: Arc<UserRepository>,
        emitter: Arc<NotificationEmitter>,
    ) -> Self {
        Self {
            connection_repo,
            user_repo,
            emitter,
        }
    }

    /// Send a connection request to another user.
    ///
    /// Fails with Conflict on self-requests and whenever an accepted,
    /// pending, or blocked row already exists between the pair. A
    /// leftover rejected row is replaced by the new request.
    pub async fn send_request(
        &self,
        ctx: &RequestContext,
        target_id: Uuid,
        message: Option<String>,
    ) -> AppResult<ConnectionView> {
        guard_not_self(ctx.user_id, target_id)?;

        let target = self.require_active_user(target_id).await?;

        let existing = self
            .connection_repo
            .find_between(ctx.user_id, target_id)
            .await?;
        guard_new_request(existing.as_ref())?;
        if let Some(rejected) = existing {
            self.connection_repo.delete(rejected.id).await?;
        }

        let connection = self
            .connection_repo
            .create(&CreateConnection {
                requester_id: ctx.user_id,
                target_id,
                message,
            })
            .await?;

        info!(
            connection_id = %connection.id,
            requester_id = %ctx.user_id,
            target_id = %target_id,
            "Connection request sent"
        );

        if let Some(actor) = self.user_repo.find_by_id(ctx.user_id).await? {
            self.emitter
                .emit(NotificationEvent::ConnectionRequest {
                    recipient_id: target_id,
                    actor_id: ctx.user_id,
                    actor_name: actor.display_name(),
                })
                .await;
        }

        Ok(ConnectionView {
            connection,
            peer: target.summary(),
        })
    }

    /// Accept a pending request addressed to the current user.
    pub async fn accept_request(
        &self,
        ctx: &RequestContext,
        connection_id: Uuid,
    ) -> AppResult<Connection> {
        let connection = self.require_connection(connection_id).await?;
        guard_accept(&connection, ctx.user_id)?;

        let accepted = self
            .connection_repo
            .set_status(connection.id, ConnectionStatus::Accepted)
            .await?;

        info!(connection_id = %accepted.id, "Connection request accepted");

        if let Some(actor) = self.user_repo.find_by_id(ctx.user_id).await? {
            self.emitter
                .emit(NotificationEvent::ConnectionAccepted {
                    recipient_id: connection.requester_id,
                    actor_id: ctx.user_id,
                    actor_name: actor.display_name(),
                })
                .await;
        }

        Ok(accepted)
    }

    /// Reject a pending request addressed to the current user.
    pub async fn reject_request(&self, ctx: &RequestContext, connection_id: Uuid) -> AppResult<()> {
        let connection = self.require_connection(connection_id).await?;
        guard_reject(&connection, ctx.user_id)?;

        self.connection_repo
            .set_status(connection.id, ConnectionStatus::Rejected)
            .await?;

        info!(connection_id = %connection.id, "Connection request rejected");
        Ok(())
    }

    /// Cancel a pending request the current user sent.
    pub async fn cancel_request(&self, ctx: &RequestContext, connection_id: Uuid) -> AppResult<()> {
        let connection = self.require_connection(connection_id).await?;
        guard_cancel(&connection, ctx.user_id)?;

        self.connection_repo.delete(connection.id).await?;

        info!(connection_id = %connection.id, "Connection request cancelled");
        Ok(())
    }

    /// Remove an accepted connection the current user is part of.
    pub async fn remove_connection(
        &self,
        ctx: &RequestContext,
        connection_id: Uuid,
    ) -> AppResult<()> {
        let connection = self.require_connection(connection_id).await?;
        guard_remove(&connection, ctx.user_id)?;

        self.connection_repo.delete(connection.id).await?;

        info!(connection_id = %connection.id, "Connection removed");
        Ok(())
    }

    /// The relationship between the current user and another user.
    pub async fn connection_status(
        &self,
        ctx: &RequestContext,
        other_id: Uuid,
    ) -> AppResult<RelationshipView> {
        let existing = self
            .connection_repo
            .find_between(ctx.user_id, other_id)
            .await?;
        Ok(match existing {
            Some(connection) => RelationshipView::from_connection(ctx.user_id, &connection),
            None => RelationshipView::none(),
        })
    }

    /// Pending requests received by the current user, newest first.
    pub async fn list_pending(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<ConnectionView>> {
        let connections = self.connection_repo.find_pending_for(ctx.user_id, &page).await?;
        self.enrich_with_peers(ctx.user_id, connections).await
    }

    /// Pending requests sent by the current user, newest first.
    pub async fn list_sent(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<ConnectionView>> {
        let connections = self.connection_repo.find_sent_by(ctx.user_id, &page).await?;
        self.enrich_with_peers(ctx.user_id, connections).await
    }

    /// Accepted connections of the current user, most recently accepted
    /// first.
    pub async fn list_connections(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<ConnectionView>> {
        let connections = self
            .connection_repo
            .find_accepted_for(ctx.user_id, &page)
            .await?;
        self.enrich_with_peers(ctx.user_id, connections).await
    }

    /// Connection suggestions for the current user.
    ///
    /// Excludes the viewer and anyone with an accepted, pending, or
    /// blocked row in either direction. Ranking is placeholder: most
    /// recently created active profiles.
    pub async fn suggestions(&self, ctx: &RequestContext) -> AppResult<Vec<UserSummary>> {
        let users = self
            .user_repo
            .suggestions(ctx.user_id, SUGGESTION_LIMIT)
            .await?;
        Ok(users.iter().map(User::summary).collect())
    }

    async fn require_connection(&self, connection_id: Uuid) -> AppResult<Connection> {
        self.connection_repo
            .find_by_id(connection_id)
            .await?
            .ok_or_else(|| AppError::not_found("Connection not found"))
    }

    async fn require_active_user(&self, user_id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .filter(User::is_active)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Attach each connection's other party as a public projection.
    ///
    /// A peer whose account has since disappeared renders with the
    /// fallback display name rather than dropping the row.
    async fn enrich_with_peers(
        &self,
        viewer_id: Uuid,
        page: PageResponse<Connection>,
    ) -> AppResult<PageResponse<ConnectionView>> {
        let peer_ids: Vec<Uuid> = page
            .items
            .iter()
            .map(|c| c.other_party(viewer_id))
            .collect();
        let peers: HashMap<Uuid, UserSummary> = self
            .user_repo
            .find_many(&peer_ids)
            .await?
            .iter()
            .map(|u| (u.id, u.summary()))
            .collect();

        Ok(page.map(|connection| {
            let peer_id = connection.other_party(viewer_id);
            let peer = peers
                .get(&peer_id)
                .cloned()
                .unwrap_or_else(|| missing_peer(peer_id));
            ConnectionView { connection, peer }
        }))
    }
}

/// Placeholder projection for a peer whose account no longer resolves.
fn missing_peer(id: Uuid) -> UserSummary {
    UserSummary {
        id,
        display_name: "Usuario".to_string(),
        profile_type: vetlink_entity::user::ProfileType::Individual,
        headline: None,
        avatar_url: None,
    }
}

fn guard_not_self(requester_id: Uuid, target_id: Uuid) -> AppResult<()> {
    if requester_id == target_id {
        return Err(AppError::conflict(
            "You cannot send a connection request to yourself",
        ));
    }
    Ok(())
}

/// Check that an existing row between the pair does not forbid a new
/// request. Distinct messages per state; a rejected row passes (and is
/// replaced by the caller).
fn guard_new_request(existing: Option<&Connection>) -> AppResult<()> {
    match existing.map(|c| c.status) {
        Some(ConnectionStatus::Accepted) => {
            Err(AppError::conflict("Users are already connected"))
        }
        Some(ConnectionStatus::Pending) => {
            Err(AppError::conflict("A connection request is already pending"))
        }
        Some(ConnectionStatus::Blocked) => {
            Err(AppError::conflict("Connections are blocked between these users"))
        }
        Some(ConnectionStatus::Rejected) | None => Ok(()),
    }
}

fn guard_accept(connection: &Connection, actor_id: Uuid) -> AppResult<()> {
    if connection.target_id != actor_id {
        return Err(AppError::forbidden(
            "Only the request recipient can accept it",
        ));
    }
    if connection.status != ConnectionStatus::Pending {
        return Err(AppError::conflict("Connection request is not pending"));
    }
    Ok(())
}

fn guard_reject(connection: &Connection, actor_id: Uuid) -> AppResult<()> {
    if connection.target_id != actor_id {
        return Err(AppError::forbidden(
            "Only the request recipient can reject it",
        ));
    }
    if connection.status != ConnectionStatus::Pending {
        return Err(AppError::conflict("Connection request is not pending"));
    }
    Ok(())
}

fn guard_cancel(connection: &Connection, actor_id: Uuid) -> AppResult<()> {
    if connection.requester_id != actor_id {
        return Err(AppError::forbidden("Only the requester can cancel it"));
    }
    if connection.status != ConnectionStatus::Pending {
        return Err(AppError::conflict("Connection request is not pending"));
    }
    Ok(())
}

fn guard_remove(connection: &Connection, actor_id: Uuid) -> AppResult<()> {
    if !connection.involves(actor_id) {
        return Err(AppError::forbidden(
            "You are not a party to this connection",
        ));
    }
    if connection.status != ConnectionStatus::Accepted {
        return Err(AppError::conflict("Connection is not accepted"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vetlink_core::error::ErrorKind;

    fn connection(requester: Uuid, target: Uuid, status: ConnectionStatus) -> Connection {
        Connection {
            id: Uuid::new_v4(),
            requester_id: requester,
            target_id: target,
            status,
            message: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            responded_at: None,
        }
    }

    #[test]
    fn test_self_request_conflicts() {
        let id = Uuid::new_v4();
        let err = guard_not_self(id, id).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(guard_not_self(id, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_new_request_distinct_conflict_messages() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let accepted = connection(a, b, ConnectionStatus::Accepted);
        let err = guard_new_request(Some(&accepted)).unwrap_err();
        assert!(err.message.contains("already connected"));

        let pending = connection(a, b, ConnectionStatus::Pending);
        let err = guard_new_request(Some(&pending)).unwrap_err();
        assert!(err.message.contains("already pending"));

        let blocked = connection(a, b, ConnectionStatus::Blocked);
        let err = guard_new_request(Some(&blocked)).unwrap_err();
        assert!(err.message.contains("blocked"));
    }

    #[test]
    fn test_new_request_allowed_after_rejection() {
        let rejected = connection(Uuid::new_v4(), Uuid::new_v4(), ConnectionStatus::Rejected);
        assert!(guard_new_request(Some(&rejected)).is_ok());
        assert!(guard_new_request(None).is_ok());
    }

    #[test]
    fn test_accept_requires_target_on_pending() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let pending = connection(a, b, ConnectionStatus::Pending);

        assert!(guard_accept(&pending, b).is_ok());
        assert_eq!(
            guard_accept(&pending, a).unwrap_err().kind,
            ErrorKind::Forbidden
        );

        let accepted = connection(a, b, ConnectionStatus::Accepted);
        assert_eq!(
            guard_accept(&accepted, b).unwrap_err().kind,
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_cancel_requires_requester_on_pending() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let pending = connection(a, b, ConnectionStatus::Pending);

        assert!(guard_cancel(&pending, a).is_ok());
        assert_eq!(
            guard_cancel(&pending, b).unwrap_err().kind,
            ErrorKind::Forbidden
        );

        let accepted = connection(a, b, ConnectionStatus::Accepted);
        assert_eq!(
            guard_cancel(&accepted, a).unwrap_err().kind,
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_remove_requires_either_party_on_accepted() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let accepted = connection(a, b, ConnectionStatus::Accepted);

        assert!(guard_remove(&accepted, a).is_ok());
        assert!(guard_remove(&accepted, b).is_ok());
        assert_eq!(
            guard_remove(&accepted, Uuid::new_v4()).unwrap_err().kind,
            ErrorKind::Forbidden
        );

        let pending = connection(a, b, ConnectionStatus::Pending);
        assert_eq!(
            guard_remove(&pending, a).unwrap_err().kind,
            ErrorKind::Conflict
        );
    }
}
