//! Feed posts with like/comment engagement feeding the notification
//! emitter.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use vetlink_core::error::AppError;
use vetlink_core::result::AppResult;
use vetlink_core::types::pagination::{PageRequest, PageResponse};
use vetlink_database::repositories::post::PostRepository;
use vetlink_database::repositories::user::UserRepository;
use vetlink_entity::post::model::{CreatePost, PostFilter};
use vetlink_entity::post::{Post, PostComment};

use crate::context::RequestContext;
use crate::notification::{NotificationEmitter, NotificationEvent};

/// Manages feed posts and their engagement.
#[derive(Debug, Clone)]
pub struct PostService {
    /// Post repository.
    post_repo: Arc<PostRepository>,
    /// User repository, for actor display names.
    user_repo: Arc<UserRepository>,
    /// Fire-and-forget notification emitter.
    emitter: Arc<NotificationEmitter>,
}

impl PostService {
    /// Create a new post service.
    pub fn new(
        post_repo: Arc<PostRepository>,
        user_repo: Arc<UserRepository>,
        emitter: Arc<NotificationEmitter>,
    ) -> Self {
        Self {
            post_repo,
            user_repo,
            emitter,
        }
    }

    /// Create a new post authored by the current user.
    pub async fn create_post(&self, ctx: &RequestContext, data: CreatePost) -> AppResult<Post> {
        let post = self.post_repo.create(ctx.user_id, &data).await?;
        info!(post_id = %post.id, author_id = %ctx.user_id, "Post created");
        Ok(post)
    }

    /// Fetch a post by ID.
    pub async fn get_post(&self, post_id: Uuid) -> AppResult<Post> {
        self.require_post(post_id).await
    }

    /// List posts newest first, optionally scoped to one author.
    pub async fn list_posts(
        &self,
        filter: PostFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<Post>> {
        self.post_repo.find_recent(&filter, &page).await
    }

    /// Like a post as the current user. Liking twice conflicts.
    ///
    /// Notifies the author unless they liked their own post.
    pub async fn like_post(&self, ctx: &RequestContext, post_id: Uuid) -> AppResult<()> {
        let post = self.require_post(post_id).await?;
        self.post_repo.like(post_id, ctx.user_id).await?;

        if post.author_id != ctx.user_id {
            if let Some(actor) = self.user_repo.find_by_id(ctx.user_id).await? {
                self.emitter
                    .emit(NotificationEvent::PostLiked {
                        recipient_id: post.author_id,
                        actor_id: ctx.user_id,
                        actor_name: actor.display_name(),
                        post_id,
                    })
                    .await;
            }
        }
        Ok(())
    }

    /// Comment on a post as the current user.
    ///
    /// Notifies the author unless they commented on their own post.
    pub async fn add_comment(
        &self,
        ctx: &RequestContext,
        post_id: Uuid,
        content: String,
    ) -> AppResult<PostComment> {
        let post = self.require_post(post_id).await?;
        let comment = self
            .post_repo
            .add_comment(post_id, ctx.user_id, &content)
            .await?;

        if post.author_id != ctx.user_id {
            if let Some(actor) = self.user_repo.find_by_id(ctx.user_id).await? {
                self.emitter
                    .emit(NotificationEvent::PostCommented {
                        recipient_id: post.author_id,
                        actor_id: ctx.user_id,
                        actor_name: actor.display_name(),
                        post_id,
                    })
                    .await;
            }
        }
        Ok(comment)
    }

    /// List comments on a post, oldest first.
    pub async fn list_comments(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<PostComment>> {
        self.post_repo.find_comments(post_id, &page).await
    }

    async fn require_post(&self, post_id: Uuid) -> AppResult<Post> {
        self.post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))
    }
}
