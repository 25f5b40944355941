//! Post resource service - the create/read/update/delete/feed/like contract.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::domain::{FeedConfig, NewPost, Page, Post, PostChanges, PostDraft};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Current like state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeState {
    pub id: i64,
    pub liked: bool,
}

impl LikeState {
    /// Confirmation message for the state just reached.
    pub fn message(&self) -> &'static str {
        if self.liked {
            "Post curtido!"
        } else {
            "Post descurtido!"
        }
    }
}

impl From<&Post> for LikeState {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            liked: post.liked,
        }
    }
}

/// Flat façade over a [`PostRepository`].
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, changes: PostChanges) -> Result<Post, DomainError> {
        let draft = PostDraft::from_changes(changes).map_err(DomainError::Validation)?;
        let post = self.repo.create(NewPost::new(draft)).await?;

        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    #[instrument(skip(self))]
    pub async fn retrieve(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Partial update: only supplied fields change, and nothing is written
    /// unless the merged post passes validation.
    #[instrument(skip(self))]
    pub async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, DomainError> {
        let mut post = self.retrieve(id).await?;

        let draft = post
            .draft()
            .merge(changes)
            .map_err(DomainError::Validation)?;
        post.apply(draft);

        let post = self.repo.save(post).await.map_err(|e| not_found_or(e, id))?;

        tracing::info!(post_id = id, "Post updated");
        Ok(post)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete(id).await.map_err(|e| not_found_or(e, id))?;

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    /// All posts in the configured order, one page at a time.
    #[instrument(skip(self, config), fields(ordering = %config.ordering))]
    pub async fn list_feed(
        &self,
        page: Option<u64>,
        page_size: Option<u64>,
        config: &FeedConfig,
    ) -> Result<Page<Post>, DomainError> {
        let request = config.page_request(page, page_size)?;
        let result = self.repo.feed(request, config.ordering).await?;

        if result.page > result.num_pages() {
            return Err(DomainError::InvalidPage);
        }

        tracing::debug!(
            page = result.page,
            page_size = result.page_size,
            count = result.count,
            ordering = %config.ordering,
            "Feed page loaded"
        );
        Ok(result)
    }

    /// Invert the like flag. Read-flip-write with no locking: concurrent
    /// toggles on the same post may collapse into one.
    #[instrument(skip(self))]
    pub async fn toggle_like(&self, id: i64) -> Result<LikeState, DomainError> {
        let mut post = self.retrieve(id).await?;
        post.toggle_like();

        let post = self.repo.save(post).await.map_err(|e| not_found_or(e, id))?;
        let state = LikeState::from(&post);

        tracing::info!(post_id = id, liked = state.liked, "Post like toggled");
        Ok(state)
    }

    #[instrument(skip(self))]
    pub async fn like_status(&self, id: i64) -> Result<LikeState, DomainError> {
        let post = self.retrieve(id).await?;
        Ok(LikeState::from(&post))
    }
}

fn not_found_or(err: RepoError, id: i64) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => other.into(),
    }
}
