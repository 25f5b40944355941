use async_trait::async_trait;

use crate::domain::{FeedOrdering, NewPost, Page, PageRequest, Post};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist changes to an existing entity.
    ///
    /// Returns `RepoError::NotFound` when the entity no longer exists.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Insert a new post; the store assigns its id.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// One page of all posts in the given order, with the total count.
    async fn feed(
        &self,
        request: PageRequest,
        ordering: FeedOrdering,
    ) -> Result<Page<Post>, RepoError>;
}
