//! In-memory post repository - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use postboard_core::domain::{FeedOrdering, NewPost, Page, PageRequest, Post};
use postboard_core::error::RepoError;
use postboard_core::ports::{BaseRepository, PostRepository};

struct Store {
    posts: BTreeMap<i64, Post>,
    last_id: i64,
}

/// In-memory repository using a BTreeMap behind an async RwLock.
///
/// Ids come from a counter that only moves forward, so a deleted id is
/// never handed out again. Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                posts: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        match store.posts.get_mut(&post.id) {
            Some(existing) => {
                *existing = post.clone();
                Ok(post)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let post = new_post.into_post(store.last_id);
        store.posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn feed(
        &self,
        request: PageRequest,
        ordering: FeedOrdering,
    ) -> Result<Page<Post>, RepoError> {
        let store = self.store.read().await;

        let mut posts: Vec<&Post> = store.posts.values().collect();
        posts.sort_by(|a, b| ordering.compare(a, b));

        let results = posts
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.page_size as usize)
            .cloned()
            .collect();

        Ok(Page::new(results, store.posts.len() as u64, request))
    }
}
