//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, Order, PaginatorTrait, QueryOrder};

use postboard_core::domain::{
    FeedOrdering, NewPost, Page, PageRequest, Post, SortDirection, SortField,
};
use postboard_core::error::RepoError;
use postboard_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = new_post.into();
        let model = active_model.insert(&self.db).await.map_err(repo_error)?;

        tracing::debug!(post_id = model.id, "Inserted post row");
        Ok(model.into())
    }

    async fn feed(
        &self,
        request: PageRequest,
        ordering: FeedOrdering,
    ) -> Result<Page<Post>, RepoError> {
        let order = match ordering.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };

        let mut query = PostEntity::find();
        if ordering.field == SortField::DataCriacao {
            query = query.order_by(post::Column::DataCriacao, order.clone());
        }
        let paginator = query
            .order_by(post::Column::Id, order)
            .paginate(&self.db, request.page_size);

        let count = paginator.num_items().await.map_err(repo_error)?;
        let rows = paginator
            .fetch_page(request.page - 1)
            .await
            .map_err(repo_error)?;

        tracing::debug!(
            page = request.page,
            page_size = request.page_size,
            rows = rows.len(),
            "Fetched feed page"
        );

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            count,
            request,
        ))
    }
}
