//! Domain entities - the core business objects.

mod feed;
mod post;

pub use feed::{FeedConfig, FeedOrdering, Page, PageRequest, SortDirection, SortField};
pub use post::{FieldValue, NewPost, Post, PostChanges, PostDraft};
