use crate::{
    db_types::{NewPost, Post},
    traits::StorefrontApiError,
};

/// Persistence for the lightweight blog.
#[allow(async_fn_in_trait)]
pub trait BlogManagement: Clone {
    /// All posts, or only published ones, newest first.
    async fn fetch_posts(&self, include_unpublished: bool) -> Result<Vec<Post>, StorefrontApiError>;

    async fn fetch_post(&self, post_id: i64) -> Result<Option<Post>, StorefrontApiError>;

    async fn insert_post(&self, post: NewPost) -> Result<Post, StorefrontApiError>;

    async fn update_post(&self, post_id: i64, post: NewPost) -> Result<Post, StorefrontApiError>;

    /// Returns `true` if a row was deleted.
    async fn delete_post(&self, post_id: i64) -> Result<bool, StorefrontApiError>;
}
