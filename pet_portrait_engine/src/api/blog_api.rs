use log::*;

use crate::{
    db_types::{NewPost, Post},
    traits::{BlogManagement, StorefrontApiError},
};

/// The lightweight blog behind the storefront's marketing pages.
pub struct BlogApi<B> {
    db: B,
}

impl<B: Clone> Clone for BlogApi<B> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone() }
    }
}

impl<B> BlogApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> BlogApi<B>
where B: BlogManagement
{
    /// Published posts, newest first. Admins can ask for drafts too.
    pub async fn posts(&self, include_unpublished: bool) -> Result<Vec<Post>, StorefrontApiError> {
        self.db.fetch_posts(include_unpublished).await
    }

    pub async fn post(&self, post_id: i64) -> Result<Option<Post>, StorefrontApiError> {
        self.db.fetch_post(post_id).await
    }

    pub async fn create_post(&self, post: NewPost) -> Result<Post, StorefrontApiError> {
        let post = self.db.insert_post(post).await?;
        info!("📝 Blog post [{}] created as #{}", post.slug, post.id);
        Ok(post)
    }

    pub async fn update_post(&self, post_id: i64, post: NewPost) -> Result<Post, StorefrontApiError> {
        let post = self.db.update_post(post_id, post).await?;
        info!("📝 Blog post #{} updated", post.id);
        Ok(post)
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete_post(&self, post_id: i64) -> Result<bool, StorefrontApiError> {
        let deleted = self.db.delete_post(post_id).await?;
        if deleted {
            info!("📝 Blog post #{post_id} deleted");
        }
        Ok(deleted)
    }
}
