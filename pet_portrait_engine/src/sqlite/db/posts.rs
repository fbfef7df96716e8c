use sqlx::SqliteConnection;

use crate::db_types::{NewPost, Post};

pub async fn fetch_posts(include_unpublished: bool, conn: &mut SqliteConnection) -> Result<Vec<Post>, sqlx::Error> {
    let posts = if include_unpublished {
        sqlx::query_as("SELECT * FROM posts ORDER BY created_at DESC, id DESC").fetch_all(conn).await?
    } else {
        sqlx::query_as("SELECT * FROM posts WHERE published = TRUE ORDER BY created_at DESC, id DESC")
            .fetch_all(conn)
            .await?
    };
    Ok(posts)
}

pub async fn fetch_post(post_id: i64, conn: &mut SqliteConnection) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as("SELECT * FROM posts WHERE id = $1").bind(post_id).fetch_optional(conn).await?;
    Ok(post)
}

pub async fn insert_post(post: NewPost, conn: &mut SqliteConnection) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as("INSERT INTO posts (slug, title, body, published) VALUES ($1, $2, $3, $4) RETURNING *")
        .bind(post.slug)
        .bind(post.title)
        .bind(post.body)
        .bind(post.published)
        .fetch_one(conn)
        .await?;
    Ok(post)
}

pub async fn update_post(post_id: i64, post: NewPost, conn: &mut SqliteConnection) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as(
        r#"
            UPDATE posts
            SET slug = $1, title = $2, body = $3, published = $4, updated_at = CURRENT_TIMESTAMP
            WHERE id = $5
            RETURNING *;
        "#,
    )
    .bind(post.slug)
    .bind(post.title)
    .bind(post.body)
    .bind(post.published)
    .bind(post_id)
    .fetch_optional(conn)
    .await?;
    Ok(post)
}

pub async fn delete_post(post_id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1").bind(post_id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}
