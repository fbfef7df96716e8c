use log::*;
use sqlx::migrate;

use crate::SqliteDatabase;

/// A fresh in-memory database with the schema applied. Every call returns a fully isolated store.
///
/// The pool is capped at a single connection, since each connection to `sqlite::memory:` would otherwise see its
/// own empty database.
pub async fn new_test_database() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let db = SqliteDatabase::new_with_url("sqlite::memory:", 1).await.expect("Error creating in-memory database");
    migrate!("./migrations").run(db.pool()).await.expect("Error running DB migrations");
    debug!("🚀️ Test database ready");
    db
}
