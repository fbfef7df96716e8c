//! SQLite backend for the pet portrait engine.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
