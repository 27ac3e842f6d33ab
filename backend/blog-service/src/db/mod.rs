//! Database access layer
//!
//! One repository module per entity. Repositories take the caller's
//! `Scope` where a read is ownership-scoped, so the filter is part of the
//! query itself rather than applied after the fact.

pub mod category_repo;
pub mod comment_repo;
pub mod like_repo;
pub mod media_repo;
pub mod notification_repo;
pub mod post_repo;
pub mod tag_repo;
pub mod user_repo;

use sqlx::migrate::Migrator;

/// Embedded schema migrations, run once at startup
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
