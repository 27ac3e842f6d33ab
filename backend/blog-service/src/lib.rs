/// Blog Service Library
///
/// Multi-tenant blogging platform backend: role-scoped session tokens
/// over posts, categories, tags, comments, likes, media attachments, and
/// notifications, with a WebSocket broadcast side channel.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for platform entities
/// - `services`: Policy-enforcing business logic layer
/// - `db`: Database access layer and repositories
/// - `middleware`: HTTP middleware for bearer-token authentication
/// - `websocket`: Broadcast hub and subscriber sessions
/// - `storage`: File storage collaborator for media uploads
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod services;
pub mod storage;
pub mod websocket;

pub use config::Config;
pub use error::{AppError, Result};
