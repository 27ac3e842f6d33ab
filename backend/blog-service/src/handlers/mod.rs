//! HTTP request handlers
//!
//! Handlers stay thin: parse and validate the request, resolve the
//! caller from the validated claims, call the service, map the result.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod health;
pub mod likes;
pub mod media;
pub mod notifications;
pub mod posts;
pub mod tags;

pub use auth::*;
pub use categories::*;
pub use comments::*;
pub use health::*;
pub use likes::*;
pub use media::*;
pub use notifications::*;
pub use posts::*;
pub use tags::*;
