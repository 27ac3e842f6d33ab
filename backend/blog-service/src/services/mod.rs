//! Business logic layer
//!
//! Every service receives the caller's validated identity as an explicit
//! argument, consults the access-control evaluator before any read or
//! mutation, and only then touches the repositories. A denial maps to a
//! boundary error here; no data-store mutation happens on a deny.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod likes;
pub mod media;
pub mod notifications;
pub mod posts;
pub mod tags;

pub use auth::AuthService;
pub use categories::CategoryService;
pub use comments::CommentService;
pub use likes::LikeService;
pub use media::MediaService;
pub use notifications::NotificationService;
pub use posts::{NewPost, PostService};
pub use tags::TagService;

use crate::error::AppError;
use access_control::{visibility, DenyReason, Resource, Visibility};

/// Map a policy denial to the boundary error for the resource
///
/// Rows the caller could never see surface as "not found" so their
/// existence does not leak; rows the caller can see but not edit surface
/// as "forbidden".
pub(crate) fn deny_error(reason: DenyReason, resource: Resource, what: &str) -> AppError {
    match reason {
        DenyReason::MissingRole => {
            AppError::Forbidden(format!("insufficient role to access {what}"))
        }
        DenyReason::NotOwner => match visibility(resource) {
            Visibility::OwnerOnly | Visibility::ThroughOwnedPosts => {
                AppError::NotFound(format!("{what} not found"))
            }
            Visibility::AnyRole => AppError::Forbidden(format!("you do not own this {what}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn missing_role_is_forbidden() {
        let err = deny_error(DenyReason::MissingRole, Resource::Post, "post");
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn foreign_post_reads_as_not_found() {
        // Posts are invisible outside their owner's scope; the denial
        // must not reveal that the row exists.
        let err = deny_error(DenyReason::NotOwner, Resource::Post, "post");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn foreign_comment_reads_as_forbidden() {
        // Comments are visible to every role, so an ownership denial is
        // an explicit forbidden, not a 404.
        let err = deny_error(DenyReason::NotOwner, Resource::Comment, "comment");
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn foreign_notification_reads_as_not_found() {
        let err = deny_error(DenyReason::NotOwner, Resource::Notification, "notification");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
