//! Role- and ownership-based access control
//!
//! One declarative policy table plus one shared evaluator. Every resource
//! service consults `authorize` before a mutation or single-item read and
//! `list_scope` before a collection read; the evaluator itself is a pure
//! function of the caller's claims and the target, holds no state, and
//! needs no locking.
//!
//! Evaluation order:
//! 1. the caller's role set must intersect the resource's required-role
//!    set, otherwise the operation is denied outright;
//! 2. for ownership-scoped resources, an elevated role bypasses the
//!    ownership check; otherwise the caller must own the target;
//! 3. shared reference resources (categories, tags) are writable by any
//!    caller holding the required role; their reads are scoped instead
//!    of denied;
//! 4. collection reads are scoped at the query boundary: elevated
//!    callers see everything, everyone else sees only rows they own.
//!
//! Whether a denied single-item access reads as "not found" or
//! "forbidden" is decided by the resource's visibility class: rows the
//! caller could never see must not leak their existence.

pub mod role;

pub use role::{Role, RoleSet};

use uuid::Uuid;

/// Resource types governed by the policy table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Post,
    Category,
    Tag,
    Comment,
    Like,
    Media,
    Notification,
}

/// Operations evaluated against the policy table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    List,
    Update,
    Delete,
}

/// Ownership of the target entity, as seen by the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The entity is owned by exactly one identity
    Owned(Uuid),
    /// Shared reference data with no single owner
    Shared,
}

/// Why an operation was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The caller's role set does not intersect the required-role set
    MissingRole,
    /// The caller holds the required role but does not own the target
    NotOwner,
}

/// Outcome of a policy evaluation
///
/// A denial is a result, not an exception; the resource service maps it
/// to the appropriate boundary response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Row filter for collection reads, applied at the query boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Unfiltered: the caller sees every row
    All,
    /// The caller sees only rows owned by this identity (directly, or
    /// transitively through an owned post for shared reference data)
    Owner(Uuid),
}

/// How reads of a resource behave for callers who do not own the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only the owner (and elevated roles) can see the row at all;
    /// everyone else gets "not found", never "forbidden"
    OwnerOnly,
    /// Any caller holding the required role can see the row; an
    /// ownership denial on mutation reads as "forbidden"
    AnyRole,
    /// Visible to a non-elevated caller only through at least one owned
    /// post (categories, tags)
    ThroughOwnedPosts,
}

/// Roles that may touch the resource at all
pub fn required_roles(resource: Resource) -> &'static [Role] {
    match resource {
        Resource::Post | Resource::Category | Resource::Tag | Resource::Media => {
            &[Role::Admin, Role::Author]
        }
        Resource::Comment | Resource::Like | Resource::Notification => {
            &[Role::Admin, Role::Author, Role::Moderator, Role::User]
        }
    }
}

/// Roles that bypass the ownership check for the resource
pub fn elevated_roles(resource: Resource) -> &'static [Role] {
    match resource {
        Resource::Post | Resource::Category | Resource::Tag | Resource::Media => &[Role::Admin],
        Resource::Comment => &[Role::Admin, Role::Moderator],
        // Only the owner may remove their own like; only the recipient
        // may acknowledge their own notification.
        Resource::Like | Resource::Notification => &[],
    }
}

/// Visibility class for non-owner reads
pub fn visibility(resource: Resource) -> Visibility {
    match resource {
        Resource::Post | Resource::Media | Resource::Notification => Visibility::OwnerOnly,
        Resource::Comment | Resource::Like => Visibility::AnyRole,
        Resource::Category | Resource::Tag => Visibility::ThroughOwnedPosts,
    }
}

/// Whether the caller's role set bypasses ownership checks for the resource
pub fn is_elevated(roles: &RoleSet, resource: Resource) -> bool {
    roles.intersects(elevated_roles(resource))
}

/// Evaluate whether the caller may perform `action` on the target
pub fn authorize(
    roles: &RoleSet,
    action: Action,
    resource: Resource,
    ownership: Ownership,
    caller: Uuid,
) -> Decision {
    if !roles.intersects(required_roles(resource)) {
        return Decision::Deny(DenyReason::MissingRole);
    }

    match ownership {
        Ownership::Shared => Decision::Allow,
        Ownership::Owned(owner) => {
            if is_elevated(roles, resource) || owner == caller {
                Decision::Allow
            } else {
                // Reads of any-role-visible resources stay allowed; the
                // ownership gate only bites on mutation.
                match (action, visibility(resource)) {
                    (Action::Read | Action::List, Visibility::AnyRole) => Decision::Allow,
                    _ => Decision::Deny(DenyReason::NotOwner),
                }
            }
        }
    }
}

/// Row filter for a collection read
///
/// Scoping happens before any status/category/search filter and must be
/// pushed into the query itself, never applied by post-filtering.
pub fn list_scope(roles: &RoleSet, resource: Resource, caller: Uuid) -> Scope {
    if is_elevated(roles, resource) {
        Scope::All
    } else {
        Scope::Owner(caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[Role]) -> RoleSet {
        RoleSet::from_roles(names.iter().copied())
    }

    #[test]
    fn role_gate_denies_outsiders() {
        let caller = Uuid::new_v4();
        // A plain user cannot touch posts, categories, tags, or media at all.
        for resource in [Resource::Post, Resource::Category, Resource::Tag, Resource::Media] {
            for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
                assert_eq!(
                    authorize(&roles(&[Role::User]), action, resource, Ownership::Owned(caller), caller),
                    Decision::Deny(DenyReason::MissingRole),
                    "user role must not pass the gate for {:?} {:?}",
                    resource,
                    action,
                );
            }
        }
    }

    #[test]
    fn empty_role_set_is_denied_everywhere() {
        let caller = Uuid::new_v4();
        for resource in [
            Resource::Post,
            Resource::Category,
            Resource::Tag,
            Resource::Comment,
            Resource::Like,
            Resource::Media,
            Resource::Notification,
        ] {
            assert_eq!(
                authorize(&RoleSet::default(), Action::Read, resource, Ownership::Owned(caller), caller),
                Decision::Deny(DenyReason::MissingRole),
            );
        }
    }

    #[test]
    fn owner_may_operate_on_own_post() {
        let caller = Uuid::new_v4();
        let set = roles(&[Role::Author]);
        for action in [Action::Read, Action::Update, Action::Delete] {
            assert_eq!(
                authorize(&set, action, Resource::Post, Ownership::Owned(caller), caller),
                Decision::Allow,
            );
        }
    }

    #[test]
    fn draft_post_hidden_from_other_author() {
        // Author A's draft post; author B is not the owner.
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let set = roles(&[Role::Author]);

        assert_eq!(
            authorize(&set, Action::Read, Resource::Post, Ownership::Owned(owner), other),
            Decision::Deny(DenyReason::NotOwner),
        );
        // Posts are owner-only: the denial must surface as "not found".
        assert_eq!(visibility(Resource::Post), Visibility::OwnerOnly);
    }

    #[test]
    fn admin_bypasses_post_ownership() {
        let owner = Uuid::new_v4();
        let admin = Uuid::new_v4();
        let set = roles(&[Role::Admin]);
        for action in [Action::Read, Action::Update, Action::Delete] {
            assert_eq!(
                authorize(&set, action, Resource::Post, Ownership::Owned(owner), admin),
                Decision::Allow,
            );
        }
    }

    #[test]
    fn moderator_does_not_bypass_post_ownership() {
        let owner = Uuid::new_v4();
        let moderator = Uuid::new_v4();
        // Moderator alone lacks the post required-role set entirely.
        assert_eq!(
            authorize(&roles(&[Role::Moderator]), Action::Delete, Resource::Post, Ownership::Owned(owner), moderator),
            Decision::Deny(DenyReason::MissingRole),
        );
    }

    #[test]
    fn anyone_with_a_role_may_read_comments() {
        let author = Uuid::new_v4();
        let reader = Uuid::new_v4();
        assert_eq!(
            authorize(&roles(&[Role::User]), Action::Read, Resource::Comment, Ownership::Owned(author), reader),
            Decision::Allow,
        );
    }

    #[test]
    fn comment_mutation_needs_ownership_or_elevation() {
        let author = Uuid::new_v4();
        let other = Uuid::new_v4();

        // A plain user cannot delete someone else's comment...
        assert_eq!(
            authorize(&roles(&[Role::User]), Action::Delete, Resource::Comment, Ownership::Owned(author), other),
            Decision::Deny(DenyReason::NotOwner),
        );
        // ...but a moderator may.
        assert_eq!(
            authorize(&roles(&[Role::Moderator]), Action::Delete, Resource::Comment, Ownership::Owned(author), other),
            Decision::Allow,
        );
        // Comments are visible to everyone, so the denial reads as forbidden.
        assert_eq!(visibility(Resource::Comment), Visibility::AnyRole);
    }

    #[test]
    fn nobody_bypasses_like_ownership() {
        let liker = Uuid::new_v4();
        let admin = Uuid::new_v4();
        assert_eq!(
            authorize(&roles(&[Role::Admin]), Action::Delete, Resource::Like, Ownership::Owned(liker), admin),
            Decision::Deny(DenyReason::NotOwner),
        );
        assert_eq!(
            authorize(&roles(&[Role::User]), Action::Delete, Resource::Like, Ownership::Owned(liker), liker),
            Decision::Allow,
        );
    }

    #[test]
    fn notifications_belong_to_their_recipient_only() {
        let recipient = Uuid::new_v4();
        let admin = Uuid::new_v4();
        assert_eq!(
            authorize(&roles(&[Role::Admin]), Action::Update, Resource::Notification, Ownership::Owned(recipient), admin),
            Decision::Deny(DenyReason::NotOwner),
        );
        assert_eq!(
            authorize(&roles(&[Role::User]), Action::Update, Resource::Notification, Ownership::Owned(recipient), recipient),
            Decision::Allow,
        );
    }

    #[test]
    fn shared_resources_writable_by_required_roles() {
        let caller = Uuid::new_v4();
        assert_eq!(
            authorize(&roles(&[Role::Author]), Action::Create, Resource::Category, Ownership::Shared, caller),
            Decision::Allow,
        );
        assert_eq!(
            authorize(&roles(&[Role::Moderator]), Action::Create, Resource::Category, Ownership::Shared, caller),
            Decision::Deny(DenyReason::MissingRole),
        );
    }

    #[test]
    fn list_scope_elevated_sees_all() {
        let caller = Uuid::new_v4();
        assert_eq!(list_scope(&roles(&[Role::Admin]), Resource::Post, caller), Scope::All);
        assert_eq!(
            list_scope(&roles(&[Role::Author]), Resource::Post, caller),
            Scope::Owner(caller),
        );
        assert_eq!(
            list_scope(&roles(&[Role::Author]), Resource::Category, caller),
            Scope::Owner(caller),
        );
        assert_eq!(
            list_scope(&roles(&[Role::Admin, Role::User]), Resource::Category, caller),
            Scope::All,
        );
    }

    #[test]
    fn multi_role_caller_uses_strongest_role() {
        let owner = Uuid::new_v4();
        let caller = Uuid::new_v4();
        let set = roles(&[Role::User, Role::Admin]);
        assert_eq!(
            authorize(&set, Action::Update, Resource::Post, Ownership::Owned(owner), caller),
            Decision::Allow,
        );
    }

    #[test]
    fn media_follows_post_ownership_with_admin_bypass() {
        let post_owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert_eq!(
            authorize(&roles(&[Role::Author]), Action::Create, Resource::Media, Ownership::Owned(post_owner), other),
            Decision::Deny(DenyReason::NotOwner),
        );
        assert_eq!(
            authorize(&roles(&[Role::Admin]), Action::Create, Resource::Media, Ownership::Owned(post_owner), other),
            Decision::Allow,
        );
    }
}
