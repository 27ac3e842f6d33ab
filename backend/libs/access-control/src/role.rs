//! Role names and role sets

use serde::{Deserialize, Serialize};

/// Platform roles, as seeded in the credential store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Author,
    Moderator,
    User,
}

impl Role {
    /// Canonical lowercase name, as stored and as carried in tokens
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Author => "author",
            Role::Moderator => "moderator",
            Role::User => "user",
        }
    }

    /// Parse a role name, case-insensitively
    pub fn parse(name: &str) -> Option<Role> {
        match name.to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "author" => Some(Role::Author),
            "moderator" => Some(Role::Moderator),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    /// All roles, in seeding order
    pub fn all() -> &'static [Role] {
        &[Role::Admin, Role::Author, Role::Moderator, Role::User]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller's set of roles, deduplicated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut set = RoleSet::default();
        for role in roles {
            set.insert(role);
        }
        set
    }

    /// Build a role set from role names, ignoring any unrecognized name
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self::from_roles(names.iter().filter_map(|n| Role::parse(n.as_ref())))
    }

    pub fn insert(&mut self, role: Role) {
        if !self.0.contains(&role) {
            self.0.push(role);
        }
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Whether this set shares at least one role with `other`
    pub fn intersects(&self, other: &[Role]) -> bool {
        self.0.iter().any(|r| other.contains(r))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    /// Role names in canonical form, for embedding in a token
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|r| r.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("MODERATOR"), Some(Role::Moderator));
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn from_names_skips_unknown() {
        let set = RoleSet::from_names(&["author", "wizard", "user"]);
        assert!(set.contains(Role::Author));
        assert!(set.contains(Role::User));
        assert!(!set.contains(Role::Admin));
    }

    #[test]
    fn insert_deduplicates() {
        let set = RoleSet::from_names(&["user", "User", "USER"]);
        assert_eq!(set.names(), vec!["user".to_string()]);
    }

    #[test]
    fn names_round_trip() {
        let set = RoleSet::from_roles([Role::Admin, Role::Author]);
        assert_eq!(set.names(), vec!["admin".to_string(), "author".to_string()]);
        assert_eq!(RoleSet::from_names(&set.names()), set);
    }
}
