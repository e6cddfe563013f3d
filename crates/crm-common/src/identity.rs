//! Identity & group membership
//!
//! The CRM core never authenticates anyone; it only asks an identity store
//! who a user is and which groups they belong to.

use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// Identifier value object for users
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user as seen by the CRM core: identity plus the flags and group
/// memberships role gating needs. Authentication lives elsewhere.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    is_active: bool,
    is_superuser: bool,
    groups: HashSet<Role>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            is_active: true,
            is_superuser: false,
            groups: HashSet::new(),
        }
    }

    /// Grant a group membership (builder style)
    pub fn with_group(mut self, role: Role) -> Self {
        self.groups.insert(role);
        self
    }

    /// Mark as superuser (builder style)
    pub fn as_superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    /// Deactivate the account (builder style)
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    pub fn groups(&self) -> &HashSet<Role> {
        &self.groups
    }

    pub fn in_group(&self, role: Role) -> bool {
        self.groups.contains(&role)
    }
}

/// User directory port
///
/// Implemented by whatever user-management collaborator the deployment has.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Option<User>;
}

/// In-memory user directory (tests and single-process deployments)
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: DashMap<String, User>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        self.users.insert(user.id().as_str().to_string(), user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Option<User> {
        self.users.get(id.as_str()).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_directory_roundtrip() {
        let directory = InMemoryUserDirectory::new();
        let user = User::new("ivan").with_group(Role::Marketer);
        let id = user.id().clone();
        directory.insert(user);

        let found = directory.find_by_id(&id).await.unwrap();
        assert_eq!(found.username(), "ivan");
        assert!(found.in_group(Role::Marketer));
        assert!(!found.is_superuser());
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let directory = InMemoryUserDirectory::new();
        assert!(directory.find_by_id(&UserId::new()).await.is_none());
    }
}
