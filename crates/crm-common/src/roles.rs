//! Role gating
//!
//! Every mutating CRM service is mapped to the group a user must belong to
//! before the service will persist anything. The mapping is an immutable
//! table injected at construction; superusers bypass it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::identity::{UserDirectory, UserId};

/// Groups a user can belong to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Administrator,
    Marketer,
    Operator,
    Manager,
}

impl Role {
    pub fn group_name(&self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Marketer => "marketer",
            Self::Operator => "operator",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.group_name())
    }
}

/// Logical names of the role-gated services
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceName {
    Product,
    Campaign,
    Lead,
    Contract,
    Customer,
}

impl ServiceName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "ProductService",
            Self::Campaign => "CampaignService",
            Self::Lead => "LeadService",
            Self::Contract => "ContractService",
            Self::Customer => "CustomerService",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Access failures surfaced by the role checker
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("No role defined for this service.")]
    NoRoleDefined,

    #[error("The user must be a member of the '{required}' group or an admin.")]
    PermissionDenied { required: Role },

    #[error("The creator must be an active user.")]
    InactiveUser,

    #[error("Unknown user: {0}")]
    UnknownUser(UserId),
}

/// Immutable service-to-role table
#[derive(Clone, Debug)]
pub struct RoleRegistry {
    roles: HashMap<ServiceName, Role>,
}

impl RoleRegistry {
    /// The standard mapping the CRM ships with
    pub fn standard() -> Self {
        let roles = HashMap::from([
            (ServiceName::Campaign, Role::Marketer),
            (ServiceName::Product, Role::Marketer),
            (ServiceName::Lead, Role::Operator),
            (ServiceName::Contract, Role::Manager),
            (ServiceName::Customer, Role::Manager),
        ]);
        Self { roles }
    }

    /// Build a custom mapping (deployments with renamed groups)
    pub fn from_entries(entries: impl IntoIterator<Item = (ServiceName, Role)>) -> Self {
        Self {
            roles: entries.into_iter().collect(),
        }
    }

    pub fn required_role(&self, service: ServiceName) -> Result<Role, AccessError> {
        self.roles
            .get(&service)
            .copied()
            .ok_or(AccessError::NoRoleDefined)
    }
}

/// Gate that every mutating service consults before persisting
///
/// Pure lookup plus a membership check against the user directory; holds no
/// mutable state.
pub struct RoleChecker {
    registry: RoleRegistry,
    directory: Arc<dyn UserDirectory>,
}

impl RoleChecker {
    pub fn new(registry: RoleRegistry, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            registry,
            directory,
        }
    }

    /// Check that the acting user may call the given service.
    ///
    /// Passes when the user is active and is either a superuser or a member
    /// of the group the registry requires. Returns the resolved user so
    /// callers can inspect superuser status for their own rules.
    pub async fn check(
        &self,
        user_id: &UserId,
        service: ServiceName,
    ) -> Result<crate::identity::User, AccessError> {
        let user = self
            .directory
            .find_by_id(user_id)
            .await
            .ok_or_else(|| AccessError::UnknownUser(user_id.clone()))?;

        if !user.is_active() {
            return Err(AccessError::InactiveUser);
        }

        let required = self.registry.required_role(service)?;
        if user.is_superuser() || user.in_group(required) {
            Ok(user)
        } else {
            warn!(
                user = user.username(),
                service = service.as_str(),
                required = required.group_name(),
                "access denied"
            );
            Err(AccessError::PermissionDenied { required })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{InMemoryUserDirectory, User};

    fn checker_with(user: &User) -> RoleChecker {
        let directory = InMemoryUserDirectory::new();
        directory.insert(user.clone());
        RoleChecker::new(RoleRegistry::standard(), Arc::new(directory))
    }

    #[tokio::test]
    async fn test_member_of_required_group_passes() {
        let user = User::new("marketer").with_group(Role::Marketer);
        let checker = checker_with(&user);

        assert!(checker.check(user.id(), ServiceName::Product).await.is_ok());
        assert!(checker
            .check(user.id(), ServiceName::Campaign)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_wrong_group_is_denied() {
        let user = User::new("operator").with_group(Role::Operator);
        let checker = checker_with(&user);

        let err = checker
            .check(user.id(), ServiceName::Contract)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AccessError::PermissionDenied {
                required: Role::Manager
            }
        );
    }

    #[tokio::test]
    async fn test_superuser_bypasses_groups() {
        let user = User::new("root").as_superuser();
        let checker = checker_with(&user);

        for service in [
            ServiceName::Product,
            ServiceName::Campaign,
            ServiceName::Lead,
            ServiceName::Contract,
            ServiceName::Customer,
        ] {
            assert!(checker.check(user.id(), service).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_inactive_user_is_rejected() {
        let user = User::new("gone").with_group(Role::Manager).deactivated();
        let checker = checker_with(&user);

        let err = checker
            .check(user.id(), ServiceName::Customer)
            .await
            .unwrap_err();
        assert_eq!(err, AccessError::InactiveUser);
    }

    #[tokio::test]
    async fn test_unknown_user_is_rejected() {
        let user = User::new("someone");
        let checker = checker_with(&user);

        let missing = UserId::new();
        let err = checker
            .check(&missing, ServiceName::Lead)
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::UnknownUser(_)));
    }

    #[test]
    fn test_registry_standard_mapping() {
        let registry = RoleRegistry::standard();
        assert_eq!(
            registry.required_role(ServiceName::Product).unwrap(),
            Role::Marketer
        );
        assert_eq!(
            registry.required_role(ServiceName::Lead).unwrap(),
            Role::Operator
        );
        assert_eq!(
            registry.required_role(ServiceName::Customer).unwrap(),
            Role::Manager
        );
    }

    #[test]
    fn test_registry_missing_entry() {
        let registry = RoleRegistry::from_entries([(ServiceName::Product, Role::Marketer)]);
        assert_eq!(
            registry.required_role(ServiceName::Lead).unwrap_err(),
            AccessError::NoRoleDefined
        );
    }
}
