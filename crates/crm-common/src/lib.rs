//! OpenCRM shared platform capabilities.
//!
//! Cross-cutting concerns consumed by the CRM bounded context:
//!
//! - **Identity**: users, group membership, the `UserDirectory` port
//! - **Role gating**: immutable service-to-role registry and the checker
//!   every mutating service consults
//! - **Moderation**: blocklist-backed word filter with a TTL cache

pub mod identity;
pub mod moderation;
pub mod roles;

pub use identity::{InMemoryUserDirectory, User, UserDirectory, UserId};
pub use moderation::{ModerationConfig, ModerationError, WordFilter};
pub use roles::{AccessError, Role, RoleChecker, RoleRegistry, ServiceName};
