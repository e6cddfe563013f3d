//! OpenCRM Core (OCRM)
//!
//! Small-business CRM bounded context: marketing campaigns, leads,
//! conversion of leads into customers, service products and contracts,
//! with role-gated mutations and read-time aggregate statistics.
//!
//! ## Architecture
//!
//! - **Domain Layer**: aggregates, value objects, validation rules,
//!   domain events, derived-metric math
//! - **Application Layer**: per-entity command services and read-side
//!   queries, DTOs
//! - **Ports Layer**: hexagonal architecture interfaces
//! - **Infrastructure Layer**: in-memory persistence, outbound HTTP
//!
//! ## Key Aggregates
//!
//! - **Product**: the service being sold, with discount and lifecycle status
//! - **Campaign**: a marketing campaign generating leads, with budget,
//!   promotion channel and a live website
//! - **Lead** / **Customer**: a prospect and its one-to-one conversion
//! - **Contract**: the signed agreement backing a customer
//!
//! Every mutation runs permission check, field validation, cross-field
//! validation and external checks before anything is written; the first
//! failing rule aborts the call with a field-coded error.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

// Re-exports for convenience
pub use application::commands::{
    CampaignService, ContractService, CustomerService, LeadService, ProductService,
};
pub use application::queries::{CampaignAnalyticsService, StatisticsService};
pub use domain::aggregates::{
    Campaign, Contract, Country, Customer, Lead, Product, ProductStatus, PromotionChannel,
};
pub use domain::value_objects::{DocumentRef, Email, EntityId, Phone, Website};
pub use error::{CrmError, ValidationError};
pub use ports::outbound::RepositoryError;
