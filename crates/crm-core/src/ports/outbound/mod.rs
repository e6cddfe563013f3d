//! Outbound ports
//!
//! Interfaces the infrastructure must implement: one repository per
//! aggregate, the event publisher and the website prober. Repository
//! `update` is version-checked: the caller passes the aggregate it read
//! (already revised, version bumped) and the store refuses the write when
//! its copy has moved on.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregates::{Campaign, Contract, Customer, Lead, Product, PromotionChannel};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::{Email, EntityId, Phone};

/// Product repository port
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Product>, RepositoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError>;

    /// Products visible in listings (archived ones are filtered out)
    async fn find_active(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError>;

    async fn update(&self, product: &Product) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}

/// Campaign repository port
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Campaign>, RepositoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Campaign>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Campaign>, RepositoryError>;

    async fn insert(&self, campaign: &Campaign) -> Result<(), RepositoryError>;

    async fn update(&self, campaign: &Campaign) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}

/// Lead repository port
#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Lead>, RepositoryError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<Lead>, RepositoryError>;

    async fn find_by_phone(&self, phone: &Phone) -> Result<Option<Lead>, RepositoryError>;

    async fn find_by_campaign(&self, campaign_id: &EntityId) -> Result<Vec<Lead>, RepositoryError>;

    async fn insert(&self, lead: &Lead) -> Result<(), RepositoryError>;

    async fn update(&self, lead: &Lead) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}

/// Customer repository port
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Customer>, RepositoryError>;

    async fn find_by_lead(&self, lead_id: &EntityId) -> Result<Option<Customer>, RepositoryError>;

    /// Customers converted from any of the given leads
    async fn find_by_leads(&self, lead_ids: &[EntityId]) -> Result<Vec<Customer>, RepositoryError>;

    async fn insert(&self, customer: &Customer) -> Result<(), RepositoryError>;

    async fn update(&self, customer: &Customer) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}

/// Contract repository port
#[async_trait]
pub trait ContractRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Contract>, RepositoryError>;

    async fn find_by_product(
        &self,
        product_id: &EntityId,
    ) -> Result<Option<Contract>, RepositoryError>;

    async fn insert(&self, contract: &Contract) -> Result<(), RepositoryError>;

    async fn update(&self, contract: &Contract) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}

/// Promotion channel repository port
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<PromotionChannel>, RepositoryError>;

    async fn find_by_name(&self, name: &str)
        -> Result<Option<PromotionChannel>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<PromotionChannel>, RepositoryError>;

    async fn insert(&self, channel: &PromotionChannel) -> Result<(), RepositoryError>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError>;
}

/// Outbound HTTP check for campaign websites
///
/// One GET with a 5-second timeout; implementations return the status code
/// or the network error as text. No retries.
#[async_trait]
pub trait WebsiteProber: Send + Sync {
    async fn probe(&self, url: &str) -> Result<u16, ProbeError>;
}

#[derive(Error, Debug, Clone)]
pub enum ProbeError {
    #[error("The site is unavailable: {0}")]
    Network(String),
}

/// Repository error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Stale write: the record changed since it was read")]
    VersionConflict,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),
}
