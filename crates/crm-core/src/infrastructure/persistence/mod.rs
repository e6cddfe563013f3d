//! In-memory repository implementations
//!
//! `RwLock<HashMap>` stores for tests and single-process deployments. The
//! lock scope of `insert`/`update` is the transaction boundary: uniqueness
//! and version checks happen under the same write lock as the write itself.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::aggregates::{Campaign, Contract, Customer, Lead, Product, PromotionChannel};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::{Email, EntityId, Phone};
use crate::ports::outbound::{
    CampaignRepository, ChannelRepository, ContractRepository, CustomerRepository,
    EventPublisher, LeadRepository, ProductRepository, RepositoryError,
};

/// Stale-write guard shared by every store: the incoming row must be
/// exactly one version ahead of the stored one.
fn check_version(stored: u64, incoming: u64) -> Result<(), RepositoryError> {
    if incoming != stored + 1 {
        return Err(RepositoryError::VersionConflict);
    }
    Ok(())
}

fn poisoned(_: impl std::fmt::Debug) -> RepositoryError {
    RepositoryError::ConnectionError("store lock poisoned".into())
}

// =============================================================================
// Products
// =============================================================================

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products.get(id.as_str()).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products.values().find(|p| p.name() == name).cloned())
    }

    async fn find_active(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products
            .values()
            .filter(|p| !p.is_archived())
            .cloned()
            .collect())
    }

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().map_err(poisoned)?;
        if products.values().any(|p| p.name() == product.name()) {
            return Err(RepositoryError::DuplicateKey("name".into()));
        }
        products.insert(product.id().to_string(), product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().map_err(poisoned)?;
        let stored = products
            .get(product.id().as_str())
            .ok_or(RepositoryError::NotFound)?;
        check_version(stored.version(), product.version())?;
        if products
            .values()
            .any(|p| p.id() != product.id() && p.name() == product.name())
        {
            return Err(RepositoryError::DuplicateKey("name".into()));
        }
        products.insert(product.id().to_string(), product.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        let mut products = self.products.write().map_err(poisoned)?;
        products.remove(id.as_str());
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products.len() as u64)
    }
}

// =============================================================================
// Campaigns
// =============================================================================

#[derive(Default)]
pub struct InMemoryCampaignRepository {
    campaigns: RwLock<HashMap<String, Campaign>>,
}

impl InMemoryCampaignRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique keys: (name, website) together, email alone
    fn constraint_violation(
        campaigns: &HashMap<String, Campaign>,
        candidate: &Campaign,
    ) -> Option<RepositoryError> {
        for existing in campaigns.values() {
            if existing.id() == candidate.id() {
                continue;
            }
            if existing.name() == candidate.name() && existing.website() == candidate.website() {
                return Some(RepositoryError::DuplicateKey("name, website".into()));
            }
            if existing.email() == candidate.email() {
                return Some(RepositoryError::DuplicateKey("email".into()));
            }
        }
        None
    }
}

#[async_trait]
impl CampaignRepository for InMemoryCampaignRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Campaign>, RepositoryError> {
        let campaigns = self.campaigns.read().map_err(poisoned)?;
        Ok(campaigns.get(id.as_str()).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Campaign>, RepositoryError> {
        let campaigns = self.campaigns.read().map_err(poisoned)?;
        Ok(campaigns.values().find(|c| c.name() == name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Campaign>, RepositoryError> {
        let campaigns = self.campaigns.read().map_err(poisoned)?;
        Ok(campaigns.values().cloned().collect())
    }

    async fn insert(&self, campaign: &Campaign) -> Result<(), RepositoryError> {
        let mut campaigns = self.campaigns.write().map_err(poisoned)?;
        if let Some(e) = Self::constraint_violation(&campaigns, campaign) {
            return Err(e);
        }
        campaigns.insert(campaign.id().to_string(), campaign.clone());
        Ok(())
    }

    async fn update(&self, campaign: &Campaign) -> Result<(), RepositoryError> {
        let mut campaigns = self.campaigns.write().map_err(poisoned)?;
        let stored = campaigns
            .get(campaign.id().as_str())
            .ok_or(RepositoryError::NotFound)?;
        check_version(stored.version(), campaign.version())?;
        if let Some(e) = Self::constraint_violation(&campaigns, campaign) {
            return Err(e);
        }
        campaigns.insert(campaign.id().to_string(), campaign.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        let mut campaigns = self.campaigns.write().map_err(poisoned)?;
        campaigns.remove(id.as_str());
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let campaigns = self.campaigns.read().map_err(poisoned)?;
        Ok(campaigns.len() as u64)
    }
}

// =============================================================================
// Leads
// =============================================================================

#[derive(Default)]
pub struct InMemoryLeadRepository {
    leads: RwLock<HashMap<String, Lead>>,
}

impl InMemoryLeadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique keys: email, phone
    fn constraint_violation(
        leads: &HashMap<String, Lead>,
        candidate: &Lead,
    ) -> Option<RepositoryError> {
        for existing in leads.values() {
            if existing.id() == candidate.id() {
                continue;
            }
            if existing.email() == candidate.email() {
                return Some(RepositoryError::DuplicateKey("email".into()));
            }
            if existing.phone() == candidate.phone() {
                return Some(RepositoryError::DuplicateKey("phone".into()));
            }
        }
        None
    }
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Lead>, RepositoryError> {
        let leads = self.leads.read().map_err(poisoned)?;
        Ok(leads.get(id.as_str()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Lead>, RepositoryError> {
        let leads = self.leads.read().map_err(poisoned)?;
        Ok(leads.values().find(|l| l.email() == email).cloned())
    }

    async fn find_by_phone(&self, phone: &Phone) -> Result<Option<Lead>, RepositoryError> {
        let leads = self.leads.read().map_err(poisoned)?;
        Ok(leads.values().find(|l| l.phone() == phone).cloned())
    }

    async fn find_by_campaign(
        &self,
        campaign_id: &EntityId,
    ) -> Result<Vec<Lead>, RepositoryError> {
        let leads = self.leads.read().map_err(poisoned)?;
        Ok(leads
            .values()
            .filter(|l| l.campaign_id() == campaign_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, lead: &Lead) -> Result<(), RepositoryError> {
        let mut leads = self.leads.write().map_err(poisoned)?;
        if let Some(e) = Self::constraint_violation(&leads, lead) {
            return Err(e);
        }
        leads.insert(lead.id().to_string(), lead.clone());
        Ok(())
    }

    async fn update(&self, lead: &Lead) -> Result<(), RepositoryError> {
        let mut leads = self.leads.write().map_err(poisoned)?;
        let stored = leads
            .get(lead.id().as_str())
            .ok_or(RepositoryError::NotFound)?;
        check_version(stored.version(), lead.version())?;
        if let Some(e) = Self::constraint_violation(&leads, lead) {
            return Err(e);
        }
        leads.insert(lead.id().to_string(), lead.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        let mut leads = self.leads.write().map_err(poisoned)?;
        leads.remove(id.as_str());
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let leads = self.leads.read().map_err(poisoned)?;
        Ok(leads.len() as u64)
    }
}

// =============================================================================
// Customers
// =============================================================================

#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<HashMap<String, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Customer>, RepositoryError> {
        let customers = self.customers.read().map_err(poisoned)?;
        Ok(customers.get(id.as_str()).cloned())
    }

    async fn find_by_lead(
        &self,
        lead_id: &EntityId,
    ) -> Result<Option<Customer>, RepositoryError> {
        let customers = self.customers.read().map_err(poisoned)?;
        Ok(customers
            .values()
            .find(|c| c.lead_id() == lead_id)
            .cloned())
    }

    async fn find_by_leads(
        &self,
        lead_ids: &[EntityId],
    ) -> Result<Vec<Customer>, RepositoryError> {
        let customers = self.customers.read().map_err(poisoned)?;
        Ok(customers
            .values()
            .filter(|c| lead_ids.contains(c.lead_id()))
            .cloned()
            .collect())
    }

    async fn insert(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let mut customers = self.customers.write().map_err(poisoned)?;
        // One customer per lead.
        if customers
            .values()
            .any(|c| c.lead_id() == customer.lead_id())
        {
            return Err(RepositoryError::DuplicateKey("lead".into()));
        }
        customers.insert(customer.id().to_string(), customer.clone());
        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let mut customers = self.customers.write().map_err(poisoned)?;
        let stored = customers
            .get(customer.id().as_str())
            .ok_or(RepositoryError::NotFound)?;
        check_version(stored.version(), customer.version())?;
        if customers
            .values()
            .any(|c| c.id() != customer.id() && c.lead_id() == customer.lead_id())
        {
            return Err(RepositoryError::DuplicateKey("lead".into()));
        }
        customers.insert(customer.id().to_string(), customer.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        let mut customers = self.customers.write().map_err(poisoned)?;
        customers.remove(id.as_str());
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let customers = self.customers.read().map_err(poisoned)?;
        Ok(customers.len() as u64)
    }
}

// =============================================================================
// Contracts
// =============================================================================

#[derive(Default)]
pub struct InMemoryContractRepository {
    contracts: RwLock<HashMap<String, Contract>>,
}

impl InMemoryContractRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContractRepository for InMemoryContractRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Contract>, RepositoryError> {
        let contracts = self.contracts.read().map_err(poisoned)?;
        Ok(contracts.get(id.as_str()).cloned())
    }

    async fn find_by_product(
        &self,
        product_id: &EntityId,
    ) -> Result<Option<Contract>, RepositoryError> {
        let contracts = self.contracts.read().map_err(poisoned)?;
        Ok(contracts
            .values()
            .find(|c| c.product_id() == product_id)
            .cloned())
    }

    async fn insert(&self, contract: &Contract) -> Result<(), RepositoryError> {
        let mut contracts = self.contracts.write().map_err(poisoned)?;
        // One contract per product.
        if contracts
            .values()
            .any(|c| c.product_id() == contract.product_id())
        {
            return Err(RepositoryError::DuplicateKey("product".into()));
        }
        contracts.insert(contract.id().to_string(), contract.clone());
        Ok(())
    }

    async fn update(&self, contract: &Contract) -> Result<(), RepositoryError> {
        let mut contracts = self.contracts.write().map_err(poisoned)?;
        let stored = contracts
            .get(contract.id().as_str())
            .ok_or(RepositoryError::NotFound)?;
        check_version(stored.version(), contract.version())?;
        if contracts
            .values()
            .any(|c| c.id() != contract.id() && c.product_id() == contract.product_id())
        {
            return Err(RepositoryError::DuplicateKey("product".into()));
        }
        contracts.insert(contract.id().to_string(), contract.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        let mut contracts = self.contracts.write().map_err(poisoned)?;
        contracts.remove(id.as_str());
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let contracts = self.contracts.read().map_err(poisoned)?;
        Ok(contracts.len() as u64)
    }
}

// =============================================================================
// Promotion channels
// =============================================================================

#[derive(Default)]
pub struct InMemoryChannelRepository {
    channels: RwLock<HashMap<String, PromotionChannel>>,
}

impl InMemoryChannelRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChannelRepository for InMemoryChannelRepository {
    async fn find_by_id(
        &self,
        id: &EntityId,
    ) -> Result<Option<PromotionChannel>, RepositoryError> {
        let channels = self.channels.read().map_err(poisoned)?;
        Ok(channels.get(id.as_str()).cloned())
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PromotionChannel>, RepositoryError> {
        let channels = self.channels.read().map_err(poisoned)?;
        Ok(channels.values().find(|c| c.name() == name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<PromotionChannel>, RepositoryError> {
        let channels = self.channels.read().map_err(poisoned)?;
        Ok(channels.values().cloned().collect())
    }

    async fn insert(&self, channel: &PromotionChannel) -> Result<(), RepositoryError> {
        let mut channels = self.channels.write().map_err(poisoned)?;
        if channels.values().any(|c| c.name() == channel.name()) {
            return Err(RepositoryError::DuplicateKey("name".into()));
        }
        channels.insert(channel.id().to_string(), channel.clone());
        Ok(())
    }
}

// =============================================================================
// Event publishers
// =============================================================================

/// No-op event publisher for tests
#[derive(Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Publisher that writes events to the log, for deployments without a bus
#[derive(Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        for event in events {
            debug!(
                event = event.event_type(),
                aggregate_id = %event.aggregate_id(),
                "domain event"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::{Country, ProductStatus};
    use crate::domain::value_objects::Website;
    use crm_common::UserId;
    use rust_decimal::Decimal;

    fn product(name: &str) -> Product {
        Product::create(
            name,
            "A one-page site for a product launch.",
            1000.0,
            0,
            ProductStatus::Inactive,
            false,
            UserId::new(),
        )
    }

    #[tokio::test]
    async fn test_product_save_and_find() {
        let repo = InMemoryProductRepository::new();
        let p = product("Landing Page");

        repo.insert(&p).await.unwrap();

        let found = repo.find_by_id(p.id()).await.unwrap().unwrap();
        assert_eq!(found.name(), "Landing Page");
        assert!(repo.find_by_name("Landing Page").await.unwrap().is_some());
        assert!(repo.find_by_name("Other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_product_duplicate_name_refused() {
        let repo = InMemoryProductRepository::new();
        repo.insert(&product("Landing Page")).await.unwrap();

        let err = repo.insert(&product("Landing Page")).await.unwrap_err();
        assert_eq!(err, RepositoryError::DuplicateKey("name".into()));
    }

    #[tokio::test]
    async fn test_stale_product_update_refused() {
        let repo = InMemoryProductRepository::new();
        let original = product("Landing Page");
        repo.insert(&original).await.unwrap();

        // Two readers take the same row.
        let mut first = repo.find_by_id(original.id()).await.unwrap().unwrap();
        let mut second = repo.find_by_id(original.id()).await.unwrap().unwrap();

        first.revise(
            "Landing Page",
            "A one-page site for a product launch.",
            1100.0,
            0,
            ProductStatus::Inactive,
            false,
            UserId::new(),
        );
        repo.update(&first).await.unwrap();

        // The loser's write is one version behind and is refused.
        second.revise(
            "Landing Page",
            "A one-page site for a product launch.",
            900.0,
            0,
            ProductStatus::Inactive,
            false,
            UserId::new(),
        );
        let err = repo.update(&second).await.unwrap_err();
        assert_eq!(err, RepositoryError::VersionConflict);

        let stored = repo.find_by_id(original.id()).await.unwrap().unwrap();
        assert_eq!(stored.cost(), 1100.0);
    }

    #[tokio::test]
    async fn test_campaign_compound_key() {
        let repo = InMemoryCampaignRepository::new();

        let make = |name: &str, website: &str, email: &str| {
            Campaign::create(
                name,
                EntityId::new(),
                EntityId::new(),
                Decimal::new(1000, 0),
                Country::France,
                crate::domain::value_objects::Email::new(email).unwrap(),
                Website::new(website).unwrap(),
                UserId::new(),
            )
        };

        repo.insert(&make("Spring", "example.com", "a@example.com"))
            .await
            .unwrap();

        // Same name, different website: allowed.
        repo.insert(&make("Spring", "other.com", "b@example.com"))
            .await
            .unwrap();

        // Same (name, website) pair: refused.
        let err = repo
            .insert(&make("Spring", "example.com", "c@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err, RepositoryError::DuplicateKey("name, website".into()));

        // Same email: refused.
        let err = repo
            .insert(&make("Autumn", "third.com", "a@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err, RepositoryError::DuplicateKey("email".into()));
    }

    #[tokio::test]
    async fn test_customer_one_to_one_with_lead() {
        let repo = InMemoryCustomerRepository::new();
        let lead_id = EntityId::new();

        repo.insert(&Customer::create(
            lead_id.clone(),
            EntityId::new(),
            UserId::new(),
        ))
        .await
        .unwrap();

        let err = repo
            .insert(&Customer::create(lead_id, EntityId::new(), UserId::new()))
            .await
            .unwrap_err();
        assert_eq!(err, RepositoryError::DuplicateKey("lead".into()));
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let repo = InMemoryProductRepository::new();
        let err = repo.update(&product("Ghost")).await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound);
    }

    #[test]
    fn test_event_publishers_accept_events() {
        tokio_test::block_on(async {
            let mut p = product("Landing Page");
            let events = p.take_events();
            TracingEventPublisher.publish(events).await.unwrap();
            NoOpEventPublisher.publish(vec![]).await.unwrap();
        });
    }
}
