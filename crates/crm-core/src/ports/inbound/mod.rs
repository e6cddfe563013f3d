//! Inbound ports (Use case traits)
//!
//! The surface a form or API layer programs against. Every mutation either
//! returns the stored entity or the first error the pipeline hit, with a
//! field code the caller can attach to the right input.

use async_trait::async_trait;

use crate::application::dto::*;
use crate::domain::aggregates::{Campaign, Contract, Customer, Lead, Product};
use crate::domain::value_objects::EntityId;
use crate::error::CrmError;

/// Product management use cases
#[async_trait]
pub trait ProductUseCases: Send + Sync {
    async fn create_product(&self, command: CreateProductCommand) -> Result<Product, CrmError>;

    async fn update_product(&self, command: UpdateProductCommand) -> Result<Product, CrmError>;

    async fn get_product(&self, id: &EntityId) -> Result<Option<Product>, CrmError>;

    /// Products visible in listings (archived ones filtered out)
    async fn list_products(&self) -> Result<Vec<Product>, CrmError>;

    async fn delete_product(&self, id: &EntityId, actor: &crm_common::UserId)
        -> Result<(), CrmError>;
}

/// Campaign management use cases
#[async_trait]
pub trait CampaignUseCases: Send + Sync {
    async fn create_campaign(&self, command: CreateCampaignCommand) -> Result<Campaign, CrmError>;

    async fn update_campaign(&self, command: UpdateCampaignCommand) -> Result<Campaign, CrmError>;

    async fn get_campaign(&self, id: &EntityId) -> Result<Option<Campaign>, CrmError>;

    async fn list_campaigns(&self) -> Result<Vec<Campaign>, CrmError>;

    async fn delete_campaign(&self, id: &EntityId, actor: &crm_common::UserId)
        -> Result<(), CrmError>;
}

/// Lead management use cases
#[async_trait]
pub trait LeadUseCases: Send + Sync {
    async fn create_lead(&self, command: CreateLeadCommand) -> Result<Lead, CrmError>;

    async fn update_lead(&self, command: UpdateLeadCommand) -> Result<Lead, CrmError>;

    async fn get_lead(&self, id: &EntityId) -> Result<Option<Lead>, CrmError>;

    async fn delete_lead(&self, id: &EntityId, actor: &crm_common::UserId) -> Result<(), CrmError>;
}

/// Contract management use cases
#[async_trait]
pub trait ContractUseCases: Send + Sync {
    async fn create_contract(&self, command: CreateContractCommand) -> Result<Contract, CrmError>;

    async fn update_contract(&self, command: UpdateContractCommand) -> Result<Contract, CrmError>;

    async fn get_contract(&self, id: &EntityId) -> Result<Option<Contract>, CrmError>;

    async fn delete_contract(&self, id: &EntityId, actor: &crm_common::UserId)
        -> Result<(), CrmError>;
}

/// Customer management use cases (lead conversion included)
#[async_trait]
pub trait CustomerUseCases: Send + Sync {
    /// Convert a lead into a customer under a contract
    async fn create_customer(&self, command: CreateCustomerCommand) -> Result<Customer, CrmError>;

    async fn update_customer(&self, command: UpdateCustomerCommand) -> Result<Customer, CrmError>;

    async fn get_customer(&self, id: &EntityId) -> Result<Option<Customer>, CrmError>;

    async fn delete_customer(&self, id: &EntityId, actor: &crm_common::UserId)
        -> Result<(), CrmError>;
}
