//! Domain Events
//!
//! Events raised by aggregates to communicate state changes.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::EntityId;

/// All domain events in the CRM bounded context
#[derive(Clone, Debug)]
pub enum DomainEvent {
    Product(ProductEvent),
    Campaign(CampaignEvent),
    Lead(LeadEvent),
    Customer(CustomerEvent),
    Contract(ContractEvent),
}

#[derive(Clone, Debug)]
pub enum ProductEvent {
    Created {
        product_id: EntityId,
        name: String,
        created_at: DateTime<Utc>,
    },
    Updated {
        product_id: EntityId,
        updated_at: DateTime<Utc>,
    },
}

#[derive(Clone, Debug)]
pub enum CampaignEvent {
    Created {
        campaign_id: EntityId,
        name: String,
        product_id: EntityId,
        created_at: DateTime<Utc>,
    },
    Updated {
        campaign_id: EntityId,
        updated_at: DateTime<Utc>,
    },
}

#[derive(Clone, Debug)]
pub enum LeadEvent {
    Created {
        lead_id: EntityId,
        campaign_id: EntityId,
        created_at: DateTime<Utc>,
    },
    Updated {
        lead_id: EntityId,
        updated_at: DateTime<Utc>,
    },
    ConvertedToCustomer {
        lead_id: EntityId,
        customer_id: EntityId,
        converted_at: DateTime<Utc>,
    },
}

#[derive(Clone, Debug)]
pub enum CustomerEvent {
    Created {
        customer_id: EntityId,
        lead_id: EntityId,
        contract_id: EntityId,
        created_at: DateTime<Utc>,
    },
    Updated {
        customer_id: EntityId,
        updated_at: DateTime<Utc>,
    },
}

#[derive(Clone, Debug)]
pub enum ContractEvent {
    Created {
        contract_id: EntityId,
        product_id: EntityId,
        created_at: DateTime<Utc>,
    },
    Updated {
        contract_id: EntityId,
        updated_at: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Aggregate the event belongs to
    pub fn aggregate_id(&self) -> &EntityId {
        match self {
            DomainEvent::Product(e) => match e {
                ProductEvent::Created { product_id, .. } => product_id,
                ProductEvent::Updated { product_id, .. } => product_id,
            },
            DomainEvent::Campaign(e) => match e {
                CampaignEvent::Created { campaign_id, .. } => campaign_id,
                CampaignEvent::Updated { campaign_id, .. } => campaign_id,
            },
            DomainEvent::Lead(e) => match e {
                LeadEvent::Created { lead_id, .. } => lead_id,
                LeadEvent::Updated { lead_id, .. } => lead_id,
                LeadEvent::ConvertedToCustomer { lead_id, .. } => lead_id,
            },
            DomainEvent::Customer(e) => match e {
                CustomerEvent::Created { customer_id, .. } => customer_id,
                CustomerEvent::Updated { customer_id, .. } => customer_id,
            },
            DomainEvent::Contract(e) => match e {
                ContractEvent::Created { contract_id, .. } => contract_id,
                ContractEvent::Updated { contract_id, .. } => contract_id,
            },
        }
    }

    /// Event type name for log lines and routing
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::Product(e) => match e {
                ProductEvent::Created { .. } => "product.created",
                ProductEvent::Updated { .. } => "product.updated",
            },
            DomainEvent::Campaign(e) => match e {
                CampaignEvent::Created { .. } => "campaign.created",
                CampaignEvent::Updated { .. } => "campaign.updated",
            },
            DomainEvent::Lead(e) => match e {
                LeadEvent::Created { .. } => "lead.created",
                LeadEvent::Updated { .. } => "lead.updated",
                LeadEvent::ConvertedToCustomer { .. } => "lead.converted_to_customer",
            },
            DomainEvent::Customer(e) => match e {
                CustomerEvent::Created { .. } => "customer.created",
                CustomerEvent::Updated { .. } => "customer.updated",
            },
            DomainEvent::Contract(e) => match e {
                ContractEvent::Created { .. } => "contract.created",
                ContractEvent::Updated { .. } => "contract.updated",
            },
        }
    }
}
