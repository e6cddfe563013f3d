//! Customer Aggregate
//!
//! An active client: a converted lead holding a contract. One lead maps to
//! at most one customer; removal is a soft delete via the archived flag.

use chrono::{DateTime, Utc};

use crm_common::UserId;

use crate::domain::events::{CustomerEvent, DomainEvent};
use crate::domain::value_objects::EntityId;

#[derive(Clone, Debug)]
pub struct Customer {
    id: EntityId,
    lead_id: EntityId,
    contract_id: EntityId,
    archived: bool,
    created_by: UserId,
    updated_by: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
    events: Vec<DomainEvent>,
}

impl Customer {
    /// Create a new customer from already-validated input
    pub fn create(lead_id: EntityId, contract_id: EntityId, created_by: UserId) -> Self {
        let now = Utc::now();
        let id = EntityId::new();

        let mut customer = Self {
            id: id.clone(),
            lead_id: lead_id.clone(),
            contract_id: contract_id.clone(),
            archived: false,
            created_by,
            updated_by: None,
            created_at: now,
            updated_at: now,
            version: 1,
            events: vec![],
        };

        customer.raise_event(DomainEvent::Customer(CustomerEvent::Created {
            customer_id: id,
            lead_id,
            contract_id,
            created_at: now,
        }));

        customer
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }
    pub fn lead_id(&self) -> &EntityId {
        &self.lead_id
    }
    pub fn contract_id(&self) -> &EntityId {
        &self.contract_id
    }
    pub fn is_archived(&self) -> bool {
        self.archived
    }
    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }
    pub fn updated_by(&self) -> Option<&UserId> {
        self.updated_by.as_ref()
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply an update from already-validated input
    pub fn revise(&mut self, contract_id: EntityId, archived: bool, updated_by: UserId) {
        self.contract_id = contract_id;
        self.archived = archived;
        self.updated_by = Some(updated_by);
        self.touch();

        self.raise_event(DomainEvent::Customer(CustomerEvent::Updated {
            customer_id: self.id.clone(),
            updated_at: self.updated_at,
        }));
    }

    /// Get and clear accumulated domain events
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_creation() {
        let customer = Customer::create(EntityId::new(), EntityId::new(), UserId::new());
        assert!(!customer.is_archived());
        assert_eq!(customer.version(), 1);
    }

    #[test]
    fn test_archive_via_revise() {
        let mut customer = Customer::create(EntityId::new(), EntityId::new(), UserId::new());
        customer.take_events();

        let contract_id = customer.contract_id().clone();
        customer.revise(contract_id, true, UserId::new());

        assert!(customer.is_archived());
        assert_eq!(customer.version(), 2);
        assert_eq!(customer.take_events()[0].event_type(), "customer.updated");
    }
}
