//! Contract Aggregate
//!
//! The signed agreement backing a customer. One product per contract;
//! the document reference and date window are validated before anything
//! reaches this type.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crm_common::UserId;

use crate::domain::events::{ContractEvent, DomainEvent};
use crate::domain::value_objects::{DocumentRef, EntityId};

#[derive(Clone, Debug)]
pub struct Contract {
    id: EntityId,
    name: String,
    product_id: EntityId,
    document: DocumentRef,
    start_date: NaiveDate,
    end_date: NaiveDate,
    cost: Decimal,
    created_by: UserId,
    updated_by: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
    events: Vec<DomainEvent>,
}

impl Contract {
    /// Create a new contract from already-validated input
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        name: impl Into<String>,
        product_id: EntityId,
        document: DocumentRef,
        start_date: NaiveDate,
        end_date: NaiveDate,
        cost: Decimal,
        created_by: UserId,
    ) -> Self {
        let now = Utc::now();
        let id = EntityId::new();

        let mut contract = Self {
            id: id.clone(),
            name: name.into(),
            product_id: product_id.clone(),
            document,
            start_date,
            end_date,
            cost,
            created_by,
            updated_by: None,
            created_at: now,
            updated_at: now,
            version: 1,
            events: vec![],
        };

        contract.raise_event(DomainEvent::Contract(ContractEvent::Created {
            contract_id: id,
            product_id,
            created_at: now,
        }));

        contract
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn product_id(&self) -> &EntityId {
        &self.product_id
    }
    pub fn document(&self) -> &DocumentRef {
        &self.document
    }
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }
    pub fn cost(&self) -> Decimal {
        self.cost
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

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Apply an update from already-validated input
    #[allow(clippy::too_many_arguments)]
    pub fn revise(
        &mut self,
        name: impl Into<String>,
        document: DocumentRef,
        start_date: NaiveDate,
        end_date: NaiveDate,
        cost: Decimal,
        updated_by: UserId,
    ) {
        self.name = name.into();
        self.document = document;
        self.start_date = start_date;
        self.end_date = end_date;
        self.cost = cost;
        self.updated_by = Some(updated_by);
        self.touch();

        self.raise_event(DomainEvent::Contract(ContractEvent::Updated {
            contract_id: self.id.clone(),
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
