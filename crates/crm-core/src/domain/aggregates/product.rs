//! Product Aggregate
//!
//! A service the business sells. Carries its own discount and lifecycle
//! status; campaigns and contracts reference it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crm_common::UserId;

use crate::domain::events::{DomainEvent, ProductEvent};
use crate::domain::value_objects::EntityId;

#[derive(Clone, Debug)]
pub struct Product {
    id: EntityId,
    name: String,
    description: String,
    cost: f64,
    discount: u8,
    status: ProductStatus,
    archived: bool,
    created_by: UserId,
    updated_by: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
    events: Vec<DomainEvent>,
}

impl Product {
    /// Create a new product from already-validated input
    pub fn create(
        name: impl Into<String>,
        description: impl Into<String>,
        cost: f64,
        discount: u8,
        status: ProductStatus,
        archived: bool,
        created_by: UserId,
    ) -> Self {
        let now = Utc::now();
        let id = EntityId::new();

        let mut product = Self {
            id: id.clone(),
            name: name.into(),
            description: description.into(),
            cost,
            discount,
            status,
            archived,
            created_by,
            updated_by: None,
            created_at: now,
            updated_at: now,
            version: 1,
            events: vec![],
        };

        let name = product.name.clone();
        product.raise_event(DomainEvent::Product(ProductEvent::Created {
            product_id: id,
            name,
            created_at: now,
        }));

        product
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn cost(&self) -> f64 {
        self.cost
    }
    pub fn discount(&self) -> u8 {
        self.discount
    }
    pub fn status(&self) -> ProductStatus {
        self.status
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

    /// Cost after the discount is applied
    pub fn final_cost(&self) -> f64 {
        self.cost * (1.0 - f64::from(self.discount) / 100.0)
    }

    /// Apply an update from already-validated input
    pub fn revise(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        cost: f64,
        discount: u8,
        status: ProductStatus,
        archived: bool,
        updated_by: UserId,
    ) {
        self.name = name.into();
        self.description = description.into();
        self.cost = cost;
        self.discount = discount;
        self.status = status;
        self.archived = archived;
        self.updated_by = Some(updated_by);
        self.touch();

        self.raise_event(DomainEvent::Product(ProductEvent::Updated {
            product_id: self.id.clone(),
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

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    #[default]
    Inactive,
    InDevelopment,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::InDevelopment => "in_development",
        }
    }
}
