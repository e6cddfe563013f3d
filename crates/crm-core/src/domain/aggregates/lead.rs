//! Lead Aggregate
//!
//! A prospective client who came in through a campaign. Created inactive;
//! converting it into a customer links the two one-to-one and activates it.

use chrono::{DateTime, Utc};

use crm_common::UserId;

use crate::domain::events::{DomainEvent, LeadEvent};
use crate::domain::value_objects::{Email, EntityId, Phone};

#[derive(Clone, Debug)]
pub struct Lead {
    id: EntityId,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    email: Email,
    phone: Phone,
    campaign_id: EntityId,
    is_active: bool,
    created_by: UserId,
    updated_by: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
    events: Vec<DomainEvent>,
}

impl Lead {
    /// Create a new lead from already-validated input
    pub fn create(
        first_name: impl Into<String>,
        middle_name: Option<String>,
        last_name: impl Into<String>,
        email: Email,
        phone: Phone,
        campaign_id: EntityId,
        created_by: UserId,
    ) -> Self {
        let now = Utc::now();
        let id = EntityId::new();

        let mut lead = Self {
            id: id.clone(),
            first_name: first_name.into(),
            middle_name,
            last_name: last_name.into(),
            email,
            phone,
            campaign_id: campaign_id.clone(),
            is_active: false,
            created_by,
            updated_by: None,
            created_at: now,
            updated_at: now,
            version: 1,
            events: vec![],
        };

        lead.raise_event(DomainEvent::Lead(LeadEvent::Created {
            lead_id: id,
            campaign_id,
            created_at: now,
        }));

        lead
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }
    pub fn first_name(&self) -> &str {
        &self.first_name
    }
    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
    pub fn email(&self) -> &Email {
        &self.email
    }
    pub fn phone(&self) -> &Phone {
        &self.phone
    }
    pub fn campaign_id(&self) -> &EntityId {
        &self.campaign_id
    }
    pub fn is_active(&self) -> bool {
        self.is_active
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

    /// Full name, middle name included when present
    pub fn full_name(&self) -> String {
        match &self.middle_name {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// First and middle names as initials, last name kept whole
    /// ("Ivan Sergeevich Ivanov" becomes "I. S. Ivanov")
    pub fn abbreviated_name(&self) -> String {
        let first_initial = initial_of(&self.first_name);
        match self.middle_name.as_deref().map(initial_of) {
            Some(middle_initial) => {
                format!("{} {} {}", first_initial, middle_initial, self.last_name)
            }
            None => format!("{} {}", first_initial, self.last_name),
        }
    }

    /// Apply an update from already-validated input
    pub fn revise(
        &mut self,
        first_name: impl Into<String>,
        middle_name: Option<String>,
        last_name: impl Into<String>,
        email: Email,
        phone: Phone,
        campaign_id: EntityId,
        updated_by: UserId,
    ) {
        self.first_name = first_name.into();
        self.middle_name = middle_name;
        self.last_name = last_name.into();
        self.email = email;
        self.phone = phone;
        self.campaign_id = campaign_id;
        self.updated_by = Some(updated_by);
        self.touch();

        self.raise_event(DomainEvent::Lead(LeadEvent::Updated {
            lead_id: self.id.clone(),
            updated_at: self.updated_at,
        }));
    }

    /// Record the conversion into a customer: the lead becomes active and
    /// raises the conversion event.
    pub fn mark_converted(&mut self, customer_id: EntityId) {
        self.is_active = true;
        self.touch();

        self.raise_event(DomainEvent::Lead(LeadEvent::ConvertedToCustomer {
            lead_id: self.id.clone(),
            customer_id,
            converted_at: self.updated_at,
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

fn initial_of(name: &str) -> String {
    match name.chars().next() {
        Some(first) => format!("{}.", first.to_uppercase()),
        None => String::new(),
    }
}
