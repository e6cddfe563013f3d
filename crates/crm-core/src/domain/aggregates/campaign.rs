//! Campaign Aggregate
//!
//! A marketing campaign promoting one product over one promotion channel.
//! Leads reference the campaign that produced them, which is what the
//! performance metrics (profit, ROI) are computed from.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crm_common::UserId;

use crate::domain::events::{CampaignEvent, DomainEvent};
use crate::domain::value_objects::{Email, EntityId, Website};

#[derive(Clone, Debug)]
pub struct Campaign {
    id: EntityId,
    name: String,
    product_id: EntityId,
    channel_id: EntityId,
    budget: Decimal,
    country: Country,
    email: Email,
    website: Website,
    created_by: UserId,
    updated_by: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
    events: Vec<DomainEvent>,
}

impl Campaign {
    /// Create a new campaign from already-validated input
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        name: impl Into<String>,
        product_id: EntityId,
        channel_id: EntityId,
        budget: Decimal,
        country: Country,
        email: Email,
        website: Website,
        created_by: UserId,
    ) -> Self {
        let now = Utc::now();
        let id = EntityId::new();

        let mut campaign = Self {
            id: id.clone(),
            name: name.into(),
            product_id: product_id.clone(),
            channel_id,
            budget,
            country,
            email,
            website,
            created_by,
            updated_by: None,
            created_at: now,
            updated_at: now,
            version: 1,
            events: vec![],
        };

        let name = campaign.name.clone();
        campaign.raise_event(DomainEvent::Campaign(CampaignEvent::Created {
            campaign_id: id,
            name,
            product_id,
            created_at: now,
        }));

        campaign
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
    pub fn channel_id(&self) -> &EntityId {
        &self.channel_id
    }
    pub fn budget(&self) -> Decimal {
        self.budget
    }
    pub fn country(&self) -> Country {
        self.country
    }
    pub fn email(&self) -> &Email {
        &self.email
    }
    pub fn website(&self) -> &Website {
        &self.website
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

    /// A campaign counts as running for its first 30 days
    pub fn is_running(&self) -> bool {
        self.created_at >= Utc::now() - Duration::days(30)
    }

    /// Apply an update from already-validated input
    #[allow(clippy::too_many_arguments)]
    pub fn revise(
        &mut self,
        name: impl Into<String>,
        product_id: EntityId,
        channel_id: EntityId,
        budget: Decimal,
        country: Country,
        email: Email,
        website: Website,
        updated_by: UserId,
    ) {
        self.name = name.into();
        self.product_id = product_id;
        self.channel_id = channel_id;
        self.budget = budget;
        self.country = country;
        self.email = email;
        self.website = website;
        self.updated_by = Some(updated_by);
        self.touch();

        self.raise_event(DomainEvent::Campaign(CampaignEvent::Updated {
            campaign_id: self.id.clone(),
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

/// Countries the service operates in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Russia,
    UnitedStates,
    China,
    Germany,
    France,
    Kazakhstan,
}

impl Country {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Russia => "RU",
            Self::UnitedStates => "US",
            Self::China => "CN",
            Self::Germany => "DE",
            Self::France => "FR",
            Self::Kazakhstan => "KZ",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Russia => "Russia",
            Self::UnitedStates => "United States",
            Self::China => "China",
            Self::Germany => "Germany",
            Self::France => "France",
            Self::Kazakhstan => "The Republic of Kazakhstan",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
