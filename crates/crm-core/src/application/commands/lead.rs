//! Lead application service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crm_common::{RoleChecker, ServiceName, UserId};

use crate::application::dto::{CreateLeadCommand, UpdateLeadCommand};
use crate::domain::aggregates::Lead;
use crate::domain::validation::lead as rules;
use crate::domain::value_objects::EntityId;
use crate::error::{CrmError, ValidationError};
use crate::ports::inbound::LeadUseCases;
use crate::ports::outbound::{CampaignRepository, EventPublisher, LeadRepository};

pub struct LeadService {
    leads: Arc<dyn LeadRepository>,
    campaigns: Arc<dyn CampaignRepository>,
    role_checker: Arc<RoleChecker>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl LeadService {
    pub fn new(
        leads: Arc<dyn LeadRepository>,
        campaigns: Arc<dyn CampaignRepository>,
        role_checker: Arc<RoleChecker>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            leads,
            campaigns,
            role_checker,
            event_publisher,
        }
    }

    async fn check_campaign_exists(&self, campaign_id: &EntityId) -> Result<(), CrmError> {
        match self.campaigns.find_by_id(campaign_id).await? {
            Some(_) => Ok(()),
            None => Err(CrmError::NotFound("campaign")),
        }
    }
}

#[async_trait]
impl LeadUseCases for LeadService {
    async fn create_lead(&self, command: CreateLeadCommand) -> Result<Lead, CrmError> {
        let (email, phone) = rules::validate(
            &command.first_name,
            command.middle_name.as_deref(),
            &command.last_name,
            &command.email,
            &command.phone,
        )?;
        self.check_campaign_exists(&command.campaign_id).await?;
        self.role_checker
            .check(&command.created_by, ServiceName::Lead)
            .await?;

        let mut lead = Lead::create(
            command.first_name,
            command.middle_name,
            command.last_name,
            email,
            phone,
            command.campaign_id,
            command.created_by,
        );
        self.leads.insert(&lead).await?;

        self.event_publisher.publish(lead.take_events()).await?;

        info!(lead = %lead.email(), "lead created");
        Ok(lead)
    }

    async fn update_lead(&self, command: UpdateLeadCommand) -> Result<Lead, CrmError> {
        let mut lead = self
            .leads
            .find_by_id(&command.lead_id)
            .await?
            .ok_or(CrmError::NotFound("lead"))?;

        let (email, phone) = rules::validate(
            &command.first_name,
            command.middle_name.as_deref(),
            &command.last_name,
            &command.email,
            &command.phone,
        )?;
        self.check_campaign_exists(&command.campaign_id).await?;
        self.role_checker
            .check(&command.updated_by, ServiceName::Lead)
            .await?;

        lead.revise(
            command.first_name,
            command.middle_name,
            command.last_name,
            email,
            phone,
            command.campaign_id,
            command.updated_by,
        );
        if let Err(e) = self.leads.update(&lead).await {
            error!(lead = %lead.email(), error = %e, "lead update failed");
            return Err(ValidationError::form(
                "An error occurred while updating the lead.",
            )
            .into());
        }

        self.event_publisher.publish(lead.take_events()).await?;

        info!(lead = %lead.email(), "lead updated");
        Ok(lead)
    }

    async fn get_lead(&self, id: &EntityId) -> Result<Option<Lead>, CrmError> {
        Ok(self.leads.find_by_id(id).await?)
    }

    async fn delete_lead(&self, id: &EntityId, actor: &UserId) -> Result<(), CrmError> {
        self.role_checker.check(actor, ServiceName::Lead).await?;
        self.leads.delete(id).await?;
        info!(lead_id = %id, "lead deleted");
        Ok(())
    }
}
