//! Read-side queries
//!
//! Pure read-time aggregation, assembled fresh from the repositories on
//! every call. Nothing here is cached.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::application::dto::{CampaignPerformanceView, OverallStatistics};
use crate::domain::services::CampaignMetrics;
use crate::domain::value_objects::EntityId;
use crate::error::CrmError;
use crate::ports::outbound::{
    CampaignRepository, ContractRepository, CustomerRepository, LeadRepository,
    ProductRepository,
};

/// Campaign performance: lead/customer counts and the money the campaign's
/// converted leads brought in via their contracts.
pub struct CampaignAnalyticsService {
    campaigns: Arc<dyn CampaignRepository>,
    leads: Arc<dyn LeadRepository>,
    customers: Arc<dyn CustomerRepository>,
    contracts: Arc<dyn ContractRepository>,
}

impl CampaignAnalyticsService {
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        leads: Arc<dyn LeadRepository>,
        customers: Arc<dyn CustomerRepository>,
        contracts: Arc<dyn ContractRepository>,
    ) -> Self {
        Self {
            campaigns,
            leads,
            customers,
            contracts,
        }
    }

    pub async fn performance(
        &self,
        campaign_id: &EntityId,
    ) -> Result<CampaignPerformanceView, CrmError> {
        let campaign = self
            .campaigns
            .find_by_id(campaign_id)
            .await?
            .ok_or(CrmError::NotFound("campaign"))?;

        let leads = self.leads.find_by_campaign(campaign_id).await?;
        let lead_ids: Vec<EntityId> = leads.iter().map(|l| l.id().clone()).collect();
        let customers = self.customers.find_by_leads(&lead_ids).await?;

        let mut total_income = Decimal::ZERO;
        for customer in &customers {
            if let Some(contract) = self.contracts.find_by_id(customer.contract_id()).await? {
                total_income += contract.cost();
            }
        }

        Ok(CampaignPerformanceView {
            campaign_id: campaign.id().to_string(),
            name: campaign.name().to_string(),
            budget: campaign.budget(),
            leads_count: leads.len() as u64,
            customers_count: customers.len() as u64,
            total_income,
            profit: CampaignMetrics::profit(total_income, campaign.budget()),
            roi: CampaignMetrics::roi(total_income, campaign.budget()),
        })
    }
}

/// Home-page counters across the whole system
pub struct StatisticsService {
    products: Arc<dyn ProductRepository>,
    campaigns: Arc<dyn CampaignRepository>,
    leads: Arc<dyn LeadRepository>,
    customers: Arc<dyn CustomerRepository>,
}

impl StatisticsService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        campaigns: Arc<dyn CampaignRepository>,
        leads: Arc<dyn LeadRepository>,
        customers: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self {
            products,
            campaigns,
            leads,
            customers,
        }
    }

    pub async fn overall(&self) -> Result<OverallStatistics, CrmError> {
        Ok(OverallStatistics {
            products_count: self.products.count().await?,
            campaigns_count: self.campaigns.count().await?,
            leads_count: self.leads.count().await?,
            customers_count: self.customers.count().await?,
        })
    }
}
