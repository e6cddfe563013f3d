//! Data Transfer Objects (DTOs)
//!
//! Create and update commands are distinct types sharing a field subset:
//! the updater and the target id exist only on the update side, so a
//! command can never be half-filled.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crm_common::UserId;

use crate::domain::aggregates::{Country, ProductStatus};
use crate::domain::value_objects::EntityId;

// =============================================================================
// Product Commands
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateProductCommand {
    pub name: String,
    pub description: String,
    pub cost: f64,
    pub discount: u8,
    pub status: ProductStatus,
    pub archived: bool,
    pub created_by: UserId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateProductCommand {
    pub product_id: EntityId,
    pub name: String,
    pub description: String,
    pub cost: f64,
    pub discount: u8,
    pub status: ProductStatus,
    pub archived: bool,
    pub updated_by: UserId,
}

// =============================================================================
// Campaign Commands
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCampaignCommand {
    pub name: String,
    pub product_id: EntityId,
    pub channel_id: EntityId,
    pub budget: Decimal,
    pub country: Option<Country>,
    pub email: String,
    pub website: String,
    pub created_by: UserId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateCampaignCommand {
    pub campaign_id: EntityId,
    pub name: String,
    pub product_id: EntityId,
    pub channel_id: EntityId,
    pub budget: Decimal,
    pub country: Option<Country>,
    pub email: String,
    pub website: String,
    pub updated_by: UserId,
}

// =============================================================================
// Lead Commands
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateLeadCommand {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub campaign_id: EntityId,
    pub created_by: UserId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateLeadCommand {
    pub lead_id: EntityId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub campaign_id: EntityId,
    pub updated_by: UserId,
}

// =============================================================================
// Contract Commands
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateContractCommand {
    pub name: String,
    pub product_id: EntityId,
    pub document_name: String,
    pub document_size: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cost: Decimal,
    pub created_by: UserId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateContractCommand {
    pub contract_id: EntityId,
    pub name: String,
    pub document_name: String,
    pub document_size: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cost: Decimal,
    pub updated_by: UserId,
}

// =============================================================================
// Customer Commands
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCustomerCommand {
    pub lead_id: EntityId,
    pub contract_id: EntityId,
    pub created_by: UserId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateCustomerCommand {
    pub customer_id: EntityId,
    pub contract_id: EntityId,
    pub archived: bool,
    pub updated_by: UserId,
}

// =============================================================================
// Views (Read Models)
// =============================================================================

/// Read-time campaign performance, assembled fresh on every call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignPerformanceView {
    pub campaign_id: String,
    pub name: String,
    pub budget: Decimal,
    pub leads_count: u64,
    pub customers_count: u64,
    pub total_income: Decimal,
    pub profit: Decimal,
    pub roi: Decimal,
}

/// Home-page counters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OverallStatistics {
    pub products_count: u64,
    pub campaigns_count: u64,
    pub leads_count: u64,
    pub customers_count: u64,
}
