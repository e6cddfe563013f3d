//! Application layer
//!
//! Orchestrates use cases and coordinates domain objects.

pub mod commands;
pub mod dto;
pub mod queries;

pub use commands::{
    CampaignService, ContractService, CustomerService, LeadService, ProductService,
};
pub use dto::*;
pub use queries::{CampaignAnalyticsService, StatisticsService};
