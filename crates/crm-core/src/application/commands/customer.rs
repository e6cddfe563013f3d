//! Customer application service
//!
//! Conversion lives here: creating a customer links a lead to a contract
//! one-to-one and activates the lead.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crm_common::{RoleChecker, ServiceName, UserId};

use crate::application::dto::{CreateCustomerCommand, UpdateCustomerCommand};
use crate::domain::aggregates::Customer;
use crate::domain::validation::customer as rules;
use crate::domain::value_objects::EntityId;
use crate::error::{CrmError, ValidationError};
use crate::ports::inbound::CustomerUseCases;
use crate::ports::outbound::{
    ContractRepository, CustomerRepository, EventPublisher, LeadRepository,
};

pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
    leads: Arc<dyn LeadRepository>,
    contracts: Arc<dyn ContractRepository>,
    role_checker: Arc<RoleChecker>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CustomerService {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        leads: Arc<dyn LeadRepository>,
        contracts: Arc<dyn ContractRepository>,
        role_checker: Arc<RoleChecker>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            customers,
            leads,
            contracts,
            role_checker,
            event_publisher,
        }
    }

    async fn check_contract_exists(&self, contract_id: &EntityId) -> Result<(), CrmError> {
        match self.contracts.find_by_id(contract_id).await? {
            Some(_) => Ok(()),
            None => Err(CrmError::NotFound("contract")),
        }
    }
}

#[async_trait]
impl CustomerUseCases for CustomerService {
    async fn create_customer(&self, command: CreateCustomerCommand) -> Result<Customer, CrmError> {
        let mut lead = self
            .leads
            .find_by_id(&command.lead_id)
            .await?
            .ok_or(CrmError::NotFound("lead"))?;

        let existing = self.customers.find_by_lead(&command.lead_id).await?;
        rules::ensure_lead_available(existing.as_ref())?;

        self.check_contract_exists(&command.contract_id).await?;
        self.role_checker
            .check(&command.created_by, ServiceName::Customer)
            .await?;

        let mut customer = Customer::create(
            command.lead_id,
            command.contract_id,
            command.created_by,
        );
        self.customers.insert(&customer).await?;

        // The lead is converted now; if recording that fails the customer
        // row already exists, so surface the failure loudly.
        lead.mark_converted(customer.id().clone());
        if let Err(e) = self.leads.update(&lead).await {
            error!(lead = %lead.email(), error = %e, "failed to activate converted lead");
            return Err(e.into());
        }

        let mut events = customer.take_events();
        events.extend(lead.take_events());
        self.event_publisher.publish(events).await?;

        info!(customer = %lead.full_name(), "lead converted to customer");
        Ok(customer)
    }

    async fn update_customer(&self, command: UpdateCustomerCommand) -> Result<Customer, CrmError> {
        let mut customer = self
            .customers
            .find_by_id(&command.customer_id)
            .await?
            .ok_or(CrmError::NotFound("customer"))?;

        self.check_contract_exists(&command.contract_id).await?;
        self.role_checker
            .check(&command.updated_by, ServiceName::Customer)
            .await?;

        customer.revise(command.contract_id, command.archived, command.updated_by);
        if let Err(e) = self.customers.update(&customer).await {
            error!(customer_id = %customer.id(), error = %e, "customer update failed");
            return Err(ValidationError::form(
                "An error occurred while updating the customer.",
            )
            .into());
        }

        self.event_publisher.publish(customer.take_events()).await?;

        info!(customer_id = %customer.id(), "customer updated");
        Ok(customer)
    }

    async fn get_customer(&self, id: &EntityId) -> Result<Option<Customer>, CrmError> {
        Ok(self.customers.find_by_id(id).await?)
    }

    async fn delete_customer(&self, id: &EntityId, actor: &UserId) -> Result<(), CrmError> {
        self.role_checker
            .check(actor, ServiceName::Customer)
            .await?;
        self.customers.delete(id).await?;
        info!(customer_id = %id, "customer deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::testing::{manager, operator, role_checker};
    use crate::domain::aggregates::{Contract, Lead};
    use crate::domain::value_objects::{DocumentRef, Email, Phone};
    use crate::infrastructure::persistence::{
        InMemoryContractRepository, InMemoryCustomerRepository, InMemoryLeadRepository,
        NoOpEventPublisher,
    };
    use chrono::NaiveDate;
    use crm_common::User;
    use rust_decimal::Decimal;

    struct Fixture {
        service: CustomerService,
        customers: Arc<InMemoryCustomerRepository>,
        leads: Arc<InMemoryLeadRepository>,
        lead_id: EntityId,
        contract_id: EntityId,
    }

    async fn fixture(users: &[&User]) -> Fixture {
        let customers = Arc::new(InMemoryCustomerRepository::new());
        let leads = Arc::new(InMemoryLeadRepository::new());
        let contracts = Arc::new(InMemoryContractRepository::new());

        let lead = Lead::create(
            "Ivan",
            None,
            "Ivanov",
            Email::new("ivan@example.com").unwrap(),
            Phone::new("+79123456789").unwrap(),
            EntityId::new(),
            UserId::new(),
        );
        leads.insert(&lead).await.unwrap();

        let contract = Contract::create(
            "Landing Page for Acme",
            EntityId::new(),
            DocumentRef::new("agreement.pdf", 2048).unwrap(),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            Decimal::new(1000, 0),
            UserId::new(),
        );
        contracts.insert(&contract).await.unwrap();

        let service = CustomerService::new(
            customers.clone(),
            leads.clone(),
            contracts,
            role_checker(users),
            Arc::new(NoOpEventPublisher),
        );

        Fixture {
            service,
            customers,
            leads,
            lead_id: lead.id().clone(),
            contract_id: contract.id().clone(),
        }
    }

    fn command(fx: &Fixture, created_by: &User) -> CreateCustomerCommand {
        CreateCustomerCommand {
            lead_id: fx.lead_id.clone(),
            contract_id: fx.contract_id.clone(),
            created_by: created_by.id().clone(),
        }
    }

    #[tokio::test]
    async fn test_conversion_creates_customer_and_activates_lead() {
        let user = manager();
        let fx = fixture(&[&user]).await;

        let customer = fx
            .service
            .create_customer(command(&fx, &user))
            .await
            .unwrap();

        assert_eq!(customer.lead_id(), &fx.lead_id);
        assert!(!customer.is_archived());

        let lead = fx.leads.find_by_id(&fx.lead_id).await.unwrap().unwrap();
        assert!(lead.is_active());
    }

    #[tokio::test]
    async fn test_lead_converts_at_most_once() {
        let user = manager();
        let fx = fixture(&[&user]).await;

        fx.service
            .create_customer(command(&fx, &user))
            .await
            .unwrap();
        let err = fx
            .service
            .create_customer(command(&fx, &user))
            .await
            .unwrap_err();

        assert_eq!(err.field_code(), Some("lead"));
        assert_eq!(fx.customers.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_operator_cannot_convert_leads() {
        let user = operator();
        let fx = fixture(&[&user]).await;

        let err = fx
            .service
            .create_customer(command(&fx, &user))
            .await
            .unwrap_err();

        assert!(matches!(err, CrmError::PermissionDenied(_)));
        assert_eq!(fx.customers.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_contract_is_not_found() {
        let user = manager();
        let fx = fixture(&[&user]).await;

        let mut cmd = command(&fx, &user);
        cmd.contract_id = EntityId::new();
        let err = fx.service.create_customer(cmd).await.unwrap_err();

        assert!(matches!(err, CrmError::NotFound("contract")));
    }

    #[tokio::test]
    async fn test_archive_customer() {
        let user = manager();
        let fx = fixture(&[&user]).await;

        let customer = fx
            .service
            .create_customer(command(&fx, &user))
            .await
            .unwrap();

        let updated = fx
            .service
            .update_customer(UpdateCustomerCommand {
                customer_id: customer.id().clone(),
                contract_id: fx.contract_id.clone(),
                archived: true,
                updated_by: user.id().clone(),
            })
            .await
            .unwrap();

        assert!(updated.is_archived());
        assert_eq!(updated.version(), 2);
    }
}
