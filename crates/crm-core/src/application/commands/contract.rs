//! Contract application service
//!
//! The update path reads the stored row first: the cost-decrease rule
//! compares against what is currently persisted, and only a superuser may
//! go below the 30% floor.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info};

use crm_common::{RoleChecker, ServiceName, UserDirectory, UserId};

use crate::application::dto::{CreateContractCommand, UpdateContractCommand};
use crate::domain::aggregates::Contract;
use crate::domain::validation::contract as rules;
use crate::domain::value_objects::EntityId;
use crate::error::{CrmError, ValidationError};
use crate::ports::inbound::ContractUseCases;
use crate::ports::outbound::{ContractRepository, EventPublisher, ProductRepository};

pub struct ContractService {
    contracts: Arc<dyn ContractRepository>,
    products: Arc<dyn ProductRepository>,
    directory: Arc<dyn UserDirectory>,
    role_checker: Arc<RoleChecker>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ContractService {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        products: Arc<dyn ProductRepository>,
        directory: Arc<dyn UserDirectory>,
        role_checker: Arc<RoleChecker>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            contracts,
            products,
            directory,
            role_checker,
            event_publisher,
        }
    }
}

#[async_trait]
impl ContractUseCases for ContractService {
    async fn create_contract(&self, command: CreateContractCommand) -> Result<Contract, CrmError> {
        if self
            .products
            .find_by_id(&command.product_id)
            .await?
            .is_none()
        {
            return Err(CrmError::NotFound("product"));
        }
        if self
            .contracts
            .find_by_product(&command.product_id)
            .await?
            .is_some()
        {
            return Err(ValidationError::field(
                "product",
                "This service already has a contract.",
            )
            .into());
        }

        let today = Utc::now().date_naive();
        let document = rules::validate(
            command.start_date,
            command.end_date,
            today,
            &command.document_name,
            command.document_size,
            command.cost,
        )?;
        self.role_checker
            .check(&command.created_by, ServiceName::Contract)
            .await?;

        let mut contract = Contract::create(
            command.name,
            command.product_id,
            document,
            command.start_date,
            command.end_date,
            command.cost,
            command.created_by,
        );
        self.contracts.insert(&contract).await?;

        self.event_publisher.publish(contract.take_events()).await?;

        info!(contract = contract.name(), "contract created");
        Ok(contract)
    }

    async fn update_contract(&self, command: UpdateContractCommand) -> Result<Contract, CrmError> {
        let mut contract = self
            .contracts
            .find_by_id(&command.contract_id)
            .await?
            .ok_or(CrmError::NotFound("contract"))?;

        let actor = self
            .directory
            .find_by_id(&command.updated_by)
            .await
            .ok_or_else(|| {
                CrmError::PermissionDenied(crm_common::AccessError::UnknownUser(
                    command.updated_by.clone(),
                ))
            })?;

        // A running contract keeps its original start date, so only the
        // window rules apply here.
        rules::validate_date_window(command.start_date, command.end_date)?;
        let document = rules::validate_document(&command.document_name, command.document_size)?;
        rules::validate_cost_update(command.cost, contract.cost(), actor.is_superuser())?;
        self.role_checker
            .check(&command.updated_by, ServiceName::Contract)
            .await?;

        contract.revise(
            command.name,
            document,
            command.start_date,
            command.end_date,
            command.cost,
            command.updated_by,
        );
        if let Err(e) = self.contracts.update(&contract).await {
            error!(contract = contract.name(), error = %e, "contract update failed");
            return Err(ValidationError::form(
                "An error occurred while updating the contract.",
            )
            .into());
        }

        self.event_publisher.publish(contract.take_events()).await?;

        info!(contract = contract.name(), "contract updated");
        Ok(contract)
    }

    async fn get_contract(&self, id: &EntityId) -> Result<Option<Contract>, CrmError> {
        Ok(self.contracts.find_by_id(id).await?)
    }

    async fn delete_contract(&self, id: &EntityId, actor: &UserId) -> Result<(), CrmError> {
        self.role_checker
            .check(actor, ServiceName::Contract)
            .await?;
        self.contracts.delete(id).await?;
        info!(contract_id = %id, "contract deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::testing::{manager, operator, superuser};
    use crate::domain::aggregates::{Product, ProductStatus};
    use crate::infrastructure::persistence::{
        InMemoryContractRepository, InMemoryProductRepository, NoOpEventPublisher,
    };
    use chrono::Duration;
    use crm_common::{InMemoryUserDirectory, RoleRegistry, User};
    use rust_decimal::Decimal;

    struct Fixture {
        service: ContractService,
        contracts: Arc<InMemoryContractRepository>,
        products: Arc<InMemoryProductRepository>,
        product_id: EntityId,
    }

    async fn fixture(users: &[&User]) -> Fixture {
        let contracts = Arc::new(InMemoryContractRepository::new());
        let products = Arc::new(InMemoryProductRepository::new());

        let product = Product::create(
            "Landing Page",
            "A one-page site for a product launch.",
            1000.0,
            0,
            ProductStatus::Active,
            false,
            UserId::new(),
        );
        products.insert(&product).await.unwrap();

        let directory = Arc::new(InMemoryUserDirectory::new());
        for user in users {
            directory.insert((*user).clone());
        }
        let role_checker = Arc::new(RoleChecker::new(
            RoleRegistry::standard(),
            directory.clone(),
        ));

        let service = ContractService::new(
            contracts.clone(),
            products.clone(),
            directory,
            role_checker,
            Arc::new(NoOpEventPublisher),
        );

        Fixture {
            service,
            contracts,
            products,
            product_id: product.id().clone(),
        }
    }

    fn command(fx: &Fixture, created_by: &User) -> CreateContractCommand {
        let start = Utc::now().date_naive() + Duration::days(7);
        CreateContractCommand {
            name: "Landing Page for Acme".into(),
            product_id: fx.product_id.clone(),
            document_name: "agreement.pdf".into(),
            document_size: 2048,
            start_date: start,
            end_date: start + Duration::days(90),
            cost: Decimal::new(1000, 0),
            created_by: created_by.id().clone(),
        }
    }

    #[tokio::test]
    async fn test_create_contract() {
        let user = manager();
        let fx = fixture(&[&user]).await;

        let contract = fx
            .service
            .create_contract(command(&fx, &user))
            .await
            .unwrap();

        assert_eq!(contract.name(), "Landing Page for Acme");
        assert_eq!(fx.contracts.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_one_contract_per_product() {
        let user = manager();
        let fx = fixture(&[&user]).await;

        fx.service
            .create_contract(command(&fx, &user))
            .await
            .unwrap();
        let err = fx
            .service
            .create_contract(command(&fx, &user))
            .await
            .unwrap_err();

        assert_eq!(err.field_code(), Some("product"));
    }

    #[tokio::test]
    async fn test_past_start_date_rejected() {
        let user = manager();
        let fx = fixture(&[&user]).await;

        let mut cmd = command(&fx, &user);
        cmd.start_date = Utc::now().date_naive() - Duration::days(1);
        let err = fx.service.create_contract(cmd).await.unwrap_err();

        assert_eq!(err.field_code(), Some("start_date"));
    }

    #[tokio::test]
    async fn test_unsupported_document_rejected() {
        let user = manager();
        let fx = fixture(&[&user]).await;

        let mut cmd = command(&fx, &user);
        cmd.document_name = "agreement.txt".into();
        let err = fx.service.create_contract(cmd).await.unwrap_err();

        assert_eq!(err.field_code(), Some("document"));
        assert_eq!(fx.contracts.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_operator_cannot_create_contracts() {
        let user = operator();
        let fx = fixture(&[&user]).await;

        let err = fx
            .service
            .create_contract(command(&fx, &user))
            .await
            .unwrap_err();

        assert!(matches!(err, CrmError::PermissionDenied(_)));
        assert_eq!(fx.contracts.count().await.unwrap(), 0);
    }

    fn update_command(
        contract: &Contract,
        cost: Decimal,
        updated_by: &User,
    ) -> UpdateContractCommand {
        UpdateContractCommand {
            contract_id: contract.id().clone(),
            name: contract.name().to_string(),
            document_name: contract.document().filename().to_string(),
            document_size: contract.document().size_bytes(),
            start_date: contract.start_date(),
            end_date: contract.end_date(),
            cost,
            updated_by: updated_by.id().clone(),
        }
    }

    #[tokio::test]
    async fn test_cost_decrease_over_30_percent_rejected() {
        let user = manager();
        let fx = fixture(&[&user]).await;

        let contract = fx
            .service
            .create_contract(command(&fx, &user))
            .await
            .unwrap();

        // 35% down: refused, the stored row is untouched.
        let err = fx
            .service
            .update_contract(update_command(&contract, Decimal::new(650, 0), &user))
            .await
            .unwrap_err();
        assert_eq!(err.field_code(), Some("cost"));

        let stored = fx
            .contracts
            .find_by_id(contract.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.cost(), Decimal::new(1000, 0));

        // 25% down: accepted.
        let updated = fx
            .service
            .update_contract(update_command(&contract, Decimal::new(750, 0), &user))
            .await
            .unwrap();
        assert_eq!(updated.cost(), Decimal::new(750, 0));
    }

    #[tokio::test]
    async fn test_superuser_bypasses_cost_floor() {
        let manager_user = manager();
        let root = superuser();
        let fx = fixture(&[&manager_user, &root]).await;

        let contract = fx
            .service
            .create_contract(command(&fx, &manager_user))
            .await
            .unwrap();

        let updated = fx
            .service
            .update_contract(update_command(&contract, Decimal::new(1, 0), &root))
            .await
            .unwrap();

        assert_eq!(updated.cost(), Decimal::new(1, 0));
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let user = manager();
        let fx = fixture(&[&user]).await;
        fx.products.delete(&fx.product_id).await.unwrap();

        let err = fx
            .service
            .create_contract(command(&fx, &user))
            .await
            .unwrap_err();

        assert!(matches!(err, CrmError::NotFound("product")));
    }
}
