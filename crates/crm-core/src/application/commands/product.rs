//! Product application service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crm_common::{RoleChecker, ServiceName, UserId, WordFilter};

use crate::application::dto::{CreateProductCommand, UpdateProductCommand};
use crate::domain::aggregates::Product;
use crate::domain::validation::product as rules;
use crate::error::{CrmError, ValidationError};
use crate::ports::inbound::ProductUseCases;
use crate::ports::outbound::{EventPublisher, ProductRepository};

pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    role_checker: Arc<RoleChecker>,
    word_filter: Arc<WordFilter>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        role_checker: Arc<RoleChecker>,
        word_filter: Arc<WordFilter>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            products,
            role_checker,
            word_filter,
            event_publisher,
        }
    }

    /// Name uniqueness; `except` excludes the row being updated
    async fn check_name_free(
        &self,
        name: &str,
        except: Option<&crate::domain::value_objects::EntityId>,
    ) -> Result<(), CrmError> {
        if let Some(existing) = self.products.find_by_name(name).await? {
            if except != Some(existing.id()) {
                return Err(ValidationError::field(
                    "name",
                    "This service is already registered.",
                )
                .into());
            }
        }
        Ok(())
    }

    fn check_bad_words(&self, command_name: &str, description: &str) -> Result<(), CrmError> {
        self.word_filter.check_field("name", command_name)?;
        self.word_filter.check_field("description", description)?;
        Ok(())
    }
}

#[async_trait]
impl ProductUseCases for ProductService {
    async fn create_product(&self, command: CreateProductCommand) -> Result<Product, CrmError> {
        rules::validate(
            &command.name,
            &command.description,
            command.cost,
            command.discount,
            command.status,
            command.archived,
        )?;
        self.check_name_free(&command.name, None).await?;
        self.check_bad_words(&command.name, &command.description)?;
        self.role_checker
            .check(&command.created_by, ServiceName::Product)
            .await?;

        let mut product = Product::create(
            command.name,
            command.description,
            command.cost,
            command.discount,
            command.status,
            command.archived,
            command.created_by,
        );
        self.products.insert(&product).await?;

        self.event_publisher.publish(product.take_events()).await?;

        info!(product = product.name(), "product created");
        Ok(product)
    }

    async fn update_product(&self, command: UpdateProductCommand) -> Result<Product, CrmError> {
        let mut product = self
            .products
            .find_by_id(&command.product_id)
            .await?
            .ok_or(CrmError::NotFound("product"))?;

        rules::validate(
            &command.name,
            &command.description,
            command.cost,
            command.discount,
            command.status,
            command.archived,
        )?;
        self.check_name_free(&command.name, Some(product.id()))
            .await?;
        self.check_bad_words(&command.name, &command.description)?;
        self.role_checker
            .check(&command.updated_by, ServiceName::Product)
            .await?;

        product.revise(
            command.name,
            command.description,
            command.cost,
            command.discount,
            command.status,
            command.archived,
            command.updated_by,
        );
        if let Err(e) = self.products.update(&product).await {
            error!(product = product.name(), error = %e, "product update failed");
            return Err(ValidationError::form(
                "An error occurred while updating the product.",
            )
            .into());
        }

        self.event_publisher.publish(product.take_events()).await?;

        info!(product = product.name(), "product updated");
        Ok(product)
    }

    async fn get_product(
        &self,
        id: &crate::domain::value_objects::EntityId,
    ) -> Result<Option<Product>, CrmError> {
        Ok(self.products.find_by_id(id).await?)
    }

    async fn list_products(&self) -> Result<Vec<Product>, CrmError> {
        Ok(self.products.find_active().await?)
    }

    async fn delete_product(
        &self,
        id: &crate::domain::value_objects::EntityId,
        actor: &UserId,
    ) -> Result<(), CrmError> {
        self.role_checker.check(actor, ServiceName::Product).await?;
        self.products.delete(id).await?;
        info!(product_id = %id, "product deleted");
        Ok(())
    }
}
