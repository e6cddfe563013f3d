//! Campaign application service
//!
//! The only service with an outbound network dependency: a campaign's
//! website must answer a GET before the record is accepted.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crm_common::{RoleChecker, ServiceName, UserId, WordFilter};

use crate::application::dto::{CreateCampaignCommand, UpdateCampaignCommand};
use crate::domain::aggregates::Campaign;
use crate::domain::validation::campaign as rules;
use crate::domain::value_objects::{Email, EntityId, Website};
use crate::error::{CrmError, ValidationError};
use crate::ports::inbound::CampaignUseCases;
use crate::ports::outbound::{
    CampaignRepository, ChannelRepository, EventPublisher, ProbeError, ProductRepository,
    WebsiteProber,
};

pub struct CampaignService {
    campaigns: Arc<dyn CampaignRepository>,
    products: Arc<dyn ProductRepository>,
    channels: Arc<dyn ChannelRepository>,
    role_checker: Arc<RoleChecker>,
    word_filter: Arc<WordFilter>,
    prober: Arc<dyn WebsiteProber>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CampaignService {
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        products: Arc<dyn ProductRepository>,
        channels: Arc<dyn ChannelRepository>,
        role_checker: Arc<RoleChecker>,
        word_filter: Arc<WordFilter>,
        prober: Arc<dyn WebsiteProber>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            campaigns,
            products,
            channels,
            role_checker,
            word_filter,
            prober,
            event_publisher,
        }
    }

    /// Shared pre-write pipeline. Returns the parsed country/website/email
    /// triple for the caller to store.
    #[allow(clippy::too_many_arguments)]
    async fn check_common(
        &self,
        name: &str,
        product_id: &EntityId,
        channel_id: &EntityId,
        budget: rust_decimal::Decimal,
        country: Option<crate::domain::aggregates::Country>,
        email: &str,
        website_raw: &str,
        except: Option<&EntityId>,
    ) -> Result<(crate::domain::aggregates::Country, Website, Email), CrmError> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or(CrmError::NotFound("product"))?;

        let (country, website) =
            rules::validate(name, budget, product.cost(), country, website_raw)?;

        let email = Email::new(email)
            .map_err(|e| ValidationError::field("email", e.to_string()))?;

        if self.channels.find_by_id(channel_id).await?.is_none() {
            return Err(CrmError::NotFound("promotion channel"));
        }

        if let Some(existing) = self.campaigns.find_by_name(name).await? {
            if except != Some(existing.id()) {
                return Err(ValidationError::field(
                    "name",
                    "A campaign with that name already exists.",
                )
                .into());
            }
        }

        // The blocklist sees the raw input, before the scheme is prefixed.
        self.word_filter.check_field("name", name)?;
        self.word_filter.check_field("website", website_raw)?;

        self.check_website_alive(website.as_str()).await?;

        Ok((country, website, email))
    }

    /// One GET, 5-second timeout, 2xx required. No retries: a transient
    /// failure is this call's failure.
    async fn check_website_alive(&self, url: &str) -> Result<(), CrmError> {
        match self.prober.probe(url).await {
            Ok(status) if (200..300).contains(&status) => Ok(()),
            Ok(status) => {
                info!(url, status, "website liveness check failed");
                Err(CrmError::ExternalCheckFailed(
                    "The site is unavailable.".into(),
                ))
            }
            Err(ProbeError::Network(e)) => Err(CrmError::ExternalCheckFailed(format!(
                "The site is unavailable: {e}"
            ))),
        }
    }
}

#[async_trait]
impl CampaignUseCases for CampaignService {
    async fn create_campaign(&self, command: CreateCampaignCommand) -> Result<Campaign, CrmError> {
        let (country, website, email) = self
            .check_common(
                &command.name,
                &command.product_id,
                &command.channel_id,
                command.budget,
                command.country,
                &command.email,
                &command.website,
                None,
            )
            .await?;
        self.role_checker
            .check(&command.created_by, ServiceName::Campaign)
            .await?;

        let mut campaign = Campaign::create(
            command.name,
            command.product_id,
            command.channel_id,
            command.budget,
            country,
            email,
            website,
            command.created_by,
        );
        self.campaigns.insert(&campaign).await?;

        self.event_publisher.publish(campaign.take_events()).await?;

        info!(campaign = campaign.name(), "campaign created");
        Ok(campaign)
    }

    async fn update_campaign(&self, command: UpdateCampaignCommand) -> Result<Campaign, CrmError> {
        let mut campaign = self
            .campaigns
            .find_by_id(&command.campaign_id)
            .await?
            .ok_or(CrmError::NotFound("campaign"))?;

        let (country, website, email) = self
            .check_common(
                &command.name,
                &command.product_id,
                &command.channel_id,
                command.budget,
                command.country,
                &command.email,
                &command.website,
                Some(campaign.id()),
            )
            .await?;
        self.role_checker
            .check(&command.updated_by, ServiceName::Campaign)
            .await?;

        campaign.revise(
            command.name,
            command.product_id,
            command.channel_id,
            command.budget,
            country,
            email,
            website,
            command.updated_by,
        );
        if let Err(e) = self.campaigns.update(&campaign).await {
            error!(campaign = campaign.name(), error = %e, "campaign update failed");
            return Err(ValidationError::form(
                "An error occurred while updating the campaign.",
            )
            .into());
        }

        self.event_publisher.publish(campaign.take_events()).await?;

        info!(campaign = campaign.name(), "campaign updated");
        Ok(campaign)
    }

    async fn get_campaign(&self, id: &EntityId) -> Result<Option<Campaign>, CrmError> {
        Ok(self.campaigns.find_by_id(id).await?)
    }

    async fn list_campaigns(&self) -> Result<Vec<Campaign>, CrmError> {
        Ok(self.campaigns.find_all().await?)
    }

    async fn delete_campaign(&self, id: &EntityId, actor: &UserId) -> Result<(), CrmError> {
        self.role_checker
            .check(actor, ServiceName::Campaign)
            .await?;
        self.campaigns.delete(id).await?;
        info!(campaign_id = %id, "campaign deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::testing::{
        manager, marketer, role_checker, word_filter, StubProber,
    };
    use crate::domain::aggregates::{Country, Product, ProductStatus, PromotionChannel};
    use crate::infrastructure::persistence::{
        InMemoryCampaignRepository, InMemoryChannelRepository, InMemoryProductRepository,
        NoOpEventPublisher,
    };
    use crm_common::User;
    use rust_decimal::Decimal;

    struct Fixture {
        service: CampaignService,
        campaigns: Arc<InMemoryCampaignRepository>,
        product_id: EntityId,
        channel_id: EntityId,
        _file: tempfile::NamedTempFile,
    }

    async fn fixture(users: &[&User], prober: Arc<StubProber>) -> Fixture {
        let campaigns = Arc::new(InMemoryCampaignRepository::new());
        let products = Arc::new(InMemoryProductRepository::new());
        let channels = Arc::new(InMemoryChannelRepository::new());

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

        let channel = PromotionChannel::new("Search Engines", None);
        channels.insert(&channel).await.unwrap();

        let (filter, file) = word_filter("spam");
        let service = CampaignService::new(
            campaigns.clone(),
            products,
            channels,
            role_checker(users),
            filter,
            prober,
            Arc::new(NoOpEventPublisher),
        );

        Fixture {
            service,
            campaigns,
            product_id: product.id().clone(),
            channel_id: channel.id().clone(),
            _file: file,
        }
    }

    fn command(fx: &Fixture, created_by: &User) -> CreateCampaignCommand {
        CreateCampaignCommand {
            name: "Spring Launch".into(),
            product_id: fx.product_id.clone(),
            channel_id: fx.channel_id.clone(),
            budget: Decimal::new(5000, 0),
            country: Some(Country::Germany),
            email: "ads@example.com".into(),
            website: "example.com".into(),
            created_by: created_by.id().clone(),
        }
    }

    #[tokio::test]
    async fn test_create_campaign_normalizes_website() {
        let user = marketer();
        let fx = fixture(&[&user], StubProber::ok()).await;

        let campaign = fx.service.create_campaign(command(&fx, &user)).await.unwrap();

        assert_eq!(campaign.website().as_str(), "https://example.com");
        assert_eq!(fx.campaigns.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_http_website_rejected() {
        let user = marketer();
        let fx = fixture(&[&user], StubProber::ok()).await;

        let mut cmd = command(&fx, &user);
        cmd.website = "http://example.com".into();
        let err = fx.service.create_campaign(cmd).await.unwrap_err();

        assert_eq!(err.field_code(), Some("website"));
        assert!(err.to_string().contains("https"));
    }

    #[tokio::test]
    async fn test_budget_below_product_cost_rejected() {
        let user = marketer();
        let fx = fixture(&[&user], StubProber::ok()).await;

        let mut cmd = command(&fx, &user);
        cmd.budget = Decimal::new(999, 0);
        let err = fx.service.create_campaign(cmd).await.unwrap_err();

        assert_eq!(err.field_code(), Some("budget"));
    }

    #[tokio::test]
    async fn test_unreachable_website_fails_the_call() {
        let user = marketer();
        let fx = fixture(&[&user], StubProber::unreachable()).await;

        let err = fx
            .service
            .create_campaign(command(&fx, &user))
            .await
            .unwrap_err();

        assert!(matches!(err, CrmError::ExternalCheckFailed(_)));
        assert_eq!(fx.campaigns.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_non_2xx_website_fails_the_call() {
        let user = marketer();
        let fx = fixture(&[&user], StubProber::status(503)).await;

        let err = fx
            .service
            .create_campaign(command(&fx, &user))
            .await
            .unwrap_err();

        assert!(matches!(err, CrmError::ExternalCheckFailed(_)));
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let user = marketer();
        let fx = fixture(&[&user], StubProber::ok()).await;

        fx.service.create_campaign(command(&fx, &user)).await.unwrap();
        let err = fx
            .service
            .create_campaign(command(&fx, &user))
            .await
            .unwrap_err();

        assert_eq!(err.field_code(), Some("name"));
    }

    #[tokio::test]
    async fn test_manager_cannot_create_campaigns() {
        let user = manager();
        let fx = fixture(&[&user], StubProber::ok()).await;

        let err = fx
            .service
            .create_campaign(command(&fx, &user))
            .await
            .unwrap_err();

        assert!(matches!(err, CrmError::PermissionDenied(_)));
        assert_eq!(fx.campaigns.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let user = marketer();
        let fx = fixture(&[&user], StubProber::ok()).await;

        let mut cmd = command(&fx, &user);
        cmd.product_id = EntityId::new();
        let err = fx.service.create_campaign(cmd).await.unwrap_err();

        assert!(matches!(err, CrmError::NotFound("product")));
    }

    #[tokio::test]
    async fn test_bad_word_in_name() {
        let user = marketer();
        let fx = fixture(&[&user], StubProber::ok()).await;

        let mut cmd = command(&fx, &user);
        cmd.name = "Totally spam campaign".into();
        let err = fx.service.create_campaign(cmd).await.unwrap_err();

        assert_eq!(err.field_code(), Some("name"));
        assert!(matches!(err, CrmError::ForbiddenWord(_)));
    }

    #[tokio::test]
    async fn test_update_campaign_budget() {
        let user = marketer();
        let fx = fixture(&[&user], StubProber::ok()).await;

        let campaign = fx.service.create_campaign(command(&fx, &user)).await.unwrap();

        let updated = fx
            .service
            .update_campaign(UpdateCampaignCommand {
                campaign_id: campaign.id().clone(),
                name: "Spring Launch".into(),
                product_id: fx.product_id.clone(),
                channel_id: fx.channel_id.clone(),
                budget: Decimal::new(9000, 0),
                country: Some(Country::Germany),
                email: "ads@example.com".into(),
                website: "https://example.com".into(),
                updated_by: user.id().clone(),
            })
            .await
            .unwrap();

        assert_eq!(updated.budget(), Decimal::new(9000, 0));
        assert_eq!(updated.version(), 2);
    }
}
