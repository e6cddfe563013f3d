//! Promotion channel seeding
//!
//! Deployments call this once at bootstrap; running it again is a no-op
//! for channels that already exist.

use tracing::info;

use crate::domain::aggregates::PromotionChannel;
use crate::ports::outbound::{ChannelRepository, RepositoryError};

/// Insert the standard nine-channel vocabulary, skipping names that are
/// already present. Returns how many channels were created.
pub async fn seed_standard_channels(
    channels: &dyn ChannelRepository,
) -> Result<usize, RepositoryError> {
    let mut created = 0;
    for channel in PromotionChannel::standard_set() {
        if channels.find_by_name(channel.name()).await?.is_some() {
            continue;
        }
        channels.insert(&channel).await?;
        info!(channel = channel.name(), "promotion channel created");
        created += 1;
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryChannelRepository;

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let repo = InMemoryChannelRepository::new();

        assert_eq!(seed_standard_channels(&repo).await.unwrap(), 9);
        // Second run finds everything in place.
        assert_eq!(seed_standard_channels(&repo).await.unwrap(), 0);
        assert_eq!(repo.find_all().await.unwrap().len(), 9);
    }
}
