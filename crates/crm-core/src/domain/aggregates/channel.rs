//! Promotion channel
//!
//! Reference vocabulary for campaigns. Deployments seed the standard set
//! once and may add their own entries; names are unique.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::EntityId;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PromotionChannel {
    id: EntityId,
    name: String,
    description: Option<String>,
}

impl PromotionChannel {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            description,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The standard nine-channel vocabulary
    pub fn standard_set() -> Vec<PromotionChannel> {
        [
            (
                "Social Media",
                "Promotion through social networks like Facebook, Instagram, etc.",
            ),
            (
                "Search Engines",
                "Promotion through search engines like Google, Bing, etc.",
            ),
            ("Email Marketing", "Promotion through email newsletters."),
            (
                "Contextual Advertising",
                "Promotion through contextual ads on websites.",
            ),
            (
                "Display Advertising",
                "Promotion through display ads on websites.",
            ),
            (
                "Offline Channels",
                "Promotion through offline methods like billboards, flyers, etc.",
            ),
            (
                "Partnership Programs",
                "Promotion through partnerships with other companies.",
            ),
            (
                "Messengers",
                "Promotion through messaging apps like WhatsApp, Telegram, etc.",
            ),
            (
                "Own Channels",
                "Promotion through company-owned channels like blogs, websites, etc.",
            ),
        ]
        .into_iter()
        .map(|(name, description)| PromotionChannel::new(name, Some(description.to_string())))
        .collect()
    }
}
