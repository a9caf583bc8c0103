use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geo::{RetryPolicy, DEFAULT_GEO_ENDPOINT};

pub const DEFAULT_RETRY_COUNT: u32 = 2;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    TikTok,
    Telegram,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::Telegram => "Telegram",
        }
    }

    pub fn background_class(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram-gradient",
            Platform::TikTok => "bg-black",
            Platform::Telegram => "bg-[#0088CC]",
        }
    }

    pub fn glow_class(self) -> &'static str {
        match self {
            Platform::Instagram => "glow-insta",
            Platform::TikTok => "glow-tiktok",
            Platform::Telegram => "glow-telegram",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: Platform,
    pub href: String,
}

impl SocialLink {
    pub fn new(platform: Platform, href: impl Into<String>) -> Self {
        Self {
            platform,
            href: href.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCardConfig {
    pub href: String,
    pub label: String,
    pub title: String,
    pub emoji: String,
}

/// Everything the landing page displays, handed to the view when it is built.
///
/// Missing fields in a serialized document fall back to [`PageConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub hero_image_url: String,
    pub display_name: String,
    pub handle: String,
    pub bio: Vec<String>,
    pub geo_endpoint: String,
    pub retry_count: u32,
    pub retry_delay_ms: u64,
    pub social_links: Vec<SocialLink>,
    pub content_cards: Vec<ContentCardConfig>,
    pub copyright_year: String,
}

impl PageConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retry_count,
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    pub fn footer_text(&self) -> String {
        format!(
            "COPYRIGHT © {} • {}",
            self.copyright_year,
            self.handle.to_uppercase()
        )
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            hero_image_url: "https://files.catbox.moe/uqsxbk.jpg".to_string(),
            display_name: "Maya Privée".to_string(),
            handle: "@maya_reserve".to_string(),
            bio: vec![
                "Só 22 anos...🎀".to_string(),
                "Vem ver meu lado mais doce (e o mais escondido também) ✨".to_string(),
            ],
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            retry_count: DEFAULT_RETRY_COUNT,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            social_links: vec![
                SocialLink::new(Platform::Instagram, "#"),
                SocialLink::new(Platform::TikTok, "#"),
                SocialLink::new(Platform::Telegram, "#"),
            ],
            content_cards: vec![
                ContentCardConfig {
                    href: "https://t.me/Maya_Privee_bot".to_string(),
                    label: "Tô Online".to_string(),
                    title: "Me chama no Privado...".to_string(),
                    emoji: "👀".to_string(),
                },
                ContentCardConfig {
                    href: "#".to_string(),
                    label: "CONTEÚDO COMPLETO".to_string(),
                    title: "0nlyf4ns".to_string(),
                    emoji: "💎".to_string(),
                },
            ],
            copyright_year: env!("BUILD_YEAR").to_string(),
        }
    }
}
