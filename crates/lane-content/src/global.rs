//! Site-wide settings from the CMS "global" single type.
//!
//! Decoding always yields a complete [`Global`], so callers never branch on
//! missing site chrome. The raw payload is normalized the same way content
//! blocks are: empty strings count as absent and fall back.

use serde::{Deserialize, Deserializer};

use crate::blocks::null_or_default;
use crate::page::Seo;

/// Site chrome and shared settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    pub site_name: String,
    pub tagline: String,
    /// Displayed in the header and the chat auto-reply.
    pub phone: String,
    pub nav: Vec<NavItem>,
    pub footer_text: String,
    pub chat: ChatSettings,
    /// Fallback SEO for pages without their own.
    pub default_seo: Option<Seo>,
}

/// One header navigation entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NavItem {
    #[serde(default, deserialize_with = "null_or_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_or_default")]
    pub href: String,
}

impl NavItem {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_owned(),
            href: href.to_owned(),
        }
    }
}

/// Chat widget copy and timing.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    /// First message shown when the widget opens.
    pub greeting: String,
    /// Canned auto-response to every user message.
    pub reply: String,
    /// Delay before the auto-response appears, in milliseconds.
    pub reply_delay_ms: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawGlobal {
    site_name: Option<String>,
    tagline: Option<String>,
    phone: Option<String>,
    nav: Option<Vec<NavItem>>,
    footer_text: Option<String>,
    chat: Option<RawChatSettings>,
    default_seo: Option<Seo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawChatSettings {
    greeting: Option<String>,
    reply: Option<String>,
    reply_delay_ms: Option<u64>,
}

fn or_default(value: Option<String>, fallback: fn() -> String) -> String {
    value.filter(|s| !s.is_empty()).unwrap_or_else(fallback)
}

impl From<RawGlobal> for Global {
    fn from(raw: RawGlobal) -> Self {
        Self {
            site_name: or_default(raw.site_name, defaults::site_name),
            tagline: or_default(raw.tagline, defaults::tagline),
            phone: or_default(raw.phone, defaults::phone),
            nav: raw
                .nav
                .filter(|n| !n.is_empty())
                .unwrap_or_else(defaults::nav),
            footer_text: or_default(raw.footer_text, defaults::footer_text),
            chat: raw.chat.unwrap_or_default().into(),
            default_seo: raw.default_seo,
        }
    }
}

impl From<RawChatSettings> for ChatSettings {
    fn from(raw: RawChatSettings) -> Self {
        Self {
            greeting: or_default(raw.greeting, defaults::chat_greeting),
            reply: or_default(raw.reply, defaults::chat_reply),
            reply_delay_ms: raw.reply_delay_ms.unwrap_or(defaults::CHAT_REPLY_DELAY_MS),
        }
    }
}

impl Default for Global {
    fn default() -> Self {
        RawGlobal::default().into()
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        RawChatSettings::default().into()
    }
}

impl<'de> Deserialize<'de> for Global {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawGlobal::deserialize(deserializer).map(Self::from)
    }
}

impl<'de> Deserialize<'de> for ChatSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawChatSettings::deserialize(deserializer).map(Self::from)
    }
}

mod defaults {
    use super::NavItem;

    pub(super) const CHAT_REPLY_DELAY_MS: u64 = 1200;

    pub(super) fn site_name() -> String {
        "Lane Auto Transport".to_owned()
    }

    pub(super) fn tagline() -> String {
        "Door-to-door auto transport, coast to coast.".to_owned()
    }

    pub(super) fn phone() -> String {
        "(800) 555-0144".to_owned()
    }

    pub(super) fn nav() -> Vec<NavItem> {
        vec![
            NavItem::new("Home", "/"),
            NavItem::new("How It Works", "/how-it-works"),
            NavItem::new("Pricing", "/pricing"),
            NavItem::new("Blog", "/blog"),
            NavItem::new("About", "/about"),
            NavItem::new("Contact", "/contact"),
        ]
    }

    pub(super) fn footer_text() -> String {
        "Licensed, bonded, and insured. FMCSA-registered broker.".to_owned()
    }

    pub(super) fn chat_greeting() -> String {
        "Hi there! Have a question about shipping your vehicle?".to_owned()
    }

    pub(super) fn chat_reply() -> String {
        "Thanks for reaching out! A shipping specialist will reply shortly. For anything urgent, call (800) 555-0144.".to_owned()
    }
}
