//! Serde model of the persisted document.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::defaults;

/// Free-form named fields of a singleton section or a record.
pub type Fields = Map<String, Value>;

// =============================================================================
// Document
// =============================================================================

/// The single persisted document: admin users plus all site content.
///
/// Users and content share one file but not one type, so the public content
/// endpoint can serialize [`SiteContent`] without ever touching credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Administrators allowed to log in (one is seeded)
    #[serde(default)]
    pub users: Vec<User>,

    /// Everything the public site renders
    #[serde(flatten)]
    pub content: SiteContent,
}

impl Document {
    /// Build the seeded document with one `admin` user holding `admin_password_hash`.
    pub fn seeded(admin_password_hash: impl Into<String>) -> Self {
        Self {
            users: vec![defaults::admin_user(admin_password_hash.into())],
            content: SiteContent::default(),
        }
    }
}

/// An administrator account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    /// bcrypt hash, stored under `password`
    #[serde(rename = "password", alias = "passwordHash")]
    pub password_hash: String,
    #[serde(default)]
    pub email: String,
}

/// Public view of a [`User`] (no hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: u64,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

// =============================================================================
// Site Content
// =============================================================================

/// All public site sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    #[serde(default = "defaults::hero")]
    pub hero: Fields,

    #[serde(default = "defaults::stats")]
    pub stats: Vec<Stat>,

    #[serde(default = "defaults::stats_description")]
    pub stats_description: String,

    #[serde(default = "defaults::services")]
    pub services: Vec<Record>,

    #[serde(default = "defaults::doctors")]
    pub doctors: Vec<Record>,

    #[serde(default = "defaults::reviews")]
    pub reviews: Vec<Record>,

    #[serde(default = "defaults::faqs")]
    pub faqs: Vec<Record>,

    #[serde(default = "defaults::contact")]
    pub contact: Fields,

    #[serde(default = "defaults::services_page")]
    pub services_page: Fields,

    #[serde(default = "defaults::contact_page")]
    pub contact_page: Fields,

    #[serde(default = "defaults::site_settings")]
    pub site_settings: Fields,

    #[serde(default = "defaults::header_visibility")]
    pub header_visibility: Visibility,

    #[serde(default = "defaults::footer_visibility")]
    pub footer_visibility: Visibility,

    /// Top-level keys this version does not know about, kept across rewrites
    #[serde(flatten)]
    pub extra: Fields,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            hero: defaults::hero(),
            stats: defaults::stats(),
            stats_description: defaults::stats_description(),
            services: defaults::services(),
            doctors: defaults::doctors(),
            reviews: defaults::reviews(),
            faqs: defaults::faqs(),
            contact: defaults::contact(),
            services_page: defaults::services_page(),
            contact_page: defaults::contact_page(),
            site_settings: defaults::site_settings(),
            header_visibility: defaults::header_visibility(),
            footer_visibility: defaults::footer_visibility(),
            extra: Fields::new(),
        }
    }
}

/// One headline figure, e.g. `1k` `+` "Patients treated".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub label: String,
}

impl Stat {
    pub fn new(value: &str, suffix: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            suffix: suffix.to_string(),
            label: label.to_string(),
        }
    }
}

/// An identified entry of a collection section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(deserialize_with = "record_id")]
    pub id: u64,

    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    pub fn new(id: u64, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// String value of a field, if present and a string.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// Ids as older documents may hold them: `7`, `7.0` or `"7"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredId {
    Integer(u64),
    Float(f64),
    Text(String),
}

fn record_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match StoredId::deserialize(deserializer)? {
        StoredId::Integer(id) => Ok(id),
        StoredId::Float(id) if id >= 0.0 && id.fract() == 0.0 && id < u64::MAX as f64 => {
            Ok(id as u64)
        }
        StoredId::Float(id) => Err(D::Error::custom(format!(
            "record id {} is not a whole number",
            id
        ))),
        StoredId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("record id {:?} is not a number", text))),
    }
}

// =============================================================================
// Visibility
// =============================================================================

/// Responsive layout width thresholds used as visibility keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Breakpoint {
    #[serde(rename = "1600")]
    W1600,
    #[serde(rename = "1400")]
    W1400,
    #[serde(rename = "1200")]
    W1200,
    #[serde(rename = "1024")]
    W1024,
    #[serde(rename = "768")]
    W768,
    #[serde(rename = "480")]
    W480,
}

impl Breakpoint {
    /// Every breakpoint, widest first.
    pub const ALL: [Breakpoint; 6] = [
        Breakpoint::W1600,
        Breakpoint::W1400,
        Breakpoint::W1200,
        Breakpoint::W1024,
        Breakpoint::W768,
        Breakpoint::W480,
    ];

    /// Width in CSS pixels.
    pub fn width(self) -> u32 {
        match self {
            Breakpoint::W1600 => 1600,
            Breakpoint::W1400 => 1400,
            Breakpoint::W1200 => 1200,
            Breakpoint::W1024 => 1024,
            Breakpoint::W768 => 768,
            Breakpoint::W480 => 480,
        }
    }
}

/// Per-element, per-breakpoint visibility toggles for the header or footer.
///
/// A missing element or breakpoint means visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Visibility(BTreeMap<String, BTreeMap<Breakpoint, bool>>);

impl Visibility {
    /// Every listed element visible at every breakpoint.
    pub fn all_visible<'a>(elements: impl IntoIterator<Item = &'a str>) -> Self {
        let map = elements
            .into_iter()
            .map(|element| {
                let toggles = Breakpoint::ALL.iter().map(|bp| (*bp, true)).collect();
                (element.to_string(), toggles)
            })
            .collect();
        Self(map)
    }

    pub fn is_visible(&self, element: &str, breakpoint: Breakpoint) -> bool {
        self.0
            .get(element)
            .and_then(|toggles| toggles.get(&breakpoint))
            .copied()
            .unwrap_or(true)
    }

    pub fn set(&mut self, element: &str, breakpoint: Breakpoint, visible: bool) {
        self.0
            .entry(element.to_string())
            .or_default()
            .insert(breakpoint, visible);
    }

    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
