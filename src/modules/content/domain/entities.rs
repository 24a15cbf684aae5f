use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Builds a record identifier such as `proj-6f0c...`.
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

// ============================================================================
// Collections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A project as typed by the admin, before the store assigns identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub demo_link: Option<String>,
    #[serde(default)]
    pub code_link: Option<String>,
}

impl NewProject {
    /// createdAt and updatedAt start out identical.
    pub fn into_project(self, id: String, now: DateTime<Utc>) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            long_description: self.long_description,
            image: self.image,
            tags: self.tags,
            demo_link: self.demo_link,
            code_link: self.code_link,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillColorScheme {
    #[default]
    Blue,
    Purple,
    Emerald,
    Orange,
    Rose,
    Cyan,
}

impl SkillColorScheme {
    pub const ALL: [SkillColorScheme; 6] = [
        SkillColorScheme::Blue,
        SkillColorScheme::Purple,
        SkillColorScheme::Emerald,
        SkillColorScheme::Orange,
        SkillColorScheme::Rose,
        SkillColorScheme::Cyan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillColorScheme::Blue => "blue",
            SkillColorScheme::Purple => "purple",
            SkillColorScheme::Emerald => "emerald",
            SkillColorScheme::Orange => "orange",
            SkillColorScheme::Rose => "rose",
            SkillColorScheme::Cyan => "cyan",
        }
    }

    /// Unknown or missing tags fall back to blue.
    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::default();
        };
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str().eq_ignore_ascii_case(tag.trim()))
            .unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for SkillColorScheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_tag(tag.as_deref()))
    }
}

impl fmt::Display for SkillColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color_scheme: SkillColorScheme,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceIcon {
    #[default]
    Code,
    Server,
    Layers,
    Palette,
    Smartphone,
    Database,
    Cloud,
    Globe,
}

impl ServiceIcon {
    pub const ALL: [ServiceIcon; 8] = [
        ServiceIcon::Code,
        ServiceIcon::Server,
        ServiceIcon::Layers,
        ServiceIcon::Palette,
        ServiceIcon::Smartphone,
        ServiceIcon::Database,
        ServiceIcon::Cloud,
        ServiceIcon::Globe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceIcon::Code => "code",
            ServiceIcon::Server => "server",
            ServiceIcon::Layers => "layers",
            ServiceIcon::Palette => "palette",
            ServiceIcon::Smartphone => "smartphone",
            ServiceIcon::Database => "database",
            ServiceIcon::Cloud => "cloud",
            ServiceIcon::Globe => "globe",
        }
    }

    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::default();
        };
        Self::ALL
            .into_iter()
            .find(|icon| icon.as_str().eq_ignore_ascii_case(tag.trim()))
            .unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for ServiceIcon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_tag(tag.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: String,
    #[serde(default)]
    pub icon: ServiceIcon,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

// ============================================================================
// Settings documents
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroStat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub badge: String,
    /// Cycled by the typing effect on the landing section.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stats: Vec<HeroStat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    /// Free text, e.g. "2022 - Present".
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub id: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Github,
    Linkedin,
    Twitter,
    #[default]
    Other,
}

impl SocialPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::Github => "github",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Other => "other",
        }
    }

    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("github") => SocialPlatform::Github,
            Some("linkedin") => SocialPlatform::Linkedin,
            Some("twitter") => SocialPlatform::Twitter,
            _ => SocialPlatform::Other,
        }
    }
}

impl<'de> Deserialize<'de> for SocialPlatform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_tag(tag.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub platform: SocialPlatform,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactContent {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterContent {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author_name: String,
}

// ============================================================================
// Keys and kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsKey {
    Hero,
    About,
    Contact,
    Services,
    Footer,
}

impl SettingsKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsKey::Hero => "hero",
            SettingsKey::About => "about",
            SettingsKey::Contact => "contact",
            SettingsKey::Services => "services",
            SettingsKey::Footer => "footer",
        }
    }
}

impl fmt::Display for SettingsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Project,
    SkillCategory,
    Setting(SettingsKey),
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Project => f.write_str("project"),
            EntityKind::SkillCategory => f.write_str("skill category"),
            EntityKind::Setting(key) => write!(f, "{} settings", key),
        }
    }
}

impl From<SettingsKey> for EntityKind {
    fn from(key: SettingsKey) -> Self {
        EntityKind::Setting(key)
    }
}

/// A singleton settings document stored under a fixed key.
pub trait SettingsDocument:
    Serialize + serde::de::DeserializeOwned + Clone + Send + Sync + 'static
{
    const KEY: SettingsKey;
}

impl SettingsDocument for HeroContent {
    const KEY: SettingsKey = SettingsKey::Hero;
}

impl SettingsDocument for AboutContent {
    const KEY: SettingsKey = SettingsKey::About;
}

impl SettingsDocument for ContactContent {
    const KEY: SettingsKey = SettingsKey::Contact;
}

impl SettingsDocument for Vec<ServiceItem> {
    const KEY: SettingsKey = SettingsKey::Services;
}

impl SettingsDocument for FooterContent {
    const KEY: SettingsKey = SettingsKey::Footer;
}
