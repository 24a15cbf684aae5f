use serde::{Deserialize, Serialize};

use crate::content::domain::entities::{
    generate_id, AboutContent, ContactContent, EducationItem, Experience, FooterContent,
    HeroContent, HeroStat, NewProject, Project, ServiceIcon, ServiceItem, SkillCategory,
    SkillColorScheme, SocialLink, SocialPlatform,
};
use crate::content::domain::project_patch::{PatchField, ProjectPatch};

/// A hard precondition that failed before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// A partial project update must change something and must not leave the
/// record without a title.
pub fn validate_patch(patch: &ProjectPatch, current: &Project) -> Result<(), ValidationError> {
    if patch.is_empty() {
        return Err(ValidationError::new("patch", "Nothing to update."));
    }
    if patch.resulting_title(current).trim().is_empty() {
        return Err(ValidationError::new("title", "Title is required."));
    }
    Ok(())
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims, drops blanks, keeps the first occurrence of each entry.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        push_unique(&mut out, &item);
    }
    out
}

fn push_unique(list: &mut Vec<String>, raw: &str) -> bool {
    let value = raw.trim();
    if value.is_empty() || list.iter().any(|v| v == value) {
        return false;
    }
    list.push(value.to_string());
    true
}

// ============================================================================
// Project
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDraft {
    title: String,
    description: String,
    long_description: String,
    image: Option<String>,
    tags: Vec<String>,
    demo_link: Option<String>,
    code_link: Option<String>,
}

impl ProjectDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            long_description: project.long_description.clone(),
            image: project.image.clone(),
            tags: project.tags.clone(),
            demo_link: project.demo_link.clone(),
            code_link: project.code_link.clone(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_long_description(&mut self, long_description: impl Into<String>) {
        self.long_description = long_description.into();
    }

    /// An empty string clears the field.
    pub fn set_image(&mut self, url: impl Into<String>) {
        self.image = blank_to_none(Some(url.into()));
    }

    pub fn set_demo_link(&mut self, url: impl Into<String>) {
        self.demo_link = blank_to_none(Some(url.into()));
    }

    pub fn set_code_link(&mut self, url: impl Into<String>) {
        self.code_link = blank_to_none(Some(url.into()));
    }

    /// Returns false for blanks and duplicates.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        push_unique(&mut self.tags, tag)
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new("title", "Title is required."));
        }
        Ok(())
    }

    fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description,
            long_description: self.long_description,
            image: blank_to_none(self.image),
            tags: clean_list(self.tags),
            demo_link: blank_to_none(self.demo_link),
            code_link: blank_to_none(self.code_link),
        }
    }

    pub fn into_new_project(self) -> NewProject {
        let d = self.normalized();
        NewProject {
            title: d.title,
            description: d.description,
            long_description: d.long_description,
            image: d.image,
            tags: d.tags,
            demo_link: d.demo_link,
            code_link: d.code_link,
        }
    }

    /// Every editable field, so the saved record mirrors the draft exactly.
    pub fn into_patch(self) -> ProjectPatch {
        fn optional(value: Option<String>) -> PatchField<String> {
            value.map_or(PatchField::Null, PatchField::Value)
        }

        let d = self.normalized();
        ProjectPatch {
            title: PatchField::Value(d.title),
            description: PatchField::Value(d.description),
            long_description: PatchField::Value(d.long_description),
            image: optional(d.image),
            tags: PatchField::Value(d.tags),
            demo_link: optional(d.demo_link),
            code_link: optional(d.code_link),
        }
    }
}

// ============================================================================
// Skill category
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryDraft {
    name: String,
    color_scheme: SkillColorScheme,
    skills: Vec<String>,
}

impl CategoryDraft {
    pub fn from_category(category: &SkillCategory) -> Self {
        Self {
            name: category.name.clone(),
            color_scheme: category.color_scheme,
            skills: category.skills.clone(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_color_scheme(&mut self, scheme: SkillColorScheme) {
        self.color_scheme = scheme;
    }

    pub fn add_skill(&mut self, skill: &str) -> bool {
        push_unique(&mut self.skills, skill)
    }

    pub fn remove_skill(&mut self, skill: &str) {
        self.skills.retain(|s| s != skill);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "Category name is required."));
        }
        Ok(())
    }

    pub fn into_category(self, id: String) -> SkillCategory {
        SkillCategory {
            id,
            name: self.name.trim().to_string(),
            color_scheme: self.color_scheme,
            skills: clean_list(self.skills),
        }
    }
}

// ============================================================================
// Hero
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroDraft(HeroContent);

impl HeroDraft {
    /// Starts from the stored document, or an empty one when unconfigured.
    pub fn from_stored(stored: Option<&HeroContent>) -> Self {
        Self(stored.cloned().unwrap_or_default())
    }

    pub fn content(&self) -> &HeroContent {
        &self.0
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.0.name = name.into();
    }

    pub fn set_badge(&mut self, badge: impl Into<String>) {
        self.0.badge = badge.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.0.description = description.into();
    }

    pub fn add_role(&mut self, role: &str) -> bool {
        push_unique(&mut self.0.roles, role)
    }

    pub fn remove_role(&mut self, role: &str) {
        self.0.roles.retain(|r| r != role);
    }

    pub fn add_stat(&mut self, value: impl Into<String>, label: impl Into<String>) {
        self.0.stats.push(HeroStat {
            value: value.into(),
            label: label.into(),
        });
    }

    pub fn remove_stat(&mut self, index: usize) {
        if index < self.0.stats.len() {
            self.0.stats.remove(index);
        }
    }

    pub fn set_profile_image(&mut self, url: Option<String>) {
        self.0.profile_image = blank_to_none(url);
    }

    pub fn set_resume_url(&mut self, url: Option<String>) {
        self.0.resume_url = blank_to_none(url);
    }

    pub fn into_content(self) -> HeroContent {
        let mut hero = self.0;
        hero.roles = clean_list(hero.roles);
        hero.profile_image = blank_to_none(hero.profile_image);
        hero.resume_url = blank_to_none(hero.resume_url);
        hero
    }
}

// ============================================================================
// About (bio, experience, education)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AboutDraft(AboutContent);

impl AboutDraft {
    pub fn from_stored(stored: Option<&AboutContent>) -> Self {
        Self(stored.cloned().unwrap_or_default())
    }

    pub fn content(&self) -> &AboutContent {
        &self.0
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.0.paragraphs.push(text.into());
    }

    pub fn set_paragraph(&mut self, index: usize, text: impl Into<String>) {
        if let Some(p) = self.0.paragraphs.get_mut(index) {
            *p = text.into();
        }
    }

    pub fn remove_paragraph(&mut self, index: usize) {
        if index < self.0.paragraphs.len() {
            self.0.paragraphs.remove(index);
        }
    }

    /// Appends a blank entry and returns its id.
    pub fn add_experience(&mut self) -> String {
        let id = generate_id("exp");
        self.0.experiences.push(Experience {
            id: id.clone(),
            ..Experience::default()
        });
        id
    }

    pub fn experience_mut(&mut self, id: &str) -> Option<&mut Experience> {
        self.0.experiences.iter_mut().find(|e| e.id == id)
    }

    pub fn remove_experience(&mut self, id: &str) {
        self.0.experiences.retain(|e| e.id != id);
    }

    pub fn add_education(&mut self) -> String {
        let id = generate_id("edu");
        self.0.education.push(EducationItem {
            id: id.clone(),
            ..EducationItem::default()
        });
        id
    }

    pub fn education_mut(&mut self, id: &str) -> Option<&mut EducationItem> {
        self.0.education.iter_mut().find(|e| e.id == id)
    }

    pub fn remove_education(&mut self, id: &str) {
        self.0.education.retain(|e| e.id != id);
    }

    pub fn into_content(self) -> AboutContent {
        let mut about = self.0;
        for exp in &mut about.experiences {
            exp.image = blank_to_none(exp.image.take());
        }
        for edu in &mut about.education {
            edu.image = blank_to_none(edu.image.take());
        }
        about
    }
}

// ============================================================================
// Contact
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactDraft(ContactContent);

impl ContactDraft {
    pub fn from_stored(stored: Option<&ContactContent>) -> Self {
        Self(stored.cloned().unwrap_or_default())
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.0.email = email.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.0.phone = phone.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.0.location = location.into();
    }

    /// New links start as GitHub with an empty URL.
    pub fn add_social(&mut self) -> String {
        let id = generate_id("soc");
        self.0.socials.push(SocialLink {
            id: id.clone(),
            name: "GitHub".to_string(),
            url: String::new(),
            platform: SocialPlatform::Github,
        });
        id
    }

    pub fn social_mut(&mut self, id: &str) -> Option<&mut SocialLink> {
        self.0.socials.iter_mut().find(|s| s.id == id)
    }

    pub fn remove_social(&mut self, id: &str) {
        self.0.socials.retain(|s| s.id != id);
    }

    pub fn into_content(self) -> ContactContent {
        self.0
    }
}

// ============================================================================
// Services
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServicesDraft(Vec<ServiceItem>);

impl ServicesDraft {
    pub fn from_stored(stored: Option<&[ServiceItem]>) -> Self {
        Self(stored.map(<[ServiceItem]>::to_vec).unwrap_or_default())
    }

    pub fn add_service(&mut self, icon: ServiceIcon, title: impl Into<String>) -> String {
        let id = generate_id("svc");
        self.0.push(ServiceItem {
            id: id.clone(),
            icon,
            title: title.into(),
            description: String::new(),
        });
        id
    }

    pub fn service_mut(&mut self, id: &str) -> Option<&mut ServiceItem> {
        self.0.iter_mut().find(|s| s.id == id)
    }

    pub fn remove_service(&mut self, id: &str) {
        self.0.retain(|s| s.id != id);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.0.iter().any(|s| s.title.trim().is_empty()) {
            return Err(ValidationError::new("title", "Service title is required."));
        }
        Ok(())
    }

    pub fn into_items(self) -> Vec<ServiceItem> {
        self.0
    }
}

// ============================================================================
// Footer
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FooterDraft(FooterContent);

impl FooterDraft {
    pub fn from_stored(stored: Option<&FooterContent>) -> Self {
        Self(stored.cloned().unwrap_or_default())
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.0.text = text.into();
    }

    pub fn set_author_name(&mut self, name: impl Into<String>) {
        self.0.author_name = name.into();
    }

    pub fn into_content(self) -> FooterContent {
        self.0
    }
}
