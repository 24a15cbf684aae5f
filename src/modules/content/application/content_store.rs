use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::modules::content::application::ports::outgoing::{
    fetch_document, save_document, PersistenceError, ProjectRepository, SettingsRepository,
    SkillCategoryRepository,
};
use crate::modules::content::domain::entities::{
    generate_id, AboutContent, ContactContent, FooterContent, HeroContent, NewProject, Project,
    ServiceItem, SettingsDocument, SkillCategory,
};
use crate::modules::content::domain::project_patch::ProjectPatch;

/// Everything the store talks to.
#[derive(Clone)]
pub struct ContentGateways {
    pub projects: Arc<dyn ProjectRepository>,
    pub skills: Arc<dyn SkillCategoryRepository>,
    pub settings: Arc<dyn SettingsRepository>,
}

/// All site content as last persisted. Settings documents stay `None` until
/// first configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSnapshot {
    pub projects: Vec<Project>,
    pub skill_categories: Vec<SkillCategory>,
    pub services: Option<Vec<ServiceItem>>,
    pub hero_content: Option<HeroContent>,
    pub about_content: Option<AboutContent>,
    pub contact_content: Option<ContactContent>,
    pub footer_content: Option<FooterContent>,
}

/// `Loading` moves to exactly one of the other two and stays there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreState {
    Loading,
    Ready(ContentSnapshot),
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum StoreStatus {
    Loading,
    Ready,
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentStoreError {
    #[error("content is still loading")]
    NotReady,

    #[error("content failed to load: {0}")]
    LoadFailed(String),

    #[error("project not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub struct ContentStore {
    gateways: ContentGateways,
    state: RwLock<StoreState>,
    // Serializes load and mutators so read-modify-write sequences see their
    // own cache. Readers never take it.
    writer: Mutex<()>,
}

impl ContentStore {
    pub fn new(gateways: ContentGateways) -> Self {
        Self {
            gateways,
            state: RwLock::new(StoreState::Loading),
            writer: Mutex::new(()),
        }
    }

    // ──────────────────────────────────────────────────────
    // Lifecycle
    // ──────────────────────────────────────────────────────

    /// Fetches every entity kind concurrently. Any failure moves the store to
    /// `Failed` for good; calling again after the first settle is a no-op that
    /// reports the settled outcome.
    pub async fn load(&self) -> Result<(), ContentStoreError> {
        let _writer = self.writer.lock().await;

        match &*self.state.read().await {
            StoreState::Loading => {}
            StoreState::Ready(_) => return Ok(()),
            StoreState::Failed { message } => {
                return Err(ContentStoreError::LoadFailed(message.clone()))
            }
        }

        let settings = self.gateways.settings.as_ref();
        let fetched = tokio::try_join!(
            self.gateways.projects.fetch_all(),
            self.gateways.skills.fetch_all(),
            fetch_document::<Vec<ServiceItem>>(settings),
            fetch_document::<HeroContent>(settings),
            fetch_document::<AboutContent>(settings),
            fetch_document::<ContactContent>(settings),
            fetch_document::<FooterContent>(settings),
        );

        let mut state = self.state.write().await;
        match fetched {
            Ok((projects, skill_categories, services, hero, about, contact, footer)) => {
                tracing::info!(
                    projects = projects.len(),
                    skill_categories = skill_categories.len(),
                    "content loaded"
                );
                *state = StoreState::Ready(ContentSnapshot {
                    projects,
                    skill_categories,
                    services,
                    hero_content: hero,
                    about_content: about,
                    contact_content: contact,
                    footer_content: footer,
                });
                Ok(())
            }
            Err(err) => {
                let message = err.to_string();
                tracing::error!(error = %message, "content load failed");
                *state = StoreState::Failed {
                    message: message.clone(),
                };
                Err(ContentStoreError::LoadFailed(message))
            }
        }
    }

    pub async fn status(&self) -> StoreStatus {
        match &*self.state.read().await {
            StoreState::Loading => StoreStatus::Loading,
            StoreState::Ready(_) => StoreStatus::Ready,
            StoreState::Failed { message } => StoreStatus::Error {
                message: message.clone(),
            },
        }
    }

    pub async fn is_failed(&self) -> bool {
        matches!(*self.state.read().await, StoreState::Failed { .. })
    }

    // ──────────────────────────────────────────────────────
    // Reads
    // ──────────────────────────────────────────────────────

    pub async fn read<R>(
        &self,
        f: impl FnOnce(&ContentSnapshot) -> R,
    ) -> Result<R, ContentStoreError> {
        match &*self.state.read().await {
            StoreState::Ready(snapshot) => Ok(f(snapshot)),
            StoreState::Loading => Err(ContentStoreError::NotReady),
            StoreState::Failed { message } => Err(ContentStoreError::LoadFailed(message.clone())),
        }
    }

    pub async fn snapshot(&self) -> Result<ContentSnapshot, ContentStoreError> {
        self.read(|s| s.clone()).await
    }

    pub async fn projects(&self) -> Result<Vec<Project>, ContentStoreError> {
        self.read(|s| s.projects.clone()).await
    }

    pub async fn project(&self, id: &str) -> Result<Project, ContentStoreError> {
        self.read(|s| s.projects.iter().find(|p| p.id == id).cloned())
            .await?
            .ok_or_else(|| ContentStoreError::NotFound(id.to_string()))
    }

    pub async fn skill_categories(&self) -> Result<Vec<SkillCategory>, ContentStoreError> {
        self.read(|s| s.skill_categories.clone()).await
    }

    pub async fn search_projects(&self, query: &str) -> Result<Vec<Project>, ContentStoreError> {
        self.read(|s| {
            s.projects
                .iter()
                .filter(|p| matches_query(p, query))
                .cloned()
                .collect()
        })
        .await
    }

    // ──────────────────────────────────────────────────────
    // Mutators: persist first, then touch the cache
    // ──────────────────────────────────────────────────────

    pub async fn add_project(&self, input: NewProject) -> Result<Project, ContentStoreError> {
        let _writer = self.writer.lock().await;
        self.ensure_ready().await?;

        let project = input.into_project(generate_id("proj"), now_micros());
        self.gateways.projects.upsert(&project).await?;

        self.commit(|s| s.projects.insert(0, project.clone())).await;
        tracing::info!(project_id = %project.id, "project added");
        Ok(project)
    }

    pub async fn update_project(
        &self,
        id: &str,
        patch: ProjectPatch,
    ) -> Result<Project, ContentStoreError> {
        let _writer = self.writer.lock().await;
        let current = self.project(id).await?;

        let mut next = patch.apply(&current);
        next.updated_at = next_updated_at(current.updated_at, now_micros());

        self.gateways.projects.upsert(&next).await?;

        self.commit(|s| {
            if let Some(slot) = s.projects.iter_mut().find(|p| p.id == next.id) {
                *slot = next.clone();
            }
        })
        .await;
        tracing::info!(project_id = %next.id, "project updated");
        Ok(next)
    }

    /// Returns the removed record so callers can clean up what it referenced.
    pub async fn delete_project(&self, id: &str) -> Result<Project, ContentStoreError> {
        let _writer = self.writer.lock().await;
        let removed = self.project(id).await?;

        self.gateways.projects.remove(id).await?;

        self.commit(|s| s.projects.retain(|p| p.id != id)).await;
        tracing::info!(project_id = %id, "project deleted");
        Ok(removed)
    }

    /// Full-set replace: anything stored but absent from `categories` is
    /// deleted.
    pub async fn save_skill_categories(
        &self,
        categories: Vec<SkillCategory>,
    ) -> Result<Vec<SkillCategory>, ContentStoreError> {
        let _writer = self.writer.lock().await;
        self.ensure_ready().await?;

        self.gateways.skills.replace_all(&categories).await?;

        self.commit(|s| s.skill_categories = categories.clone()).await;
        Ok(categories)
    }

    pub async fn save_hero_content(&self, hero: HeroContent) -> Result<(), ContentStoreError> {
        self.save_setting(hero, |s| &mut s.hero_content).await
    }

    pub async fn save_about_content(&self, about: AboutContent) -> Result<(), ContentStoreError> {
        self.save_setting(about, |s| &mut s.about_content).await
    }

    pub async fn save_contact_content(
        &self,
        contact: ContactContent,
    ) -> Result<(), ContentStoreError> {
        self.save_setting(contact, |s| &mut s.contact_content).await
    }

    pub async fn save_services(&self, services: Vec<ServiceItem>) -> Result<(), ContentStoreError> {
        self.save_setting(services, |s| &mut s.services).await
    }

    pub async fn save_footer_content(
        &self,
        footer: FooterContent,
    ) -> Result<(), ContentStoreError> {
        self.save_setting(footer, |s| &mut s.footer_content).await
    }

    async fn save_setting<D: SettingsDocument>(
        &self,
        document: D,
        slot: impl FnOnce(&mut ContentSnapshot) -> &mut Option<D>,
    ) -> Result<(), ContentStoreError> {
        let _writer = self.writer.lock().await;
        self.ensure_ready().await?;

        save_document(self.gateways.settings.as_ref(), &document).await?;

        self.commit(|s| *slot(s) = Some(document)).await;
        Ok(())
    }

    async fn ensure_ready(&self) -> Result<(), ContentStoreError> {
        self.read(|_| ()).await
    }

    async fn commit(&self, f: impl FnOnce(&mut ContentSnapshot)) {
        if let StoreState::Ready(snapshot) = &mut *self.state.write().await {
            f(snapshot);
        }
    }
}

/// Postgres `timestamptz` keeps microseconds; anything finer would make the
/// cache disagree with a reload.
fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Strictly after `previous`, even when the clock has not moved.
fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(previous + Duration::milliseconds(1))
}

/// Case-insensitive match on title or any tag. A blank query matches all.
pub fn matches_query(project: &Project, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    project.title.to_lowercase().contains(&needle)
        || project
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}
