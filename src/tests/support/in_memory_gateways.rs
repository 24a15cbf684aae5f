use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::modules::content::application::content_store::ContentGateways;
use crate::modules::content::application::ports::outgoing::{
    Operation, PersistenceError, ProjectRepository, SettingsRepository, SkillCategoryRepository,
};
use crate::modules::content::domain::entities::{
    EntityKind, Project, SettingsDocument, SettingsKey, SkillCategory,
};

fn injected(operation: Operation, entity: EntityKind) -> PersistenceError {
    PersistenceError::database(operation, entity, "injected failure")
}

// ──────────────────────────────────────────────────────────
// Projects
// ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryProjects {
    rows: Mutex<Vec<Project>>,
    failing: Mutex<HashSet<Operation>>,
    upserts: Mutex<Vec<Project>>,
    removals: Mutex<Vec<String>>,
}

impl InMemoryProjects {
    pub fn with(rows: Vec<Project>) -> Self {
        let repo = Self::default();
        *repo.rows.lock().unwrap() = rows;
        repo
    }

    pub fn fail_on(&self, op: Operation) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn stored(&self) -> Vec<Project> {
        self.rows.lock().unwrap().clone()
    }

    pub fn upsert_calls(&self) -> Vec<Project> {
        self.upserts.lock().unwrap().clone()
    }

    pub fn removal_calls(&self) -> Vec<String> {
        self.removals.lock().unwrap().clone()
    }

    fn check(&self, op: Operation) -> Result<(), PersistenceError> {
        if self.failing.lock().unwrap().contains(&op) {
            return Err(injected(op, EntityKind::Project));
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjects {
    async fn fetch_all(&self) -> Result<Vec<Project>, PersistenceError> {
        self.check(Operation::FetchAll)?;
        let mut rows = self.stored();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn upsert(&self, project: &Project) -> Result<(), PersistenceError> {
        self.upserts.lock().unwrap().push(project.clone());
        self.check(Operation::Upsert)?;

        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project.clone(),
            None => rows.push(project.clone()),
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), PersistenceError> {
        self.removals.lock().unwrap().push(id.to_string());
        self.check(Operation::Remove)?;
        self.rows.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

// ──────────────────────────────────────────────────────────
// Skill categories
// ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemorySkillCategories {
    rows: Mutex<Vec<SkillCategory>>,
    failing: Mutex<HashSet<Operation>>,
}

impl InMemorySkillCategories {
    pub fn with(rows: Vec<SkillCategory>) -> Self {
        let repo = Self::default();
        *repo.rows.lock().unwrap() = rows;
        repo
    }

    pub fn fail_on(&self, op: Operation) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn stored(&self) -> Vec<SkillCategory> {
        self.rows.lock().unwrap().clone()
    }

    fn check(&self, op: Operation) -> Result<(), PersistenceError> {
        if self.failing.lock().unwrap().contains(&op) {
            return Err(injected(op, EntityKind::SkillCategory));
        }
        Ok(())
    }
}

#[async_trait]
impl SkillCategoryRepository for InMemorySkillCategories {
    async fn fetch_all(&self) -> Result<Vec<SkillCategory>, PersistenceError> {
        self.check(Operation::FetchAll)?;
        Ok(self.stored())
    }

    async fn upsert(&self, category: &SkillCategory) -> Result<(), PersistenceError> {
        self.check(Operation::Upsert)?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category.clone(),
            None => rows.push(category.clone()),
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), PersistenceError> {
        self.check(Operation::Remove)?;
        self.rows.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn replace_all(&self, categories: &[SkillCategory]) -> Result<(), PersistenceError> {
        self.check(Operation::ReplaceAll)?;
        *self.rows.lock().unwrap() = categories.to_vec();
        Ok(())
    }
}

// ──────────────────────────────────────────────────────────
// Settings
// ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemorySettings {
    values: Mutex<HashMap<SettingsKey, Value>>,
    failing_fetch: Mutex<HashSet<SettingsKey>>,
    failing_save: Mutex<HashSet<SettingsKey>>,
}

impl InMemorySettings {
    pub fn put<D: SettingsDocument>(&self, document: &D) {
        let value = serde_json::to_value(document).unwrap();
        self.values.lock().unwrap().insert(D::KEY, value);
    }

    pub fn get<D: SettingsDocument>(&self) -> Option<D> {
        self.values
            .lock()
            .unwrap()
            .get(&D::KEY)
            .cloned()
            .map(|v| serde_json::from_value(v).unwrap())
    }

    pub fn raw(&self, key: SettingsKey) -> Option<Value> {
        self.values.lock().unwrap().get(&key).cloned()
    }

    pub fn fail_fetch_of(&self, key: SettingsKey) {
        self.failing_fetch.lock().unwrap().insert(key);
    }

    pub fn fail_save_of(&self, key: SettingsKey) {
        self.failing_save.lock().unwrap().insert(key);
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettings {
    async fn fetch(&self, key: SettingsKey) -> Result<Option<Value>, PersistenceError> {
        if self.failing_fetch.lock().unwrap().contains(&key) {
            return Err(injected(Operation::FetchOne, key.into()));
        }
        Ok(self.raw(key))
    }

    async fn save(&self, key: SettingsKey, value: Value) -> Result<(), PersistenceError> {
        if self.failing_save.lock().unwrap().contains(&key) {
            return Err(injected(Operation::Upsert, key.into()));
        }
        self.values.lock().unwrap().insert(key, value);
        Ok(())
    }
}

// ──────────────────────────────────────────────────────────
// Bundle
// ──────────────────────────────────────────────────────────

/// Keeps typed handles on the fakes next to the trait-object bundle the
/// store consumes.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    pub projects: Arc<InMemoryProjects>,
    pub skills: Arc<InMemorySkillCategories>,
    pub settings: Arc<InMemorySettings>,
}

impl InMemoryBackend {
    pub fn gateways(&self) -> ContentGateways {
        ContentGateways {
            projects: self.projects.clone(),
            skills: self.skills.clone(),
            settings: self.settings.clone(),
        }
    }
}
