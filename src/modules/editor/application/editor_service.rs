use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;

use crate::content::application::content_store::ContentStoreError;
use crate::content::application::store_handle::ContentStoreHandle;
use crate::content::domain::entities::{generate_id, AboutContent, Project, SkillCategory};
use crate::content::domain::project_patch::ProjectPatch;
use crate::editor::domain::drafts::{
    validate_patch, AboutDraft, CategoryDraft, ContactDraft, FooterDraft, HeroDraft, ProjectDraft,
    ServicesDraft, ValidationError,
};
use crate::editor::domain::section_status::{AboutSection, Section, SectionBoard, Toast};
use crate::multimedia::application::asset_upload_service::AssetUploadService;
use crate::multimedia::application::domain::entities::AssetFolder;
use crate::multimedia::application::ports::outgoing::blob_storage::{CleanupOutcome, UploadError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] ContentStoreError),
}

/// Save flows behind the admin screen. Each save validates locally, marks
/// its section busy, goes through the content store and leaves a toast on
/// that section only. Replaced images are removed afterwards, best-effort.
#[derive(Clone)]
pub struct AdminEditor {
    content: Arc<ContentStoreHandle>,
    uploads: Arc<AssetUploadService>,
    board: SectionBoard,
}

impl AdminEditor {
    pub fn new(content: Arc<ContentStoreHandle>, uploads: Arc<AssetUploadService>) -> Self {
        Self {
            content,
            uploads,
            board: SectionBoard::new(),
        }
    }

    pub fn board(&self) -> &SectionBoard {
        &self.board
    }

    // ──────────────────────────────────────────────────────
    // Projects
    // ──────────────────────────────────────────────────────

    pub async fn create_project(&self, draft: ProjectDraft) -> Result<Project, EditorError> {
        self.check(Section::Projects, draft.validate())?;

        let store = self.content.current().await;
        self.run(
            Section::Projects,
            "Project added!",
            store.add_project(draft.into_new_project()),
        )
        .await
    }

    /// Partial update. Fields the patch leaves unset keep their stored
    /// values; the image is only cleaned up when the patch touches it.
    pub async fn patch_project(
        &self,
        id: &str,
        patch: ProjectPatch,
    ) -> Result<Project, EditorError> {
        let patch = patch.normalized();
        let store = self.content.current().await;
        let previous = self.run_read(Section::Projects, store.project(id)).await?;
        self.check(Section::Projects, validate_patch(&patch, &previous))?;

        let touches_image = !patch.image.is_unset();
        let saved = self
            .run(
                Section::Projects,
                "Project updated!",
                store.update_project(id, patch),
            )
            .await?;

        if touches_image {
            self.discard_stale(&[previous.image], &[saved.image.clone()])
                .await;
        }
        Ok(saved)
    }

    /// Saves the whole edited draft; fields cleared in the draft are cleared
    /// on the record.
    pub async fn update_project(
        &self,
        id: &str,
        draft: ProjectDraft,
    ) -> Result<Project, EditorError> {
        self.check(Section::Projects, draft.validate())?;
        self.patch_project(id, draft.into_patch()).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<Project, EditorError> {
        let store = self.content.current().await;
        let removed = self
            .run(Section::Projects, "Project deleted.", store.delete_project(id))
            .await?;

        self.discard_stale(&[removed.image.clone()], &[]).await;
        Ok(removed)
    }

    // ──────────────────────────────────────────────────────
    // Skill categories (whole-list saves)
    // ──────────────────────────────────────────────────────

    /// Updates the category with `id`, or adds a new one when `id` is `None`
    /// or unknown.
    pub async fn upsert_category(
        &self,
        id: Option<&str>,
        draft: CategoryDraft,
    ) -> Result<SkillCategory, EditorError> {
        self.check(Section::Skills, draft.validate())?;

        let store = self.content.current().await;
        let mut categories = self.run_read(Section::Skills, store.skill_categories()).await?;

        let existing = id.and_then(|id| categories.iter().position(|c| c.id == id));
        let (category, message) = match existing {
            Some(index) => {
                let category = draft.into_category(categories[index].id.clone());
                categories[index] = category.clone();
                (category, "Category updated!")
            }
            None => {
                let id = id
                    .map(str::to_string)
                    .unwrap_or_else(|| generate_id("cat"));
                let category = draft.into_category(id);
                categories.push(category.clone());
                (category, "Category added!")
            }
        };

        self.run(Section::Skills, message, store.save_skill_categories(categories))
            .await?;
        Ok(category)
    }

    pub async fn delete_category(&self, id: &str) -> Result<Vec<SkillCategory>, EditorError> {
        let store = self.content.current().await;
        let mut categories = self.run_read(Section::Skills, store.skill_categories()).await?;
        categories.retain(|c| c.id != id);

        self.run(
            Section::Skills,
            "Category deleted.",
            store.save_skill_categories(categories),
        )
        .await
    }

    pub async fn replace_categories(
        &self,
        drafts: Vec<(Option<String>, CategoryDraft)>,
    ) -> Result<Vec<SkillCategory>, EditorError> {
        for (_, draft) in &drafts {
            self.check(Section::Skills, draft.validate())?;
        }

        let categories = drafts
            .into_iter()
            .map(|(id, draft)| draft.into_category(id.unwrap_or_else(|| generate_id("cat"))))
            .collect();

        let store = self.content.current().await;
        self.run(
            Section::Skills,
            Section::Skills.saved_message(),
            store.save_skill_categories(categories),
        )
        .await
    }

    // ──────────────────────────────────────────────────────
    // Settings documents
    // ──────────────────────────────────────────────────────

    pub async fn save_hero(&self, draft: HeroDraft) -> Result<Toast, EditorError> {
        let store = self.content.current().await;
        let previous = store.read(|s| s.hero_content.clone()).await.ok().flatten();
        let hero = draft.into_content();
        let kept = [hero.profile_image.clone(), hero.resume_url.clone()];

        let ((), toast) = self
            .run_toasted(
                Section::Hero,
                Section::Hero.saved_message(),
                store.save_hero_content(hero),
            )
            .await?;

        if let Some(previous) = previous {
            self.discard_stale(&[previous.profile_image, previous.resume_url], &kept)
                .await;
        }
        Ok(toast)
    }

    pub async fn save_about(
        &self,
        section: AboutSection,
        draft: AboutDraft,
    ) -> Result<Toast, EditorError> {
        let section = Section::from(section);
        let store = self.content.current().await;
        let previous = store.read(|s| s.about_content.clone()).await.ok().flatten();
        let about = draft.into_content();
        let kept = about_images(&about);

        let ((), toast) = self
            .run_toasted(section, section.saved_message(), store.save_about_content(about))
            .await?;

        if let Some(previous) = previous {
            self.discard_stale(&about_images(&previous), &kept).await;
        }
        Ok(toast)
    }

    pub async fn save_contact(&self, draft: ContactDraft) -> Result<Toast, EditorError> {
        let store = self.content.current().await;
        self.run_toasted(
            Section::Contact,
            Section::Contact.saved_message(),
            store.save_contact_content(draft.into_content()),
        )
        .await
        .map(|((), toast)| toast)
    }

    pub async fn save_services(&self, draft: ServicesDraft) -> Result<Toast, EditorError> {
        self.check(Section::Services, draft.validate())?;

        let store = self.content.current().await;
        self.run_toasted(
            Section::Services,
            Section::Services.saved_message(),
            store.save_services(draft.into_items()),
        )
        .await
        .map(|((), toast)| toast)
    }

    pub async fn save_footer(&self, draft: FooterDraft) -> Result<Toast, EditorError> {
        let store = self.content.current().await;
        self.run_toasted(
            Section::Footer,
            Section::Footer.saved_message(),
            store.save_footer_content(draft.into_content()),
        )
        .await
        .map(|((), toast)| toast)
    }

    // ──────────────────────────────────────────────────────
    // Uploads into drafts
    // ──────────────────────────────────────────────────────

    /// The draft only changes once the upload has succeeded.
    pub async fn upload_project_image(
        &self,
        owner_id: &str,
        draft: &mut ProjectDraft,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        let url = self
            .uploads
            .upload(owner_id, AssetFolder::Projects, content_type, bytes)
            .await?;
        draft.set_image(url.clone());
        Ok(url)
    }

    pub async fn upload_profile_image(
        &self,
        draft: &mut HeroDraft,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        let url = self
            .uploads
            .upload("profile", AssetFolder::Profile, content_type, bytes)
            .await?;
        draft.set_profile_image(Some(url.clone()));
        Ok(url)
    }

    pub async fn upload_resume(
        &self,
        draft: &mut HeroDraft,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        let url = self
            .uploads
            .upload("resume", AssetFolder::Resume, content_type, bytes)
            .await?;
        draft.set_resume_url(Some(url.clone()));
        Ok(url)
    }

    /// If the entry was removed while the upload ran, the URL is returned
    /// but written nowhere.
    pub async fn upload_experience_image(
        &self,
        draft: &mut AboutDraft,
        experience_id: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        let url = self
            .uploads
            .upload(experience_id, AssetFolder::Experience, content_type, bytes)
            .await?;
        if let Some(exp) = draft.experience_mut(experience_id) {
            exp.image = Some(url.clone());
        }
        Ok(url)
    }

    pub async fn upload_education_image(
        &self,
        draft: &mut AboutDraft,
        education_id: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        let url = self
            .uploads
            .upload(education_id, AssetFolder::Education, content_type, bytes)
            .await?;
        if let Some(edu) = draft.education_mut(education_id) {
            edu.image = Some(url.clone());
        }
        Ok(url)
    }

    // ──────────────────────────────────────────────────────
    // Helpers
    // ──────────────────────────────────────────────────────

    fn check(
        &self,
        section: Section,
        validation: Result<(), ValidationError>,
    ) -> Result<(), EditorError> {
        validation.map_err(|e| {
            self.board.fail(section, e.message);
            EditorError::Validation(e)
        })
    }

    async fn run<T>(
        &self,
        section: Section,
        success_message: &str,
        op: impl Future<Output = Result<T, ContentStoreError>>,
    ) -> Result<T, EditorError> {
        self.run_toasted(section, success_message, op)
            .await
            .map(|(value, _)| value)
    }

    /// Like [`Self::run`], also returning the success toast this call posted.
    /// Another save on the same section may replace it on the board first.
    async fn run_toasted<T>(
        &self,
        section: Section,
        success_message: &str,
        op: impl Future<Output = Result<T, ContentStoreError>>,
    ) -> Result<(T, Toast), EditorError> {
        let result = {
            let _busy = self.board.begin(section);
            op.await
        };

        match result {
            Ok(value) => Ok((value, self.board.succeed(section, success_message))),
            Err(e) => {
                tracing::warn!(%section, error = %e, "save failed");
                self.board.fail(section, e.to_string());
                Err(EditorError::from(e))
            }
        }
    }

    /// A read that precedes a save. Failures land on the section like a
    /// failed save would.
    async fn run_read<T>(
        &self,
        section: Section,
        op: impl Future<Output = Result<T, ContentStoreError>>,
    ) -> Result<T, EditorError> {
        op.await.map_err(|e| {
            self.board.fail(section, e.to_string());
            EditorError::Store(e)
        })
    }

    async fn discard_stale(&self, before: &[Option<String>], after: &[Option<String>]) {
        let stale = stale_urls(before, after);
        if stale.is_empty() {
            return;
        }

        let outcomes = join_all(stale.iter().map(|url| self.uploads.discard(url))).await;
        for (url, outcome) in stale.iter().zip(outcomes) {
            if let CleanupOutcome::Failed(reason) = outcome {
                tracing::warn!(url = %url, reason = %reason, "stale asset left behind");
            }
        }
    }
}

fn about_images(about: &AboutContent) -> Vec<Option<String>> {
    about
        .experiences
        .iter()
        .map(|e| e.image.clone())
        .chain(about.education.iter().map(|e| e.image.clone()))
        .collect()
}

/// URLs referenced before and no longer referenced after, deduplicated.
fn stale_urls(before: &[Option<String>], after: &[Option<String>]) -> Vec<String> {
    let mut stale: Vec<String> = Vec::new();
    for url in before.iter().flatten() {
        let still_used = after.iter().flatten().any(|u| u == url);
        if !still_used && !stale.contains(url) {
            stale.push(url.clone());
        }
    }
    stale
}
