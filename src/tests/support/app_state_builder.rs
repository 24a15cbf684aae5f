use std::sync::Arc;

use actix_web::web;

use crate::auth::application::ports::outgoing::IdentityProvider;
use crate::auth::application::use_cases::login_user::LoginUserUseCase;
use crate::auth::application::use_cases::logout_user::LogoutUseCase;
use crate::contact::application::use_cases::submit_contact::SubmitContactUseCase;
use crate::content::ContentStoreHandle;
use crate::editor::application::AdminEditor;
use crate::multimedia::application::AssetUploadService;
use crate::tests::support::auth_helper::ADMIN_EMAIL;
use crate::tests::support::in_memory_gateways::InMemoryBackend;
use crate::tests::support::stubs::{StubBlobStorage, StubFormRelay, StubIdentityProvider};
use crate::AppState;

/// Wires a full [`AppState`] over in-memory gateways and stubbed services.
pub struct TestAppStateBuilder {
    backend: InMemoryBackend,
    storage: StubBlobStorage,
    identity: StubIdentityProvider,
    relay: StubFormRelay,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            backend: InMemoryBackend::default(),
            storage: StubBlobStorage::returning("https://cdn.test/uploads/file.png"),
            identity: StubIdentityProvider::accepting(ADMIN_EMAIL),
            relay: StubFormRelay::accepting(),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_backend(mut self, backend: InMemoryBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_blob_storage(mut self, storage: StubBlobStorage) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_identity(mut self, identity: StubIdentityProvider) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_form_relay(mut self, relay: StubFormRelay) -> Self {
        self.relay = relay;
        self
    }

    /// Content is left in `Loading`; use [`Self::build_loaded`] for routes that read it.
    pub fn build(self) -> web::Data<AppState> {
        let content = Arc::new(ContentStoreHandle::new(self.backend.gateways()));
        let uploads = Arc::new(AssetUploadService::new(Arc::new(self.storage)));
        let editor = Arc::new(AdminEditor::new(Arc::clone(&content), Arc::clone(&uploads)));
        let identity: Arc<dyn IdentityProvider> = Arc::new(self.identity);

        web::Data::new(AppState {
            content,
            editor,
            uploads,
            login_user_use_case: Arc::new(LoginUserUseCase::new(
                Arc::clone(&identity),
                Some(ADMIN_EMAIL.to_string()),
            )),
            logout_user_use_case: Arc::new(LogoutUseCase::new(identity)),
            submit_contact_use_case: Arc::new(SubmitContactUseCase::new(Arc::new(self.relay))),
        })
    }

    /// Builds and runs the initial load. A failing backend leaves the store
    /// in its error state, which some tests rely on.
    pub async fn build_loaded(self) -> web::Data<AppState> {
        let state = self.build();
        let _ = state.content.load().await;
        state
    }
}
