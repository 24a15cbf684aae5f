pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::auth;
pub use modules::contact;
pub use modules::content;
pub use modules::editor;
pub use modules::multimedia;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenVerifier};
use crate::auth::adapter::outgoing::SupabaseIdentityProvider;
use crate::auth::application::ports::outgoing::{IdentityProvider, TokenVerifier};
use crate::auth::application::use_cases::{
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    logout_user::{ILogoutUseCase, LogoutUseCase},
};
use crate::contact::adapter::outgoing::HttpFormRelay;
use crate::contact::application::use_cases::submit_contact::{
    ISubmitContactUseCase, SubmitContactUseCase,
};
use crate::content::adapter::outgoing::{
    ProjectRepositoryPostgres, SettingsRepositoryPostgres, SkillCategoryRepositoryPostgres,
};
use crate::content::application::content_store::ContentGateways;
use crate::content::ContentStoreHandle;
use crate::editor::application::AdminEditor;
use crate::multimedia::adapter::outgoing::cloud_storage::SupabaseBlobStorage;
use crate::multimedia::application::domain::policies::UploadPolicy;
use crate::multimedia::application::AssetUploadService;
use crate::shared::api::custom_json_config;
use crate::shared::AppConfig;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

/// Raw upload bodies may exceed the upload policy a little so oversized files
/// get a policy error instead of a bare 413 from the framework.
const UPLOAD_BODY_LIMIT: usize = UploadPolicy::MAX_FILE_SIZE_BYTES as usize + 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentStoreHandle>,
    pub editor: Arc<AdminEditor>,
    pub uploads: Arc<AssetUploadService>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub logout_user_use_case: Arc<dyn ILogoutUseCase + Send + Sync>,
    pub submit_contact_use_case: Arc<dyn ISubmitContactUseCase + Send + Sync>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Try .env.{environment} first, then fall back to .env
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env().context("invalid configuration")?;
    info!(?config, "Configuration loaded");

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .context("failed to connect to database")?;

    if config.run_migrations {
        Migrator::up(&conn, None)
            .await
            .context("failed to apply migrations")?;
        info!("Migrations applied");
    }

    let db_arc = Arc::new(conn);

    // Content
    let gateways = ContentGateways {
        projects: Arc::new(ProjectRepositoryPostgres::new(Arc::clone(&db_arc))),
        skills: Arc::new(SkillCategoryRepositoryPostgres::new(Arc::clone(&db_arc))),
        settings: Arc::new(SettingsRepositoryPostgres::new(Arc::clone(&db_arc))),
    };
    let content = Arc::new(ContentStoreHandle::new(gateways));
    {
        let content = Arc::clone(&content);
        actix_web::rt::spawn(async move {
            if let Err(e) = content.load().await {
                error!(error = %e, "Initial content load failed");
            }
        });
    }

    // Storage
    let storage_key = config
        .supabase_service_key
        .clone()
        .unwrap_or_else(|| config.supabase_anon_key.clone());
    let storage = SupabaseBlobStorage::new(
        config.supabase_url.clone(),
        storage_key,
        UploadPolicy::new(config.storage_bucket.clone()),
    );
    let uploads = Arc::new(AssetUploadService::new(Arc::new(storage)));
    let editor = Arc::new(AdminEditor::new(Arc::clone(&content), Arc::clone(&uploads)));

    // Identity
    let identity: Arc<dyn IdentityProvider> = Arc::new(SupabaseIdentityProvider::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
    ));
    let login_user_use_case =
        LoginUserUseCase::new(Arc::clone(&identity), config.admin_email.clone());
    let logout_user_use_case = LogoutUseCase::new(identity);
    let token_verifier: Arc<dyn TokenVerifier + Send + Sync> = Arc::new(JwtTokenVerifier::new(
        JwtConfig::new(config.supabase_jwt_secret.clone(), config.admin_email.clone()),
    ));

    // Contact
    let form_relay = HttpFormRelay::new(config.form_relay_endpoint.clone());
    let submit_contact_use_case = SubmitContactUseCase::new(Arc::new(form_relay));

    let state = AppState {
        content,
        editor,
        uploads,
        login_user_use_case: Arc::new(login_user_use_case),
        logout_user_use_case: Arc::new(logout_user_use_case),
        submit_contact_use_case: Arc::new(submit_contact_use_case),
    };

    let openapi = ApiDoc::openapi();
    let server_url = config.server_url();
    info!("Server run on: {}", server_url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_verifier)))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(custom_json_config())
            .app_data(web::PayloadConfig::new(UPLOAD_BODY_LIMIT))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::auth::adapter::incoming::web::routes as auth_routes;
    use crate::contact::adapter::incoming::web::routes as contact_routes;
    use crate::content::adapter::incoming::web::routes as content_routes;
    use crate::editor::adapter::incoming::web::routes as editor_routes;
    use crate::multimedia::adapter::incoming::web::routes as upload_routes;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Public content
    cfg.service(content_routes::get_content_handler);
    cfg.service(content_routes::get_content_status_handler);
    cfg.service(content_routes::reload_content_handler);
    cfg.service(content_routes::get_projects_handler);
    // Contact
    cfg.service(contact_routes::submit_contact_handler);
    // Auth
    cfg.service(auth_routes::login_user_handler);
    cfg.service(auth_routes::logout_user_handler);
    cfg.service(auth_routes::get_session_handler);
    // Admin: projects
    cfg.service(editor_routes::list_admin_projects_handler);
    cfg.service(editor_routes::create_project_handler);
    cfg.service(editor_routes::patch_project_handler);
    cfg.service(editor_routes::update_project_handler);
    cfg.service(editor_routes::delete_project_handler);
    // Admin: skill categories
    cfg.service(editor_routes::replace_skill_categories_handler);
    cfg.service(editor_routes::upsert_skill_category_handler);
    cfg.service(editor_routes::delete_skill_category_handler);
    // Admin: settings documents
    cfg.service(editor_routes::save_hero_handler);
    cfg.service(editor_routes::save_about_handler);
    cfg.service(editor_routes::save_contact_handler);
    cfg.service(editor_routes::save_services_handler);
    cfg.service(editor_routes::save_footer_handler);
    cfg.service(editor_routes::get_sections_handler);
    // Admin: uploads
    cfg.service(upload_routes::get_active_uploads_handler);
    cfg.service(upload_routes::upload_asset_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
        std::process::exit(1);
    }
}
