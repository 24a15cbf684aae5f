use actix_web::{put, web, HttpResponse, Responder};
use serde::Deserialize;

use super::editor_error_response;
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::editor::application::EditorError;
use crate::editor::domain::{
    AboutDraft, AboutSection, ContactDraft, FooterDraft, HeroDraft, Section, SectionStatus,
    ServicesDraft, Toast,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AboutQuery {
    #[serde(default)]
    pub section: AboutSection,
}

/// Answers with the toast this save posted, never whatever another save on
/// the same section left on the board since.
fn respond(data: &AppState, section: Section, outcome: Result<Toast, EditorError>) -> HttpResponse {
    match outcome {
        Ok(toast) => ApiResponse::success(SectionStatus {
            section,
            busy: data.editor.board().is_busy(section),
            toast: Some(toast),
        }),
        Err(e) => editor_error_response(&e),
    }
}

#[put("/api/admin/settings/hero")]
pub async fn save_hero_handler(
    _admin: AdminUser,
    body: web::Json<HeroDraft>,
    data: web::Data<AppState>,
) -> impl Responder {
    let outcome = data.editor.save_hero(body.into_inner()).await;
    respond(&data, Section::Hero, outcome)
}

/// Bio, experience and education all write the About document; `section`
/// picks whose busy flag and toast the save reports on.
#[put("/api/admin/settings/about")]
pub async fn save_about_handler(
    _admin: AdminUser,
    query: web::Query<AboutQuery>,
    body: web::Json<AboutDraft>,
    data: web::Data<AppState>,
) -> impl Responder {
    let section = query.section;
    let outcome = data.editor.save_about(section, body.into_inner()).await;
    respond(&data, section.into(), outcome)
}

#[put("/api/admin/settings/contact")]
pub async fn save_contact_handler(
    _admin: AdminUser,
    body: web::Json<ContactDraft>,
    data: web::Data<AppState>,
) -> impl Responder {
    let outcome = data.editor.save_contact(body.into_inner()).await;
    respond(&data, Section::Contact, outcome)
}

#[put("/api/admin/settings/services")]
pub async fn save_services_handler(
    _admin: AdminUser,
    body: web::Json<ServicesDraft>,
    data: web::Data<AppState>,
) -> impl Responder {
    let outcome = data.editor.save_services(body.into_inner()).await;
    respond(&data, Section::Services, outcome)
}

#[put("/api/admin/settings/footer")]
pub async fn save_footer_handler(
    _admin: AdminUser,
    body: web::Json<FooterDraft>,
    data: web::Data<AppState>,
) -> impl Responder {
    let outcome = data.editor.save_footer(body.into_inner()).await;
    respond(&data, Section::Footer, outcome)
}
