use actix_web::{post, web, Responder};
use tracing::warn;

use super::store_error_response;
use crate::modules::content::application::store_handle::ReloadError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Manual recovery after a failed load: swaps in a fresh store and loads it.
#[post("/api/content/reload")]
pub async fn reload_content_handler(data: web::Data<AppState>) -> impl Responder {
    match data.content.reload().await {
        Ok(store) => ApiResponse::success(store.status().await),
        Err(ReloadError::NotFailed) => ApiResponse::conflict(
            "RELOAD_NOT_ALLOWED",
            "Content can only be reloaded after a failed load",
        ),
        Err(ReloadError::Load(e)) => {
            warn!(error = %e, "content reload failed");
            store_error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    use crate::modules::content::application::ports::outgoing::Operation;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::in_memory_gateways::InMemoryBackend;

    #[actix_web::test]
    async fn test_reload_while_ready_is_conflict() {
        let app_state = TestAppStateBuilder::default().build_loaded().await;

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(reload_content_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/content/reload")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_reload_after_failure_recovers() {
        let backend = InMemoryBackend::default();
        backend.projects.fail_on(Operation::FetchAll);

        let app_state = TestAppStateBuilder::default()
            .with_backend(backend.clone())
            .build_loaded()
            .await;

        backend.projects.heal();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(reload_content_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/content/reload")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["state"], "ready");
    }

    #[actix_web::test]
    async fn test_reload_that_fails_again_is_503() {
        let backend = InMemoryBackend::default();
        backend.projects.fail_on(Operation::FetchAll);

        let app_state = TestAppStateBuilder::default()
            .with_backend(backend)
            .build_loaded()
            .await;

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(reload_content_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/content/reload")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
