use actix_web::{get, web, HttpResponse, Responder};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use std::sync::Arc;

use crate::content::application::content_store::StoreStatus;
use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    database: &'static str,
    content: &'static str,
}

/// Liveness: answers without touching anything.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// Readiness: the database answers and site content has loaded.
#[get("/ready")]
pub async fn readiness(
    db: web::Data<Arc<DatabaseConnection>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let db_status = match db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1",
        ))
        .await
    {
        Ok(_) => "ok",
        Err(_) => "unhealthy",
    };

    let content_status = match data.content.current().await.status().await {
        StoreStatus::Ready => "ok",
        StoreStatus::Loading => "loading",
        StoreStatus::Error { .. } => "unhealthy",
    };

    let body = |status| ReadinessResponse {
        status,
        database: db_status,
        content: content_status,
    };

    if db_status == "ok" && content_status == "ok" {
        HttpResponse::Ok().json(body("ok"))
    } else {
        HttpResponse::ServiceUnavailable().json(body("unhealthy"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::domain::entities::SettingsKey;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::in_memory_gateways::InMemoryBackend;
    use actix_web::{http::StatusCode, test, App};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::Value;

    fn mock_db() -> web::Data<Arc<DatabaseConnection>> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        web::Data::new(Arc::new(db))
    }

    #[actix_web::test]
    async fn test_liveness() {
        let app = test::init_service(App::new().service(health)).await;
        let req = test::TestRequest::get().uri("/health").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_ready_when_content_loaded() {
        let app = test::init_service(
            App::new()
                .app_data(mock_db())
                .app_data(TestAppStateBuilder::default().build_loaded().await)
                .service(readiness),
        )
        .await;

        let req = test::TestRequest::get().uri("/ready").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_not_ready_after_failed_load() {
        let backend = InMemoryBackend::default();
        backend.settings.fail_fetch_of(SettingsKey::Hero);

        let app = test::init_service(
            App::new()
                .app_data(mock_db())
                .app_data(
                    TestAppStateBuilder::default()
                        .with_backend(backend)
                        .build_loaded()
                        .await,
                )
                .service(readiness),
        )
        .await;

        let req = test::TestRequest::get().uri("/ready").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["database"], "ok");
        assert_eq!(body["content"], "unhealthy");
    }
}
