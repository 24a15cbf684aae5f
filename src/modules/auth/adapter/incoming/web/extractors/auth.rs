use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::{
    future::{ready, Ready},
    sync::Arc,
};

use crate::auth::application::ports::outgoing::token_verifier::{TokenError, TokenVerifier};
use crate::shared::api::ApiResponse;

/// The signed-in site owner. Every admin route takes one of these.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: String,
    pub email: Option<String>,
    pub expires_at: i64,
    /// Raw bearer token, kept for sign-out.
    pub access_token: String,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let verifier = match req.app_data::<web::Data<Arc<dyn TokenVerifier + Send + Sync>>>() {
            Some(verifier) => verifier,
            None => {
                tracing::error!("token verifier missing from app data");
                return ready(Err(create_api_error(ApiResponse::internal_error())));
            }
        };

        let token = match extract_token_from_header(req) {
            Some(t) => t,
            None => {
                return ready(Err(create_api_error(ApiResponse::unauthorized(
                    "MISSING_AUTH_HEADER",
                    "Missing or invalid authorization header",
                ))));
            }
        };

        match verifier.verify(&token) {
            Ok(claims) => ready(Ok(AdminUser {
                user_id: claims.sub,
                email: claims.email,
                expires_at: claims.exp,
                access_token: token,
            })),
            Err(TokenError::NotAdmin) => ready(Err(create_api_error(ApiResponse::forbidden(
                "ADMIN_ONLY",
                "This account cannot edit content",
            )))),
            Err(_) => ready(Err(create_api_error(ApiResponse::unauthorized(
                "INVALID_TOKEN",
                "Invalid or expired token",
            )))),
        }
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::auth_helper::{
        admin_token, expired_token, non_admin_token, test_token_verifier,
    };
    use actix_web::{get, http::StatusCode, test, App, Responder};

    #[get("/whoami")]
    async fn whoami(admin: AdminUser) -> impl Responder {
        ApiResponse::success(admin.user_id)
    }

    async fn call(header: Option<String>, with_verifier: bool) -> StatusCode {
        let mut app = App::new().service(whoami);
        if with_verifier {
            app = app.app_data(web::Data::new(test_token_verifier()));
        }
        let app = test::init_service(app).await;

        let mut req = test::TestRequest::get().uri("/whoami");
        if let Some(h) = header {
            req = req.insert_header(("Authorization", h));
        }

        test::call_service(&app, req.to_request()).await.status()
    }

    #[actix_web::test]
    async fn test_valid_admin_token_passes() {
        assert_eq!(
            call(Some(format!("Bearer {}", admin_token())), true).await,
            StatusCode::OK
        );
    }

    #[actix_web::test]
    async fn test_missing_or_malformed_header_is_unauthorized() {
        assert_eq!(call(None, true).await, StatusCode::UNAUTHORIZED);
        assert_eq!(
            call(Some(admin_token()), true).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            call(Some("Bearer ".to_string()), true).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_expired_token_is_unauthorized() {
        assert_eq!(
            call(Some(format!("Bearer {}", expired_token())), true).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_other_account_is_forbidden() {
        assert_eq!(
            call(Some(format!("Bearer {}", non_admin_token())), true).await,
            StatusCode::FORBIDDEN
        );
    }

    #[actix_web::test]
    async fn test_missing_verifier_is_internal_error() {
        assert_eq!(
            call(Some(format!("Bearer {}", admin_token())), false).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
