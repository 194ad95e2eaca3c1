//! 로컬 인증 핸들러

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::core::AppState;
use crate::domain::dto::auth::{LoginRequest, RegistrationRequest};
use crate::errors::AppError;

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegistrationRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = state.auth_service.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = state.auth_service.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    use crate::core::AppState;
    use crate::repositories::users::InMemoryUserRepository;
    use crate::routes::configure_all_routes;
    use crate::utils::ManualClock;

    fn state() -> AppState {
        AppState::for_tests(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap())),
        )
    }

    #[actix_web::test]
    async fn test_register_then_login() {
        let state = state();
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(state.clone()))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "fullName": "Ada Lovelace",
                "email": "ada@example.com",
                "password": "secret1",
                "confirmPassword": "secret1"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["tokenType"], "Bearer");
        assert_eq!(body["user"]["email"], "ada@example.com");
        assert_eq!(body["user"]["roles"], json!(["ROLE_USER"]));

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "ada@example.com", "password": "secret1"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        let token = body["accessToken"].as_str().unwrap();
        assert_eq!(state.token_service.verify(token).unwrap().subject_id(), "ada@example.com");
    }

    #[actix_web::test]
    async fn test_login_failures_share_one_message() {
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(state()))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "fullName": "Ada",
                "email": "ada@example.com",
                "password": "secret1",
                "confirmPassword": "secret1"
            }))
            .to_request();
        test::call_service(&app, req).await;

        let mut messages = Vec::new();
        for (email, password) in [("ada@example.com", "wrong-password"), ("nobody@example.com", "secret1")] {
            let req = test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({"email": email, "password": password}))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

            let body: Value = test::read_body_json(res).await;
            messages.push(body["message"].clone());
        }

        assert_eq!(messages[0], "Invalid email or password");
        assert_eq!(messages[0], messages[1]);
    }

    #[actix_web::test]
    async fn test_register_validation() {
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(state()))
                .configure(configure_all_routes),
        )
        .await;

        for payload in [
            json!({"fullName": "Ada", "email": "not-an-email", "password": "secret1", "confirmPassword": "secret1"}),
            json!({"fullName": "Ada", "email": "ada@example.com", "password": "secret1", "confirmPassword": "secret2"}),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(payload)
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        }
    }
}
