//! 요청 인증 미들웨어
//!
//! 모든 요청에서 한 번 실행되어 `Authorization: Bearer <token>` 헤더를 검증하고,
//! 성공하면 [`AuthenticatedIdentity`](crate::domain::models::auth::AuthenticatedIdentity)를
//! 요청 extensions에 설치합니다.
//!
//! ## 처리 흐름
//!
//! ```text
//! 요청 ─► 공개 경로? ──yes──────────────────────────────────► 다음 서비스
//!            │no
//!            ▼
//!       Bearer 토큰? ──no (헤더 없음/형식 다름)──────────────► 다음 서비스 (미인증)
//!            │yes
//!            ▼
//!        verify() ──Err──► 401 {"status":401,"error":"Unauthorized","message":...}
//!            │Ok                (InternalFault만 500)
//!            ▼
//!     extensions에 신원 설치 ─────────────────────────────────► 다음 서비스
//! ```
//!
//! 신원이 반드시 필요한 핸들러는 `AuthenticatedIdentity` 추출자로 401을 받습니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::TokenVerifier;

/// 토큰 검증 없이 통과시키는 경로 접두사
pub const PUBLIC_PATH_PREFIXES: [&str; 3] = ["/api/auth/", "/oauth2/", "/login/oauth2/code/"];

/// 토큰 검증 없이 통과시키는 정확한 경로
pub const PUBLIC_EXACT_PATHS: [&str; 1] = ["/error"];

/// 공개 경로 여부
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_EXACT_PATHS.contains(&path)
        || PUBLIC_PATH_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// 인증 미들웨어
///
/// # Examples
///
/// ```rust,ignore
/// App::new()
///     .wrap(AuthMiddleware::new(state.token_service.clone()))
///     .configure(routes::configure_routes)
/// ```
pub struct AuthMiddleware {
    tokens: Arc<dyn TokenVerifier>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<dyn TokenVerifier>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthProvider, JwtConfig};
    use crate::errors::AuthError;
    use crate::services::auth::TokenService;
    use crate::domain::models::auth::{AuthenticatedIdentity, OptionalIdentity};
    use crate::utils::ManualClock;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::Value;

    const SECRET: &str = "cosmo-test-secret-0123456789abcdef";

    fn token_service(clock: Arc<ManualClock>) -> Arc<TokenService> {
        Arc::new(TokenService::new(&JwtConfig::new(SECRET, Duration::hours(1)), clock).unwrap())
    }

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()))
    }

    fn ada() -> AuthenticatedIdentity {
        AuthenticatedIdentity::new("ada@example.com", None, ["ROLE_USER", "ROLE_ADMIN"], AuthProvider::Local)
            .unwrap()
    }

    async fn me(identity: AuthenticatedIdentity) -> HttpResponse {
        HttpResponse::Ok().body(format!("{}|{}", identity.subject_id(), identity.joined_roles()))
    }

    async fn feed(identity: OptionalIdentity) -> HttpResponse {
        match identity.0 {
            Some(identity) => HttpResponse::Ok().body(identity.subject_id().to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    async fn public() -> HttpResponse {
        HttpResponse::Ok().body("public")
    }

    macro_rules! app {
        ($tokens:expr) => {
            test::init_service(
                App::new()
                    .wrap(AuthMiddleware::new($tokens))
                    .route("/api/users/me", web::get().to(me))
                    .route("/api/posts", web::get().to(feed))
                    .route("/api/auth/login", web::get().to(public))
                    .route("/error", web::get().to(public))
                    .route("/errors", web::get().to(public)),
            )
            .await
        };
    }

    fn get(path: &str, authorization: Option<&str>) -> test::TestRequest {
        let request = test::TestRequest::get().uri(path);
        match authorization {
            Some(value) => request.insert_header(("Authorization", value)),
            None => request,
        }
    }

    #[actix_web::test]
    async fn test_public_path_matching() {
        assert!(is_public_path("/api/auth/login"));
        assert!(is_public_path("/oauth2/authorization/google"));
        assert!(is_public_path("/login/oauth2/code/google"));
        assert!(is_public_path("/error"));

        assert!(!is_public_path("/errors"));
        assert!(!is_public_path("/api/auth"));
        assert!(!is_public_path("/api/users/me"));
    }

    #[actix_web::test]
    async fn test_valid_token_installs_identity() {
        let tokens = token_service(clock());
        let token = tokens.issue(&ada()).unwrap();
        let app = app!(tokens);

        let res = test::call_service(&app, get("/api/users/me", Some(&format!("Bearer {}", token))).to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "ada@example.com|ROLE_ADMIN,ROLE_USER");
    }

    #[actix_web::test]
    async fn test_public_paths_bypass_verification() {
        let app = app!(token_service(clock()));

        for path in ["/api/auth/login", "/error"] {
            let res = test::call_service(&app, get(path, Some("Bearer garbage")).to_request()).await;
            assert_eq!(res.status(), StatusCode::OK, "{}", path);
        }

        let res = test::call_service(&app, get("/errors", Some("Bearer garbage")).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_missing_or_foreign_header_passes_through_unauthenticated() {
        let app = app!(token_service(clock()));

        for authorization in [None, Some("Basic dXNlcjpwYXNz"), Some("bearer abc")] {
            let res = test::call_service(&app, get("/api/posts", authorization).to_request()).await;
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(test::read_body(res).await, "anonymous");
        }
    }

    #[actix_web::test]
    async fn test_required_identity_without_token_is_unauthorized() {
        let app = app!(token_service(clock()));

        let res = test::call_service(&app, get("/api/users/me", None).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], 401);
        assert_eq!(body["error"], "Unauthorized");
        assert_eq!(body["message"], "Full authentication is required to access this resource");
    }

    #[actix_web::test]
    async fn test_expired_token_is_rejected() {
        let clock = clock();
        let tokens = token_service(clock.clone());
        let token = tokens.issue(&ada()).unwrap();
        clock.advance(Duration::hours(1));
        let app = app!(tokens);

        let res = test::call_service(&app, get("/api/posts", Some(&format!("Bearer {}", token))).to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Token expired");
    }

    #[actix_web::test]
    async fn test_token_failures_use_distinct_messages() {
        let tokens = token_service(clock());
        let token = tokens.issue(&ada()).unwrap();
        let (signing_input, _) = token.rsplit_once('.').unwrap();
        let forged = format!("Bearer {}.AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA", signing_input);
        let app = app!(tokens);

        for (authorization, message) in [
            (forged.as_str(), "Invalid token signature"),
            ("Bearer not-a-token", "Invalid token"),
        ] {
            let res = test::call_service(&app, get("/api/posts", Some(authorization)).to_request()).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["status"], 401);
            assert_eq!(body["error"], "Unauthorized");
            assert_eq!(body["message"], message);
        }
    }

    struct FaultyVerifier;

    impl TokenVerifier for FaultyVerifier {
        fn verify(&self, _token: &str) -> Result<AuthenticatedIdentity, AuthError> {
            Err(AuthError::InternalFault("signing key unavailable".into()))
        }
    }

    #[actix_web::test]
    async fn test_verification_fault_is_server_error_without_detail() {
        let app = app!(Arc::new(FaultyVerifier));

        let res = test::call_service(&app, get("/api/posts", Some("Bearer abc.def.ghi")).to_request()).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], 500);
        assert_eq!(body["message"], "Unexpected authentication error");
        assert!(!body.to_string().contains("signing key unavailable"));

        let res = test::call_service(&app, get("/api/auth/login", Some("Bearer abc.def.ghi")).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
