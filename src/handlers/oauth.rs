//! OAuth2 페더레이션 로그인 핸들러
//!
//! 진입점에서 받은 `redirect_uri`는 짧은 수명의 쿠키에 보관했다가,
//! 콜백에 `redirect_uri` 쿼리가 없을 때 사용합니다. 어느 쪽이든 최종 검증은
//! 리다이렉트 가드의 허용 목록 대조를 거칩니다.
//!
//! `state`의 nonce도 같은 방식으로 쿠키에 심어, 인가 요청을 시작한 브라우저에서
//! 돌아온 콜백만 받아들입니다. 두 쿠키는 콜백마다 지워집니다.

use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::http::{header, StatusCode};
use actix_web::{get, web, HttpRequest, HttpResponse, ResponseError};
use serde::Deserialize;

use crate::config::AuthProvider;
use crate::core::AppState;
use crate::domain::dto::auth::OAuthCallbackQuery;
use crate::errors::{error_body, AppError};
use crate::services::auth::CallbackExchange;

/// 리다이렉트 대상을 보관하는 쿠키 이름
pub const REDIRECT_URI_COOKIE: &str = "oauth2_redirect_uri";

/// state nonce를 보관하는 쿠키 이름
pub const STATE_NONCE_COOKIE: &str = "oauth2_state_nonce";

const REDIRECT_COOKIE_MAX_AGE_SECONDS: i64 = 180;

fn flow_cookie(name: &'static str, value: String, max_age: time::Duration) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .finish()
}

#[derive(Debug, Deserialize)]
pub struct AuthorizationQuery {
    pub redirect_uri: Option<String>,
}

fn parse_provider(raw: &str) -> Result<AuthProvider, AppError> {
    match AuthProvider::from_str(raw) {
        Ok(provider) if provider.is_federated() => Ok(provider),
        _ => Err(AppError::NotFound(format!("OAuth2 provider not configured: {}", raw))),
    }
}

/// 프로바이더 인가 페이지로 리다이렉트
#[get("/oauth2/authorization/{provider}")]
pub async fn authorize(
    state: web::Data<AppState>,
    provider: web::Path<String>,
    query: web::Query<AuthorizationQuery>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&provider)?;
    let request = state.oauth_client.authorization_url(provider)?;
    let state_max_age = time::Duration::seconds(state.oauth_client.state_timeout().num_seconds());

    let mut response = HttpResponse::Found();
    response
        .insert_header((header::LOCATION, request.url))
        .cookie(flow_cookie(STATE_NONCE_COOKIE, request.nonce, state_max_age));

    if let Some(redirect_uri) = query.into_inner().redirect_uri.filter(|uri| !uri.trim().is_empty()) {
        response.cookie(flow_cookie(
            REDIRECT_URI_COOKIE,
            redirect_uri,
            time::Duration::seconds(REDIRECT_COOKIE_MAX_AGE_SECONDS),
        ));
    }

    Ok(response.finish())
}

/// 프로바이더 콜백 처리
///
/// 사용자가 인가를 거부했거나 프로바이더가 에러를 돌려주면 401,
/// state 검증 실패(서명, 만료, 브라우저 nonce 불일치)는 400, 프로바이더 통신 실패는 502입니다.
/// 이후 리다이렉트 결정은 [`FederatedRedirectGuard`](crate::services::auth::FederatedRedirectGuard)가 내립니다.
#[get("/login/oauth2/code/{provider}")]
pub async fn callback(
    req: HttpRequest,
    state: web::Data<AppState>,
    provider: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&provider)?;
    let query = query.into_inner();

    let redirect_uri = query
        .redirect_uri
        .clone()
        .or_else(|| req.cookie(REDIRECT_URI_COOKIE).map(|c| c.value().to_string()));
    let browser_nonce = req.cookie(STATE_NONCE_COOKIE).map(|c| c.value().to_string());
    let mut exchange = CallbackExchange::new(redirect_uri);

    let outcome = complete_login(&state, provider, &query, browser_nonce.as_deref(), &mut exchange).await;

    let mut response = match outcome {
        Ok(()) => exchange
            .into_response()
            .unwrap_or_else(|| error_body(StatusCode::INTERNAL_SERVER_ERROR, "Authentication failed")),
        Err(e) => e.error_response(),
    };

    for name in [REDIRECT_URI_COOKIE, STATE_NONCE_COOKIE] {
        let mut removal = Cookie::build(name, "").path("/").finish();
        removal.make_removal();
        if let Err(e) = response.add_cookie(&removal) {
            log::warn!("OAuth 쿠키 제거 실패 ({}): {}", name, e);
        }
    }

    Ok(response)
}

async fn complete_login(
    state: &AppState,
    provider: AuthProvider,
    query: &OAuthCallbackQuery,
    browser_nonce: Option<&str>,
    exchange: &mut CallbackExchange,
) -> Result<(), AppError> {
    if let Some(error) = &query.error {
        let description = query
            .error_description
            .as_deref()
            .unwrap_or("OAuth2 authorization was denied or failed");
        log::warn!("{} OAuth 에러: {} - {}", provider, error, description);
        exchange.commit(error_body(StatusCode::UNAUTHORIZED, description));
        return Ok(());
    }

    let code = query
        .code
        .as_deref()
        .ok_or_else(|| AppError::ValidationError("Missing authorization code".to_string()))?;
    let oauth_state = query
        .state
        .as_deref()
        .ok_or_else(|| AppError::ValidationError("Missing OAuth state".to_string()))?;

    state.oauth_client.verify_state(oauth_state, browser_nonce)?;
    let attributes = state.oauth_client.fetch_attributes(provider, code).await?;
    let identity = state.auth_service.federated_login(provider, &attributes).await?;

    state
        .redirect_guard
        .on_authentication_success(exchange, &identity, &state.token_service);
    Ok(())
}
