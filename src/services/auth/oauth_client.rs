//! # OAuth 2.0 페더레이션 로그인 클라이언트
//!
//! Google, Facebook의 Authorization Code 플로우를 처리합니다.
//!
//! ```text
//! GET /oauth2/authorization/{provider}
//!        │  state 생성, 인가 URL 구성
//!        ▼
//!   302 ─► 프로바이더 로그인 ─► GET /login/oauth2/code/{provider}?code&state
//!                                      │  state 검증
//!                                      │  code → access_token (form POST)
//!                                      │  access_token → 사용자 속성 (Bearer GET)
//!                                      ▼
//!                              ProviderAttributes ─► 신원 확인 ─► 리다이렉트 가드
//! ```
//!
//! ## State 매개변수
//!
//! 서버에 상태를 저장하지 않고 서명된 값과 브라우저 쿠키로 CSRF를 막습니다.
//!
//! ```text
//! {timestamp}.{nonce}.{base64url(HMAC-SHA256(secret, "{timestamp}.{nonce}"))}
//! ```
//!
//! nonce는 인가 요청을 시작한 브라우저의 http-only 쿠키에도 저장되며, 콜백에서
//! 쿠키 값과 일치해야 합니다. 타임스탬프가 `OAUTH_SESSION_TIMEOUT_MINUTES`보다
//! 오래되면 거부됩니다.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{crypto, Algorithm, DecodingKey, EncodingKey};

use crate::config::{AuthProvider, OAuthConfig, ProviderRegistration};
use crate::domain::models::oauth::{ProviderAttributes, ProviderTokenResponse};
use crate::errors::AppError;
use crate::utils::Clock;

/// 프로바이더로 보낼 인가 요청
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// 프로바이더 인가 페이지 URL
    pub url: String,
    /// `state`에 담긴 nonce. 브라우저 쿠키로 보관합니다.
    pub nonce: String,
}

/// OAuth 2.0 클라이언트
pub struct FederatedLoginClient {
    http: reqwest::Client,
    config: OAuthConfig,
    state_timeout: Duration,
    state_signing_key: EncodingKey,
    state_verifying_key: DecodingKey,
    clock: Arc<dyn Clock>,
}

impl FederatedLoginClient {
    pub fn new(config: &OAuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: config.clone(),
            state_timeout: Duration::minutes(config.session_timeout_minutes),
            state_signing_key: EncodingKey::from_secret(config.state_secret.as_bytes()),
            state_verifying_key: DecodingKey::from_secret(config.state_secret.as_bytes()),
            clock,
        }
    }

    /// 등록된 프로바이더 조회
    ///
    /// 설정되지 않은 프로바이더는 `AppError::NotFound`입니다.
    pub fn registration(&self, provider: AuthProvider) -> Result<&ProviderRegistration, AppError> {
        self.config
            .providers
            .get(&provider)
            .ok_or_else(|| AppError::NotFound(format!("OAuth2 provider not configured: {}", provider)))
    }

    /// 프로바이더 인가 페이지 URL 생성
    ///
    /// ```text
    /// https://accounts.google.com/o/oauth2/v2/auth?
    ///   client_id=...&redirect_uri=...&scope=openid%20email%20profile&
    ///   response_type=code&state=...
    /// ```
    pub fn authorization_url(&self, provider: AuthProvider) -> Result<AuthorizationRequest, AppError> {
        let registration = self.registration(provider)?;
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let state = self.generate_state(&nonce)?;

        let params = [
            ("client_id", registration.client_id.clone()),
            ("redirect_uri", self.config.callback_url(provider)),
            ("scope", registration.scopes.join(" ")),
            ("response_type", "code".to_string()),
            ("state", state),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let separator = if registration.auth_uri.contains('?') { '&' } else { '?' };
        Ok(AuthorizationRequest {
            url: format!("{}{}{}", registration.auth_uri, separator, query_string),
            nonce,
        })
    }

    /// state 유효 시간
    pub fn state_timeout(&self) -> Duration {
        self.state_timeout
    }

    /// 현재 시각과 nonce로 서명된 state 생성
    pub fn generate_state(&self, nonce: &str) -> Result<String, AppError> {
        let timestamp = self.clock.now().timestamp();
        let message = format!("{}.{}", timestamp, nonce);
        let signature = crypto::sign(message.as_bytes(), &self.state_signing_key, Algorithm::HS256)
            .map_err(|e| AppError::InternalError(format!("OAuth state 서명 실패: {}", e)))?;

        Ok(format!("{}.{}", message, signature))
    }

    /// 콜백으로 돌아온 state 검증
    ///
    /// `browser_nonce`는 인가 요청 때 브라우저에 심은 쿠키 값입니다. 서명과
    /// 유효 시간이 맞더라도 다른 브라우저에서 시작된 state는 거부됩니다.
    pub fn verify_state(&self, state: &str, browser_nonce: Option<&str>) -> Result<(), AppError> {
        let invalid = || AppError::ValidationError("Invalid OAuth state".to_string());

        let (message, signature) = state.rsplit_once('.').ok_or_else(invalid)?;
        let (raw_timestamp, nonce) = message.split_once('.').ok_or_else(invalid)?;
        let timestamp: i64 = raw_timestamp.parse().map_err(|_| invalid())?;

        let verified = crypto::verify(signature, message.as_bytes(), &self.state_verifying_key, Algorithm::HS256)
            .unwrap_or(false);
        if !verified {
            log::warn!("OAuth state 서명 불일치");
            return Err(invalid());
        }

        let age = self.clock.now().timestamp() - timestamp;
        if age < 0 || age > self.state_timeout.num_seconds() {
            log::warn!("OAuth state 만료 ({}초 경과)", age);
            return Err(AppError::ValidationError("OAuth state has expired".to_string()));
        }

        if !browser_nonce.is_some_and(|cookie| constant_time_eq(cookie.as_bytes(), nonce.as_bytes())) {
            log::warn!("OAuth state가 이 브라우저에서 시작된 요청이 아닙니다");
            return Err(AppError::ValidationError(
                "OAuth state does not match this browser session".to_string(),
            ));
        }

        Ok(())
    }

    /// 인가 코드를 사용자 속성으로 교환
    pub async fn fetch_attributes(&self, provider: AuthProvider, code: &str) -> Result<ProviderAttributes, AppError> {
        let token = self.exchange_code_for_token(provider, code).await?;
        self.get_user_info(provider, &token.access_token).await
    }

    async fn exchange_code_for_token(
        &self,
        provider: AuthProvider,
        code: &str,
    ) -> Result<ProviderTokenResponse, AppError> {
        let registration = self.registration(provider)?;
        let redirect_uri = self.config.callback_url(provider);

        let params = [
            ("code", code),
            ("client_id", registration.client_id.as_str()),
            ("client_secret", registration.client_secret.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self.http
            .post(&registration.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 요청 실패: {}", provider, e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 토큰 교환 실패: {}", provider, error_text
            )));
        }

        response
            .json::<ProviderTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 응답 파싱 실패: {}", provider, e)))
    }

    async fn get_user_info(&self, provider: AuthProvider, access_token: &str) -> Result<ProviderAttributes, AppError> {
        let registration = self.registration(provider)?;

        let response = self.http
            .get(&registration.user_info_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 요청 실패: {}", provider, e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 사용자 정보 조회 실패: {}", provider, error_text
            )));
        }

        response
            .json::<ProviderAttributes>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 파싱 실패: {}", provider, e)))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
