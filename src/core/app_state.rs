//! 공유 애플리케이션 상태
//!
//! 설정, 저장소, 시간원을 받아 서비스 그래프를 한 번에 조립합니다.
//! 모든 필드는 불변이며 `Arc`로 공유됩니다.
//!
//! ```text
//! AuthConfig ──┬─► TokenService ◄──────────────┐
//!              ├─► FederatedLoginClient        │
//!              └─► FederatedRedirectGuard      │
//! AccountStore ──┐                             │
//! PasswordEncoder┴─► AuthService ──────────────┘
//! ```

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::errors::AppError;
use crate::repositories::users::AccountStore;
use crate::services::auth::{
    AuthService, FederatedLoginClient, FederatedRedirectGuard, PasswordEncoder, RedirectAllowList,
    TokenService,
};
use crate::utils::Clock;

#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub oauth_client: Arc<FederatedLoginClient>,
    pub redirect_guard: Arc<FederatedRedirectGuard>,
}

impl AppState {
    /// 서비스 그래프 조립
    ///
    /// # Errors
    ///
    /// * `AppError::Auth(InternalFault)` - 서명 키 길이 또는 토큰 수명 설정 오류
    /// * `AppError::ConfigError` - 허용 리다이렉트 URI 형식 오류
    pub fn build(
        config: &AuthConfig,
        accounts: Arc<dyn AccountStore>,
        encoder: Arc<dyn PasswordEncoder>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let token_service = Arc::new(TokenService::new(&config.jwt, clock.clone())?);
        let allow_list = RedirectAllowList::parse(&config.oauth.authorized_redirect_uris)?;

        log::info!(
            "인증 코어 구성 완료 - 토큰 수명 {}초, 허용 리다이렉트 {}개, OAuth 프로바이더 {}개",
            token_service.ttl().num_seconds(),
            allow_list.entry_count(),
            config.oauth.providers.len()
        );

        Ok(Self {
            auth_service: Arc::new(AuthService::new(accounts, encoder, token_service.clone())),
            oauth_client: Arc::new(FederatedLoginClient::new(&config.oauth, clock)),
            redirect_guard: Arc::new(FederatedRedirectGuard::new(allow_list)),
            token_service,
        })
    }

    /// 메모리 저장소와 고정 시계를 쓰는 테스트용 상태
    #[cfg(test)]
    pub fn for_tests(
        accounts: Arc<crate::repositories::users::InMemoryUserRepository>,
        clock: Arc<crate::utils::ManualClock>,
    ) -> Self {
        let lookup = |key: &str| match key {
            "JWT_SECRET" => Some("cosmo-test-secret-0123456789abcdef".to_string()),
            "OAUTH2_AUTHORIZED_REDIRECT_URIS" => Some("http://localhost:3000/oauth2/redirect".to_string()),
            "OAUTH_STATE_SECRET" => Some("state-secret".to_string()),
            "GOOGLE_CLIENT_ID" => Some("google-client".to_string()),
            "GOOGLE_CLIENT_SECRET" => Some("google-secret".to_string()),
            _ => None,
        };
        let config = AuthConfig::from_lookup(&lookup).unwrap();
        let encoder = Arc::new(crate::services::auth::BcryptPasswordEncoder::new(4).unwrap());

        Self::build(&config, accounts, encoder, clock).unwrap()
    }
}
