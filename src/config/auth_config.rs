//! # Authentication Configuration Module
//!
//! JWT 서명 키, 토큰 수명, OAuth 프로바이더 등록 정보, 리다이렉트 허용 목록 등
//! 인증 관련 설정을 관리하는 모듈입니다.
//!
//! 모든 값은 서버 기동 시 한 번 읽혀 불변 값 [`AuthConfig`]로 조립되고,
//! 이후 요청 처리 중에는 환경 변수를 다시 읽지 않습니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **로컬 인증**: 이메일/패스워드 기반 전통적인 인증
//! 2. **Google OAuth 2.0**: Google 계정을 통한 소셜 로그인
//! 3. **Facebook OAuth 2.0**: Facebook 계정을 통한 소셜 로그인
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECRET="at-least-32-bytes-of-secret-material"
//! export JWT_EXPIRATION_MS="86400000"
//! ```
//!
//! ### OAuth2 설정
//! ```bash
//! export OAUTH2_AUTHORIZED_REDIRECT_URIS="http://localhost:3000/oauth2/redirect,myapp://oauth2/redirect"
//! export OAUTH2_CALLBACK_BASE_URL="http://localhost:8080"
//! export OAUTH_STATE_SECRET="your-oauth-state-secret"
//! export OAUTH_SESSION_TIMEOUT_MINUTES="10"
//!
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export FACEBOOK_CLIENT_ID="your-facebook-app-id"
//! export FACEBOOK_CLIENT_SECRET="your-facebook-app-secret"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::AuthConfig;
//!
//! let config = AuthConfig::from_env()?;
//! let token_service = TokenService::new(&config.jwt, Arc::new(SystemClock))?;
//! ```

use std::collections::HashMap;
use std::env;
use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// 인증 프로바이더
///
/// 어떤 인증 경로가 신원을 만들었는지 나타냅니다.
/// 직렬화 형식은 소문자 문자열(`"local"`, `"google"`, `"facebook"`)입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    Local,

    Google,

    Facebook,
}

impl AuthProvider {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            "facebook" => Ok(AuthProvider::Facebook),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
            AuthProvider::Facebook => "facebook",
        }
    }

    /// 외부 OAuth 프로바이더인지 여부
    pub fn is_federated(&self) -> bool {
        !matches!(self, AuthProvider::Local)
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 환경 변수 조회 함수
///
/// 테스트에서는 `HashMap` 기반 조회 함수를 넘겨 프로세스 환경을 건드리지 않습니다.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// JWT 서명 설정
#[derive(Debug, Clone)]
pub struct JwtConfig {
    secret: String,
    expiration: Duration,
}

impl JwtConfig {
    /// 기본 토큰 수명 (24시간)
    pub const DEFAULT_EXPIRATION_MS: i64 = 86_400_000;

    pub fn new(secret: impl Into<String>, expiration: Duration) -> Self {
        Self {
            secret: secret.into(),
            expiration,
        }
    }

    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, AppError> {
        let secret = lookup("JWT_SECRET")
            .ok_or_else(|| AppError::ConfigError("JWT_SECRET must be set".to_string()))?;

        let expiration_ms = match lookup("JWT_EXPIRATION_MS") {
            Some(raw) => raw.trim().parse::<i64>().map_err(|e| {
                AppError::ConfigError(format!("JWT_EXPIRATION_MS is not a number ({}): {}", raw, e))
            })?,
            None => Self::DEFAULT_EXPIRATION_MS,
        };

        if expiration_ms < 1000 || expiration_ms % 1000 != 0 {
            return Err(AppError::ConfigError(format!(
                "JWT_EXPIRATION_MS must be a whole number of seconds (at least 1000), got {}",
                expiration_ms
            )));
        }

        Ok(Self::new(secret, Duration::milliseconds(expiration_ms)))
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn expiration(&self) -> Duration {
        self.expiration
    }
}

/// 외부 OAuth 프로바이더 등록 정보
#[derive(Debug, Clone)]
pub struct ProviderRegistration {
    pub provider: AuthProvider,
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub user_info_uri: String,
    pub scopes: Vec<String>,
}

impl ProviderRegistration {
    /// 환경 변수에서 프로바이더 등록 정보를 읽습니다.
    ///
    /// `{PREFIX}_CLIENT_ID`가 없으면 해당 프로바이더는 비활성화(`None`)됩니다.
    pub fn from_lookup(provider: AuthProvider, lookup: EnvLookup<'_>) -> Result<Option<Self>, AppError> {
        let (prefix, auth_uri, token_uri, user_info_uri, scopes): (&str, &str, &str, &str, &[&str]) =
            match provider {
                AuthProvider::Google => (
                    "GOOGLE",
                    "https://accounts.google.com/o/oauth2/v2/auth",
                    "https://oauth2.googleapis.com/token",
                    "https://www.googleapis.com/oauth2/v3/userinfo",
                    &["openid", "email", "profile"],
                ),
                AuthProvider::Facebook => (
                    "FACEBOOK",
                    "https://www.facebook.com/v18.0/dialog/oauth",
                    "https://graph.facebook.com/v18.0/oauth/access_token",
                    "https://graph.facebook.com/me?fields=id,name,email,picture",
                    &["email", "public_profile"],
                ),
                AuthProvider::Local => return Ok(None),
            };

        let Some(client_id) = lookup(&format!("{}_CLIENT_ID", prefix)) else {
            return Ok(None);
        };

        let client_secret = lookup(&format!("{}_CLIENT_SECRET", prefix)).ok_or_else(|| {
            AppError::ConfigError(format!("{}_CLIENT_SECRET must be set when {}_CLIENT_ID is set", prefix, prefix))
        })?;

        Ok(Some(Self {
            provider,
            client_id,
            client_secret,
            auth_uri: lookup(&format!("{}_AUTH_URI", prefix)).unwrap_or_else(|| auth_uri.to_string()),
            token_uri: lookup(&format!("{}_TOKEN_URI", prefix)).unwrap_or_else(|| token_uri.to_string()),
            user_info_uri: lookup(&format!("{}_USER_INFO_URI", prefix))
                .unwrap_or_else(|| user_info_uri.to_string()),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        }))
    }
}

/// OAuth2 로그인 플로우 설정
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    /// 로그인 완료 후 돌아갈 수 있는 URI 목록 (순서 유지, 첫 항목이 기본값)
    pub authorized_redirect_uris: Vec<String>,
    /// 프로바이더 콜백 URL의 기준 주소
    pub callback_base_url: String,
    pub state_secret: String,
    pub session_timeout_minutes: i64,
    pub providers: HashMap<AuthProvider, ProviderRegistration>,
}

impl OAuthConfig {
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, AppError> {
        let authorized_redirect_uris = lookup("OAUTH2_AUTHORIZED_REDIRECT_URIS")
            .map(|raw| split_uri_list(&raw))
            .unwrap_or_default();

        if authorized_redirect_uris.is_empty() {
            log::warn!("OAUTH2_AUTHORIZED_REDIRECT_URIS not set, federated login cannot complete");
        }

        let state_secret = lookup("OAUTH_STATE_SECRET").unwrap_or_else(|| {
            log::warn!("OAUTH_STATE_SECRET not set, using default (not secure for production!)");
            "oauth-state-secret".to_string()
        });

        let session_timeout_minutes = lookup("OAUTH_SESSION_TIMEOUT_MINUTES")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(10);

        let mut providers = HashMap::new();
        for provider in [AuthProvider::Google, AuthProvider::Facebook] {
            if let Some(registration) = ProviderRegistration::from_lookup(provider, lookup)? {
                providers.insert(provider, registration);
            }
        }

        Ok(Self {
            authorized_redirect_uris,
            callback_base_url: lookup("OAUTH2_CALLBACK_BASE_URL")
                .unwrap_or_else(|| "http://localhost:8080".to_string())
                .trim_end_matches('/')
                .to_string(),
            state_secret,
            session_timeout_minutes,
            providers,
        })
    }

    /// 프로바이더가 인가 코드를 돌려줄 콜백 URL
    pub fn callback_url(&self, provider: AuthProvider) -> String {
        format!("{}/login/oauth2/code/{}", self.callback_base_url, provider.as_str())
    }
}

/// 인증 코어 전체 설정
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    pub oauth: OAuthConfig,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, AppError> {
        Ok(Self {
            jwt: JwtConfig::from_lookup(lookup)?,
            oauth: OAuthConfig::from_lookup(lookup)?,
        })
    }
}

fn split_uri_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
