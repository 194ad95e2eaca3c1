//! JWT 토큰 관리 서비스 구현
//!
//! 인증된 주체로부터 HS256 액세스 토큰을 발급하고, 받은 토큰을 검증하여
//! 다시 [`AuthenticatedIdentity`]로 복원합니다. 서명과 클레임 직렬화는
//! [`ClaimsCodec`]에, 현재 시각은 주입된 [`Clock`]에 위임합니다.

use std::sync::Arc;

use chrono::Duration;

use crate::config::JwtConfig;
use crate::domain::models::auth::AuthenticatedIdentity;
use crate::domain::models::token::TokenClaims;
use crate::errors::AuthError;
use crate::utils::Clock;

use super::ClaimsCodec;

/// 요청 인증 미들웨어가 사용하는 토큰 검증 기능
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError>;
}

impl TokenVerifier for TokenService {
    fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        TokenService::verify(self, token)
    }
}

/// JWT 토큰 관리 서비스
///
/// 상태는 서명 키와 TTL, 시간원뿐이므로 여러 워커가 `Arc`로 공유해도 됩니다.
pub struct TokenService {
    codec: ClaimsCodec,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// 설정과 시간원으로 서비스 생성
    ///
    /// # Errors
    ///
    /// * `AuthError::InternalFault` - 서명 키가 32바이트 미만이거나, TTL이 1초 미만이거나
    ///   초 단위로 나누어떨어지지 않음 (`exp`는 초 단위 클레임)
    pub fn new(config: &JwtConfig, clock: Arc<dyn Clock>) -> Result<Self, AuthError> {
        let ttl = config.expiration();
        if ttl < Duration::seconds(1) || ttl.num_milliseconds() % 1000 != 0 {
            return Err(AuthError::InternalFault(format!(
                "JWT expiration must be a whole number of seconds (at least one), got {}ms",
                ttl.num_milliseconds()
            )));
        }

        Ok(Self {
            codec: ClaimsCodec::new(config.secret().as_bytes())?,
            ttl,
            clock,
        })
    }

    /// 액세스 토큰 수명
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 인증된 주체를 위한 액세스 토큰 발급
    ///
    /// `sub`, `username`, `email` 클레임은 모두 주체 식별자(이메일)로 채워지고
    /// `exp = iat + TTL`입니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = state.token_service.issue(&identity)?;
    /// let response = AuthResponse::bearer(token, &identity);
    /// ```
    pub fn issue(&self, identity: &AuthenticatedIdentity) -> Result<String, AuthError> {
        let issued_at = self.clock.now().timestamp();
        let subject = identity.subject_id().to_string();

        let claims = TokenClaims {
            sub: subject.clone(),
            username: subject.clone(),
            email: subject,
            roles: identity.joined_roles(),
            auth_provider: identity.provider(),
            iat: issued_at,
            exp: issued_at + self.ttl.num_seconds(),
        };

        self.codec.encode(&claims)
    }

    /// 토큰 검증 후 주체 복원
    ///
    /// 서명을 먼저 확인하고, 그 다음 만료를 판정합니다. 토큰은 `exp` 시각
    /// 직전까지만 유효합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::Malformed` - 구조적으로 잘못된 토큰 또는 빈 `sub`
    /// * `AuthError::UnsupportedAlgorithm` - HS256 이외의 알고리즘
    /// * `AuthError::BadSignature` - 서명 불일치
    /// * `AuthError::Expired` - 만료된 토큰
    pub fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        let claims = self.codec.decode(token)?;

        let now_ms = self.clock.now().timestamp_millis();
        if now_ms >= claims.exp.saturating_mul(1000) {
            return Err(AuthError::Expired);
        }

        AuthenticatedIdentity::new(
            claims.sub,
            None,
            claims.roles.split(','),
            claims.auth_provider,
        )
        .ok_or(AuthError::Malformed)
    }
}

/// Bearer 토큰에서 실제 토큰 부분 추출
///
/// HTTP Authorization 헤더의 `Bearer {token}` 형식에서 토큰 부분만 꺼냅니다.
/// 접두사가 다르거나 토큰이 비어 있으면 `None`입니다.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
