//! JWT 토큰 클레임 구조체
//!
//! RFC 7519 JWT 표준 클레임과 애플리케이션 특화 클레임을 정의합니다.
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// JWT 토큰의 클레임(Payload) 구조체
///
/// 식별자 네임스페이스가 하나뿐이므로 `sub`, `username`, `email`은
/// 모두 같은 값(이메일)을 가집니다.
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (이메일)
/// - `username`, `email`: `sub`와 동일
/// - `roles`: 쉼표로 연결한 역할 문자열 (빈 문자열이면 `ROLE_USER`로 해석)
/// - `auth_provider`: 인증 방식 (없으면 `local`)
/// - `iat`: 토큰 발급 시간 (Unix timestamp, 초)
/// - `exp`: 토큰 만료 시간 (Unix timestamp, 초)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub roles: String,
    #[serde(default)]
    pub auth_provider: AuthProvider,
    pub iat: i64,
    pub exp: i64,
}
