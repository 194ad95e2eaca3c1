//! 인증 응답 DTO
use serde::Serialize;

use crate::config::AuthProvider;
use crate::domain::models::auth::AuthenticatedIdentity;

/// 로그인/회원가입 성공 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: IdentityResponse,
}

impl AuthResponse {
    pub fn bearer(access_token: String, identity: &AuthenticatedIdentity) -> Self {
        Self {
            access_token,
            token_type: "Bearer",
            user: IdentityResponse::from(identity),
        }
    }
}

/// 인증된 사용자 정보 응답
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub roles: Vec<String>,
    pub provider: AuthProvider,
}

impl From<&AuthenticatedIdentity> for IdentityResponse {
    fn from(identity: &AuthenticatedIdentity) -> Self {
        Self {
            email: identity.subject_id().to_string(),
            full_name: identity.display_name().map(str::to_string),
            roles: identity.roles().iter().cloned().collect(),
            provider: identity.provider(),
        }
    }
}
