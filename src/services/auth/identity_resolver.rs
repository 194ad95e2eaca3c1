//! 신원 확인기
//!
//! 로컬 이메일/비밀번호 자격 증명과 외부 OAuth 콜백 속성, 두 출처를
//! 같은 [`AuthenticatedIdentity`]로 정규화합니다.

use crate::config::AuthProvider;
use crate::domain::models::auth::AuthenticatedIdentity;
use crate::domain::models::oauth::{string_attribute, ProviderAttributes};
use crate::errors::AuthError;
use crate::repositories::users::AccountLookup;

use super::PasswordEncoder;

/// 로컬 자격 증명으로 신원 확인
///
/// 계정 없음, 비밀번호 불일치, 비밀번호가 없는 OAuth 계정, 비활성 계정은
/// 모두 같은 `AuthError::InvalidCredentials`로 실패합니다. 계정이 없을 때도
/// 자리표시 해시로 한 번 검증하여 두 경로의 비용을 맞춥니다.
///
/// # Errors
///
/// * `AuthError::InvalidCredentials` - 위의 모든 자격 증명 실패
/// * `AuthError::InternalFault` - 계정 조회 실패
pub async fn from_local_credential<L, E>(
    lookup: &L,
    encoder: &E,
    email: &str,
    candidate_password: &str,
) -> Result<AuthenticatedIdentity, AuthError>
where
    L: AccountLookup + ?Sized,
    E: PasswordEncoder + ?Sized,
{
    let account = lookup
        .find_by_identifier(email)
        .await
        .map_err(|e| AuthError::InternalFault(format!("계정 조회 실패: {}", e)))?;

    let Some(account) = account else {
        encoder.verify(candidate_password, encoder.placeholder_hash());
        return Err(AuthError::InvalidCredentials);
    };

    let stored_hash = account
        .password_hash
        .as_deref()
        .unwrap_or_else(|| encoder.placeholder_hash());
    let password_matches = encoder.verify(candidate_password, stored_hash);

    if !password_matches || !account.can_authenticate_with_password() {
        return Err(AuthError::InvalidCredentials);
    }

    AuthenticatedIdentity::new(
        account.email,
        Some(account.full_name),
        account.roles,
        AuthProvider::Local,
    )
    .ok_or(AuthError::InvalidCredentials)
}

/// 외부 프로바이더 콜백 속성으로 신원 확인
///
/// `email` 속성이 필수이고 표시 이름은 `name` 속성에서 가져옵니다.
/// 이미 저장된 계정이 있으면 그 역할 집합을 그대로 쓰고, 없으면 `ROLE_USER`입니다.
///
/// # Errors
///
/// * `AuthError::MissingRequiredAttribute` - `email` 속성 없음
pub fn from_federated_callback(
    provider: AuthProvider,
    attributes: &ProviderAttributes,
    persisted_roles: Option<&[String]>,
) -> Result<AuthenticatedIdentity, AuthError> {
    let email = string_attribute(attributes, "email")
        .ok_or_else(|| AuthError::MissingRequiredAttribute("email".to_string()))?;
    let display_name = string_attribute(attributes, "name").map(str::to_string);

    AuthenticatedIdentity::new(
        email,
        display_name,
        persisted_roles.unwrap_or_default(),
        provider,
    )
    .ok_or_else(|| AuthError::MissingRequiredAttribute("email".to_string()))
}
