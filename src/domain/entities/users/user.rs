use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::models::auth::DEFAULT_ROLE;

/// 사용자 엔티티
///
/// `users` 컬렉션에 저장되는 계정 문서입니다. 인증 코어 입장에서는
/// 식별자(이메일)로 조회되는 저장 계정이며, 로컬 계정만 비밀번호 해시를 가집니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 표시 이름
    pub full_name: String,
    /// 사용자 이메일 (unique, 로그인 식별자)
    pub email: String,
    /// 해시된 비밀번호 (OAuth 사용자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 프로필 이미지 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// 이메일 인증 여부 (OAuth 사용자는 기본적으로 true)
    pub email_verified: bool,
    /// 사용자 역할
    pub roles: Vec<String>,
    /// 계정 활성화 여부
    pub enabled: bool,
    /// 인증 프로바이더
    pub auth_provider: AuthProvider,
    /// OAuth 프로바이더 측 사용자 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/패스워드)
    pub fn new_local(full_name: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            full_name,
            email,
            password_hash: Some(password_hash),
            image_url: None,
            email_verified: false,
            roles: vec![DEFAULT_ROLE.to_string()],
            enabled: true,
            auth_provider: AuthProvider::Local,
            provider_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 OAuth 사용자 생성
    ///
    /// 프로바이더가 이미 이메일을 확인했으므로 인증 완료 상태로 시작됩니다.
    pub fn new_oauth(
        full_name: String,
        email: String,
        auth_provider: AuthProvider,
        provider_id: Option<String>,
        image_url: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            full_name,
            email,
            password_hash: None,
            image_url,
            email_verified: true,
            roles: vec![DEFAULT_ROLE.to_string()],
            enabled: true,
            auth_provider,
            provider_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.enabled && self.password_hash.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_user() {
        let user = User::new_local("Ada".into(), "ada@example.com".into(), "$2b$04$hash".into());

        assert_eq!(user.roles, vec!["ROLE_USER"]);
        assert_eq!(user.auth_provider, AuthProvider::Local);
        assert!(user.can_authenticate_with_password());
        assert!(user.id.is_none());
    }

    #[test]
    fn test_oauth_user_cannot_use_password() {
        let user = User::new_oauth(
            "Ada".into(),
            "ada@example.com".into(),
            AuthProvider::Google,
            Some("g-1".into()),
            None,
        );

        assert!(user.email_verified);
        assert!(!user.can_authenticate_with_password());
    }
}
