//! 인증 유스케이스 서비스
//!
//! 로컬 가입/로그인과 페더레이션 로그인을 처리합니다. 계정 저장소,
//! 비밀번호 인코더, 토큰 서비스는 생성 시 주입받습니다.

use std::sync::Arc;

use crate::config::AuthProvider;
use crate::domain::dto::auth::{AuthResponse, LoginRequest, RegistrationRequest};
use crate::domain::entities::users::User;
use crate::domain::models::auth::AuthenticatedIdentity;
use crate::domain::models::oauth::{
    email_verified, picture_url, provider_user_id, string_attribute, ProviderAttributes,
};
use crate::errors::{AppError, AuthError};
use crate::repositories::users::AccountStore;

use super::{identity_resolver, PasswordEncoder, TokenService};

pub struct AuthService {
    accounts: Arc<dyn AccountStore>,
    encoder: Arc<dyn PasswordEncoder>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        encoder: Arc<dyn PasswordEncoder>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self { accounts, encoder, tokens }
    }

    /// 로컬 계정 가입 후 바로 토큰 발급
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 비밀번호 확인 불일치
    /// * `AppError::ConflictError` - 이미 사용 중인 이메일
    pub async fn register(&self, request: RegistrationRequest) -> Result<AuthResponse, AppError> {
        if request.password != request.confirm_password {
            return Err(AppError::ValidationError("Passwords do not match".to_string()));
        }

        if self.accounts.exists_by_email(&request.email).await? {
            return Err(AppError::ConflictError("Email is already in use".to_string()));
        }

        let password_hash = self.encoder.encode(&request.password)?;
        let user = self
            .accounts
            .create(User::new_local(request.full_name, request.email, password_hash))
            .await?;

        log::info!("새 로컬 계정 가입: {}", user.email);

        let identity = AuthenticatedIdentity::new(
            user.email,
            Some(user.full_name),
            user.roles,
            AuthProvider::Local,
        )
        .ok_or_else(|| AppError::InternalError("저장된 계정에 이메일이 없습니다".to_string()))?;

        self.respond(&identity)
    }

    /// 이메일/비밀번호 로그인
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let identity = identity_resolver::from_local_credential(
            self.accounts.as_ref(),
            self.encoder.as_ref(),
            &request.email,
            &request.password,
        )
        .await
        .inspect_err(|e| log::warn!("로컬 로그인 실패 - 사용자: {}, 사유: {}", request.email, e))?;

        log::info!("로컬 로그인 성공: {}", identity.subject_id());
        self.respond(&identity)
    }

    /// 프로바이더 속성으로 신원 확인
    ///
    /// 저장된 계정이 있으면 그 역할 집합을 재사용하고, 처음 로그인한 사용자는
    /// 계정을 새로 만듭니다. 비활성 계정은 `InvalidCredentials`입니다.
    /// 프로바이더가 `email_verified: false`를 주면 이메일로 계정을 찾지 않고 거부합니다.
    pub async fn federated_login(
        &self,
        provider: AuthProvider,
        attributes: &ProviderAttributes,
    ) -> Result<AuthenticatedIdentity, AppError> {
        let email = string_attribute(attributes, "email")
            .ok_or_else(|| AuthError::MissingRequiredAttribute("email".to_string()))?;

        if email_verified(attributes) == Some(false) {
            log::warn!("{} 미확인 이메일로 로그인 시도: {}", provider, email);
            return Err(AuthError::MissingRequiredAttribute("verified email".to_string()).into());
        }

        let persisted = match self.accounts.find_by_identifier(email).await? {
            Some(existing) if !existing.enabled => {
                log::warn!("비활성 계정의 페더레이션 로그인 시도: {}", email);
                return Err(AuthError::InvalidCredentials.into());
            }
            Some(existing) => existing,
            None => {
                log::info!("새 {} 사용자 등록: {}", provider, email);
                let user = User::new_oauth(
                    string_attribute(attributes, "name").unwrap_or(email).to_string(),
                    email.to_string(),
                    provider,
                    provider_user_id(attributes),
                    picture_url(attributes),
                );
                self.accounts.create(user).await?
            }
        };

        Ok(identity_resolver::from_federated_callback(
            provider,
            attributes,
            Some(&persisted.roles),
        )?)
    }

    fn respond(&self, identity: &AuthenticatedIdentity) -> Result<AuthResponse, AppError> {
        let token = self.tokens.issue(identity)?;
        Ok(AuthResponse::bearer(token, identity))
    }
}
