//! 인증된 주체 모델
//!
//! 로컬 자격 증명과 외부 OAuth 콜백, 두 경로의 인증 결과를 하나로 정규화한
//! [`AuthenticatedIdentity`]와, 하위 핸들러가 요청 범위 신원을 읽는
//! ActixWeb 추출자를 제공합니다.

use std::collections::BTreeSet;
use std::future::{ready, Ready};

use actix_web::http::StatusCode;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 역할이 하나도 없을 때 부여되는 기본 역할
pub const DEFAULT_ROLE: &str = "ROLE_USER";

/// 인증된 주체
///
/// `subject_id`(이메일)는 항상 비어 있지 않으며, 하위 인가 로직이 동일성 비교와
/// 조회에 사용할 수 있는 유일한 필드입니다. 역할 집합도 항상 비어 있지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    subject_id: String,
    display_name: Option<String>,
    roles: BTreeSet<String>,
    provider: AuthProvider,
}

impl AuthenticatedIdentity {
    /// 새 신원 생성
    ///
    /// 주체 식별자가 비어 있으면 `None`을 반환합니다.
    /// 비어 있는 역할 문자열은 버리고, 남는 역할이 없으면 `ROLE_USER`를 부여합니다.
    pub fn new<I, S>(
        subject_id: impl Into<String>,
        display_name: Option<String>,
        roles: I,
        provider: AuthProvider,
    ) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let subject_id = subject_id.into().trim().to_string();
        if subject_id.is_empty() {
            return None;
        }

        let mut roles: BTreeSet<String> = roles
            .into_iter()
            .map(|role| role.as_ref().trim().to_string())
            .filter(|role| !role.is_empty())
            .collect();
        if roles.is_empty() {
            roles.insert(DEFAULT_ROLE.to_string());
        }

        Some(Self {
            subject_id,
            display_name: display_name.filter(|name| !name.trim().is_empty()),
            roles,
            provider,
        })
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn provider(&self) -> AuthProvider {
        self.provider
    }

    /// 특정 역할을 보유하고 있는지 확인
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// 토큰 `roles` 클레임용 쉼표 구분 문자열
    pub fn joined_roles(&self) -> String {
        self.roles.iter().map(String::as_str).collect::<Vec<_>>().join(",")
    }
}

/// 현재 요청에 설치된 신원 조회
///
/// 인증 미들웨어가 검증을 끝낸 요청에만 값이 있습니다.
pub fn current_identity(req: &HttpRequest) -> Option<AuthenticatedIdentity> {
    req.extensions().get::<AuthenticatedIdentity>().cloned()
}

/// 신원이 반드시 필요한 핸들러용 추출자
///
/// 설치된 신원이 없으면 `{"status":401,"error":"Unauthorized",...}`로 응답합니다.
impl FromRequest for AuthenticatedIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(current_identity(req).ok_or_else(|| {
            actix_web::error::InternalError::from_response(
                "authentication required",
                unauthenticated_response(),
            )
            .into()
        }))
    }
}

fn unauthenticated_response() -> actix_web::HttpResponse {
    crate::errors::error_body(
        StatusCode::UNAUTHORIZED,
        "Full authentication is required to access this resource",
    )
}

/// 선택적 인증 사용자 추출자
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<AuthenticatedIdentity>);

impl FromRequest for OptionalIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(current_identity(req))))
    }
}
