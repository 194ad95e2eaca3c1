//! 인증 코어 에러 분류
//!
//! 토큰 검증, 자격 증명 확인, 페더레이션 리다이렉트 검증에서 발생하는
//! 모든 실패를 하나의 열거형으로 표현합니다. 호출자는 예외 대신
//! `Result<_, AuthError>`를 패턴 매칭하여 처리합니다.
//!
//! | AuthError | HTTP Status | 클라이언트 메시지 |
//! |-----------|-------------|-------------------|
//! | `Malformed` | 401 | `Invalid token` |
//! | `UnsupportedAlgorithm` | 401 | `Invalid token` |
//! | `Expired` | 401 | `Token expired` |
//! | `BadSignature` | 401 | `Invalid token signature` |
//! | `InvalidCredentials` | 401 | `Invalid email or password` |
//! | `MissingRequiredAttribute` | 401 | 누락된 속성 이름 포함 |
//! | `UnauthorizedRedirectUri` | 400 | 요청된 URI 포함 |
//! | `NoAuthorizedRedirects` | 400 | 고정 메시지 |
//! | `InternalFault` | 500 | `Unexpected authentication error` |

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

/// 인증 실패 분류
///
/// `InternalFault`만 서버 측 결함을 의미하며, 상세 내용은 로그에만 남고
/// 응답 본문에는 고정된 메시지만 나갑니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// 구조적으로 해석할 수 없는 토큰
    #[error("Invalid token")]
    Malformed,

    /// 만료된 토큰 (서명은 유효함)
    #[error("Token expired")]
    Expired,

    /// 서명 불일치
    #[error("Invalid token signature")]
    BadSignature,

    /// HS256 이외의 서명 알고리즘
    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// 계정 없음과 비밀번호 불일치를 구분하지 않는 단일 에러
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// 페더레이션 콜백에 필수 속성이 없음
    #[error("Missing required attribute from identity provider: {0}")]
    MissingRequiredAttribute(String),

    /// 허용 목록에 없는 리다이렉트 대상
    #[error("Unauthorized Redirect URI: {0}")]
    UnauthorizedRedirectUri(String),

    /// 허용된 리다이렉트 URI가 하나도 설정되지 않음
    #[error("No authorized redirect URIs configured")]
    NoAuthorizedRedirects,

    /// 서명 키 설정 오류, 저장소 장애 등 서버 측 결함
    #[error("Internal authentication fault: {0}")]
    InternalFault(String),
}

impl AuthError {
    /// 응답 본문에 들어가는 메시지
    pub fn public_message(&self) -> String {
        match self {
            AuthError::Malformed | AuthError::UnsupportedAlgorithm(_) => "Invalid token".to_string(),
            AuthError::InternalFault(_) => "Unexpected authentication error".to_string(),
            other => other.to_string(),
        }
    }

    /// 토큰 자체의 결함으로 인한 실패인지 여부
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::Malformed
                | AuthError::Expired
                | AuthError::BadSignature
                | AuthError::UnsupportedAlgorithm(_)
        )
    }
}

impl actix_web::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UnauthorizedRedirectUri(_) | AuthError::NoAuthorizedRedirects => {
                StatusCode::BAD_REQUEST
            }
            AuthError::InternalFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AuthError::InternalFault(detail) = self {
            log::error!("인증 처리 중 내부 오류: {}", detail);
        }
        super::error_body(self.status_code(), &self.public_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_token_errors_are_unauthorized() {
        for err in [
            AuthError::Malformed,
            AuthError::Expired,
            AuthError::BadSignature,
            AuthError::UnsupportedAlgorithm("none".into()),
        ] {
            assert!(err.is_token_error());
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_public_messages() {
        assert_eq!(AuthError::Expired.public_message(), "Token expired");
        assert_eq!(AuthError::BadSignature.public_message(), "Invalid token signature");
        assert_eq!(AuthError::Malformed.public_message(), "Invalid token");
        assert_eq!(
            AuthError::UnsupportedAlgorithm("HS512".into()).public_message(),
            "Invalid token"
        );
    }

    #[test]
    fn test_internal_fault_hides_detail() {
        let err = AuthError::InternalFault("secret is 3 bytes long".into());

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Unexpected authentication error");
        assert!(!err.is_token_error());
    }

    #[test]
    fn test_redirect_errors_are_bad_request() {
        assert_eq!(AuthError::NoAuthorizedRedirects.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::UnauthorizedRedirectUri("https://evil.example.com/cb".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
