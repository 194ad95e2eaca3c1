//! 인증 요청 DTO
//!
//! 회원가입, 로그인, OAuth 콜백 요청 정보를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// 로컬 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 회원가입 요청 구조체
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[validate(length(min = 1, max = 100, message = "이름을 입력해주세요"))]
    pub full_name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 6, message = "비밀번호는 6자 이상이어야 합니다"))]
    pub password: String,

    pub confirm_password: String,
}

/// OAuth 콜백 쿼리 파라미터 구조체
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// 로그인 완료 후 돌아갈 주소 (허용 목록 검증 대상)
    pub redirect_uri: Option<String>,
    /// 에러가 있을 경우 (사용자가 거부했거나 에러 발생)
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_request_uses_camel_case() {
        let request: RegistrationRequest = serde_json::from_str(
            r#"{"fullName":"Ada","email":"ada@example.com","password":"secret1","confirmPassword":"secret1"}"#,
        )
        .unwrap();

        assert_eq!(request.full_name, "Ada");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_login_request_requires_email_format() {
        let request = LoginRequest {
            email: "not-an-email".into(),
            password: "x".into(),
        };
        assert!(request.validate().is_err());
    }
}
