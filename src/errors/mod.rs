//! 에러 모듈
//!
//! - [`errors`] - 애플리케이션 전역 에러 [`AppError`]
//! - [`auth_error`] - 인증 코어 에러 분류 [`AuthError`]
//!
//! 두 에러 모두 같은 JSON 형식으로 응답합니다.
//!
//! ```json
//! {"status": 401, "error": "Unauthorized", "message": "Token expired"}
//! ```

pub mod auth_error;
pub mod errors;

pub use auth_error::AuthError;
pub use errors::{AppError, AppResult, ErrorContext};

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;

/// `{status, error, message}` 형식의 에러 응답 본문 생성
pub(crate) fn error_body(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "status": status.as_u16(),
        "error": status.canonical_reason().unwrap_or("Error"),
        "message": message,
    }))
}
