//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 입력 검증과 응답 변환만 담당하고, 로직은 [`AppState`](crate::core::AppState)에
//! 담긴 서비스에 위임합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   AuthMiddleware - Bearer 토큰 검증, 신원 설치
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리
//! ├─────────────────────────────────────────────┤
//!   Services - 인증 유스케이스
//! ├─────────────────────────────────────────────┤
//!   Repositories - 계정 저장소
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 엔드포인트
//!
//! | 메서드 | 경로 | 핸들러 |
//! |--------|------|--------|
//! | POST | `/api/auth/register` | [`auth::register`] |
//! | POST | `/api/auth/login` | [`auth::login`] |
//! | GET | `/oauth2/authorization/{provider}` | [`oauth::authorize`] |
//! | GET | `/login/oauth2/code/{provider}` | [`oauth::callback`] |
//! | GET | `/api/users/me` | [`users::me`] |
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며, 에러는
//! `ResponseError` 구현을 통해 `{status, error, message}` JSON으로 변환됩니다.

pub mod auth;
pub mod oauth;
pub mod users;
