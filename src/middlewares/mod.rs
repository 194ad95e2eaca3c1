//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인의 인증 미들웨어를 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - 공개 경로(`/api/auth/`, `/oauth2/`, `/login/oauth2/code/`, `/error`)는 검증 생략
//! - Bearer 토큰 추출 및 검증
//! - 검증된 신원을 request extension에 저장
//! - 검증 실패 시 401 JSON 응답으로 체인 중단
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{App, HttpServer};
//! use crate::middlewares::AuthMiddleware;
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .wrap(AuthMiddleware::new(tokens.clone()))
//!         .configure(configure_routes)
//! })
//! ```

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::{is_public_path, AuthMiddleware};
