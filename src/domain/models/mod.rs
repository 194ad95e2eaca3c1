//! # Domain Models Module
//!
//! 도메인 모델과 값 객체를 정의하는 모듈입니다.
//!
//! - [`auth`] - 인증된 주체 ([`AuthenticatedIdentity`](auth::AuthenticatedIdentity))
//! - [`token`] - JWT 클레임 ([`TokenClaims`](token::TokenClaims))
//! - [`oauth`] - 외부 OAuth 프로바이더 응답 모델

pub mod auth;
pub mod oauth;
pub mod token;
