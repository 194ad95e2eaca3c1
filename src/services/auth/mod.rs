//! 인증 및 보안 서비스 모듈
//!
//! 토큰 발급/검증, 두 종류의 자격 증명을 하나의 신원으로 정규화하는 확인기,
//! 페더레이션 로그인 핸드셰이크와 리다이렉트 검증을 제공합니다.
//!
//! ```text
//! ClaimsCodec ◄── TokenService ◄── AuthService ──► identity_resolver ──► AccountLookup
//!                      ▲                 │                 │
//!                      │                 ▼                 ▼
//!           FederatedRedirectGuard   AccountStore    PasswordEncoder
//!                      ▲
//!           FederatedLoginClient (state, code 교환, 사용자 속성)
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let tokens = TokenService::new(&config.jwt, Arc::new(SystemClock))?;
//! let token = tokens.issue(&identity)?;
//! let verified = tokens.verify(&token)?;
//! ```

pub mod auth_service;
pub mod claims_codec;
pub mod identity_resolver;
pub mod oauth_client;
pub mod password_encoder;
pub mod redirect_guard;
pub mod token_service;

pub use auth_service::AuthService;
pub use claims_codec::ClaimsCodec;
pub use oauth_client::{AuthorizationRequest, FederatedLoginClient};
pub use password_encoder::{BcryptPasswordEncoder, PasswordEncoder};
pub use redirect_guard::{CallbackExchange, FederatedRedirectGuard, RedirectAllowList};
pub use token_service::{extract_bearer_token, TokenService, TokenVerifier};
