//! 코스모 인증 코어
//!
//! 상태 없는 Bearer 토큰 인증 서비스입니다. 로컬 이메일/비밀번호 계정과
//! Google, Facebook 페더레이션 로그인을 하나의 신원 모델로 정규화하고,
//! HS256 토큰을 발급/검증하며, 페더레이션 로그인 완료 시 허용 목록 기반으로
//! 리다이렉트합니다.
//!
//! # Features
//!
//! - **토큰 서비스**: HS256 토큰 발급, 서명 우선 검증, 주입 가능한 시간원
//! - **신원 확인기**: 로컬 자격 증명과 OAuth 콜백 속성의 정규화
//! - **인증 미들웨어**: 요청별 신원 설치, 공개 경로 우회, 구조화된 401 응답
//! - **리다이렉트 가드**: host/port 허용 목록 기반 오픈 리다이렉트 방지
//! - **MongoDB**: 계정 영구 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ AuthMiddleware  │ ← Bearer 토큰 검증, 신원 설치
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 토큰, 신원 확인, OAuth, 리다이렉트 가드
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 계정 조회/생성
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     MongoDB     │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use cosmo_auth::services::auth::TokenService;
//! use cosmo_auth::utils::SystemClock;
//!
//! let tokens = TokenService::new(&config.jwt, Arc::new(SystemClock))?;
//! let token = tokens.issue(&identity)?;
//! let identity = tokens.verify(&token)?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
