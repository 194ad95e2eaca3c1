//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB에 저장되는 계정 문서
//! ├── models    - 인증된 주체, 토큰 클레임, OAuth 응답 모델
//! └── dto       - API 요청/응답 계약
//! ```

pub mod dto;
pub mod entities;
pub mod models;
