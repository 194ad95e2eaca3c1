//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 데이터를 전송하기 위한 객체들을 정의하는 모듈입니다.
//!
//! | 모듈 | 역할 |
//! |------|------|
//! | `auth::request` | HTTP 요청 본문/쿼리 매핑 (`validator`로 검증) |
//! | `auth::response` | HTTP 응답 본문 매핑 |

pub mod auth;

pub use auth::*;
