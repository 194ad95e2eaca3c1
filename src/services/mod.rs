//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스들은 서버 기동 시 한 번 생성되어 [`AppState`](crate::core::AppState)를 통해
//! 모든 워커에 공유됩니다.

pub mod auth;
