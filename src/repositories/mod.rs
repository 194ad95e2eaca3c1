//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 인증 코어는 계정 저장소를 trait으로만 소비합니다.
//! 운영에서는 MongoDB 구현을, 테스트에서는 메모리 구현을 주입합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{AccountLookup, UserRepository};
//!
//! let user_repo = UserRepository::new(&database);
//! let user = user_repo.find_by_identifier("user@example.com").await?;
//! ```

pub mod users;
