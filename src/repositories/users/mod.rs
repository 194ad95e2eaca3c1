//! 사용자 계정 저장소
//!
//! - [`AccountLookup`] - 식별자(이메일)로 계정 조회
//! - [`AccountStore`] - 가입과 첫 페더레이션 로그인을 위한 계정 생성
//! - [`UserRepository`](user_repo::UserRepository) - MongoDB 구현

use async_trait::async_trait;

use crate::domain::entities::users::User;
use crate::errors::AppError;

#[cfg(test)]
pub mod memory_repo;
pub mod user_repo;

#[cfg(test)]
pub use memory_repo::InMemoryUserRepository;
pub use user_repo::UserRepository;

/// 식별자로 계정을 찾는 기능
#[async_trait]
pub trait AccountLookup: Send + Sync {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AppError>;
}

/// 계정 조회와 생성
#[async_trait]
pub trait AccountStore: AccountLookup {
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;

    /// 새 계정 저장
    ///
    /// 같은 이메일이 이미 있으면 `AppError::ConflictError`입니다.
    async fn create(&self, user: User) -> Result<User, AppError>;
}
