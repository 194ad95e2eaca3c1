//! 테스트용 메모리 계정 저장소

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::{AccountLookup, AccountStore};
use crate::domain::entities::users::User;
use crate::errors::AppError;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
    fail_lookups: bool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::new();
        for user in users {
            repo.insert(user);
        }
        repo
    }

    /// 모든 조회가 `DatabaseError`로 실패하는 저장소
    pub fn failing() -> Self {
        Self {
            fail_lookups: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, mut user: User) {
        user.id.get_or_insert_with(ObjectId::new);
        self.users.write().unwrap().insert(user.email.clone(), user);
    }

    pub fn get(&self, email: &str) -> Option<User> {
        self.users.read().unwrap().get(email).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap().len()
    }
}

#[async_trait]
impl AccountLookup for InMemoryUserRepository {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AppError> {
        if self.fail_lookups {
            return Err(AppError::DatabaseError("connection refused".to_string()));
        }
        Ok(self.get(identifier))
    }
}

#[async_trait]
impl AccountStore for InMemoryUserRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.find_by_identifier(email).await?.is_some())
    }

    async fn create(&self, mut user: User) -> Result<User, AppError> {
        if self.exists_by_email(&user.email).await? {
            return Err(AppError::ConflictError("Email is already in use".to_string()));
        }
        user.id = Some(ObjectId::new());
        self.insert(user.clone());
        Ok(user)
    }
}
