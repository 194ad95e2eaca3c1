//! MongoDB `users` 컬렉션 리포지토리

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use super::{AccountLookup, AccountStore};
use crate::db::Database;
use crate::domain::entities::users::User;
use crate::errors::AppError;

const COLLECTION: &str = "users";

#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_database().collection::<User>(COLLECTION),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        // 이메일 유니크 인덱스
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        // 생성일 인덱스
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl AccountLookup for UserRepository {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AppError> {
        self.find_by_email(identifier).await
    }
}

#[async_trait]
impl AccountStore for UserRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let count = self.collection
            .count_documents(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }

    async fn create(&self, mut user: User) -> Result<User, AppError> {
        // 중복 확인
        if self.exists_by_email(&user.email).await? {
            return Err(AppError::ConflictError("Email is already in use".to_string()));
        }

        let result = self.collection
            .insert_one(&user)
            .await
            .map_err(|e| match *e.kind {
                mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(ref we))
                    if we.code == 11000 =>
                {
                    AppError::ConflictError("Email is already in use".to_string())
                }
                _ => AppError::DatabaseError(e.to_string()),
            })?;

        user.id = result.inserted_id.as_object_id();
        log::info!("새 계정 저장: {} ({})", user.email, user.auth_provider);

        Ok(user)
    }
}
