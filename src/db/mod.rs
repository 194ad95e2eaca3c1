//! MongoDB 연결 관리
//!
//! 서버 기동 시 한 번 연결하고 `ping`으로 연결 상태를 확인합니다.

use log::info;
use mongodb::{options::ClientOptions, Client};

use crate::config::DatabaseConfig;
use crate::errors::AppError;

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(uri)
            .await
            .map_err(|e| AppError::ConfigError(format!("MONGODB_URI 파싱 실패: {}", e)))?;

        client_options.app_name = Some("cosmo_auth".to_string());

        let client = Client::with_options(client_options)
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        client
            .database(database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB 연결 실패: {}", e)))?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name: database_name.to_string(),
        })
    }

    /// `MONGODB_URI`, `DATABASE_NAME` 환경 변수로 연결
    pub async fn from_env() -> Result<Self, AppError> {
        Self::connect(&DatabaseConfig::uri(), &DatabaseConfig::name()).await
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }
}
