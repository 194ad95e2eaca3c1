//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 서버 기동 시 한 번 읽어 불변 값으로 만듭니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 데이터베이스, 속도 제한 설정
//! - [`auth_config`] - JWT, OAuth2 프로바이더, 리다이렉트 허용 목록 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ### 필수 환경 변수
//!
//! ```bash
//! export JWT_SECRET="at-least-32-bytes-of-secret-material"
//! export OAUTH2_AUTHORIZED_REDIRECT_URIS="http://localhost:3000/oauth2/redirect"
//! ```
//!
//! ### 선택적 환경 변수
//!
//! ```bash
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export HOST="127.0.0.1"
//! export PORT="8080"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="cosmoconnect"
//! export BCRYPT_COST="12"          # 4-15 범위
//! export JWT_EXPIRATION_MS="86400000"
//! ```

pub mod auth_config;
pub mod data_config;

pub use auth_config::*;
pub use data_config::*;
