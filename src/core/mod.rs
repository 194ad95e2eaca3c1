//! 애플리케이션 코어
//!
//! 서버 기동 시 한 번 조립되어 `web::Data`로 모든 워커에 공유되는
//! [`AppState`]를 정의합니다.

pub mod app_state;

pub use app_state::AppState;
