//! 공용 유틸리티 모듈
//!
//! - [`clock`] - 토큰 발급/만료 판정에 쓰이는 시간 공급원

pub mod clock;

pub use clock::*;
