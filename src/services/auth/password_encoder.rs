//! 비밀번호 인코더
//!
//! 인증 코어는 비밀번호 해시를 불투명한 값으로 다룹니다.
//! `encode`로 만든 해시를 저장하고 `verify`의 참/거짓만 사용합니다.

use crate::errors::AppError;

/// 비밀번호 해싱 trait
pub trait PasswordEncoder: Send + Sync {
    /// 평문 비밀번호 해싱
    fn encode(&self, plaintext: &str) -> Result<String, AppError>;

    /// 평문과 저장된 해시의 일치 여부
    ///
    /// 해시 형식이 깨져 있어도 에러 대신 `false`를 반환합니다.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;

    /// 계정이 없을 때 대신 검증할 해시
    ///
    /// 존재하지 않는 계정도 실제 계정과 같은 비용으로 검증하여
    /// 응답 시간으로 계정 존재 여부가 드러나지 않게 합니다.
    fn placeholder_hash(&self) -> &str;
}

/// bcrypt 기반 인코더
pub struct BcryptPasswordEncoder {
    cost: u32,
    placeholder: String,
}

impl BcryptPasswordEncoder {
    /// 비용 인자로 인코더 생성
    ///
    /// 비교용 자리표시 해시를 같은 비용으로 미리 계산합니다.
    pub fn new(cost: u32) -> Result<Self, AppError> {
        let placeholder = bcrypt::hash(uuid::Uuid::new_v4().to_string(), cost)
            .map_err(|e| AppError::ConfigError(format!("bcrypt 초기화 실패 (cost={}): {}", cost, e)))?;

        Ok(Self { cost, placeholder })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn encode(&self, plaintext: &str) -> Result<String, AppError> {
        let hash_start = std::time::Instant::now();
        let hashed = bcrypt::hash(plaintext, self.cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        log::debug!("Password hashing took: {:?}", hash_start.elapsed());
        Ok(hashed)
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        match bcrypt::verify(plaintext, hash) {
            Ok(valid) => valid,
            Err(e) => {
                log::warn!("저장된 비밀번호 해시 검증 실패: {}", e);
                false
            }
        }
    }

    fn placeholder_hash(&self) -> &str {
        &self.placeholder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_and_verify() {
        let encoder = BcryptPasswordEncoder::new(4).unwrap();
        let hash = encoder.encode("correct horse").unwrap();

        assert_ne!(hash, "correct horse");
        assert!(encoder.verify("correct horse", &hash));
        assert!(!encoder.verify("battery staple", &hash));
    }

    #[test]
    fn test_corrupt_hash_does_not_verify() {
        let encoder = BcryptPasswordEncoder::new(4).unwrap();
        assert!(!encoder.verify("anything", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_placeholder_rejects_common_passwords() {
        let encoder = BcryptPasswordEncoder::new(4).unwrap();

        assert!(encoder.placeholder_hash().starts_with("$2"));
        assert!(!encoder.verify("", encoder.placeholder_hash()));
        assert!(!encoder.verify("password", encoder.placeholder_hash()));
    }

    #[test]
    fn test_invalid_cost_is_config_error() {
        assert!(matches!(BcryptPasswordEncoder::new(99), Err(AppError::ConfigError(_))));
    }
}
