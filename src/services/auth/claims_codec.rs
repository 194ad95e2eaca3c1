//! JWT 클레임 코덱
//!
//! [`TokenClaims`]를 HS256 서명된 compact JWS(`header.payload.signature`)로
//! 직렬화하고, 받은 토큰을 다시 클레임으로 해석합니다. 시간이나 I/O에는
//! 의존하지 않으며 만료 판정은 [`TokenService`](super::TokenService)가 담당합니다.
//!
//! ## 검증 순서
//!
//! ```text
//! split ─► header 해석 ─► alg == HS256 ─► 서명 재계산/상수 시간 비교 ─► payload 해석
//!  │           │                │                     │                      │
//! Malformed  Malformed   UnsupportedAlgorithm    BadSignature            Malformed
//! ```
//!
//! 점으로 나눈 세그먼트가 정확히 세 개가 아니면 `Malformed`입니다.
//! 서명은 받은 그대로의 `header.payload` 바이트 위에서 다시 계산합니다.
//! 클레임은 서명이 확인된 뒤에만 읽습니다.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{crypto, Algorithm, DecodingKey, EncodingKey, Header};
use serde::Deserialize;

use crate::domain::models::token::TokenClaims;
use crate::errors::AuthError;

/// HS256 서명 키 최소 길이 (256비트)
pub const MIN_SECRET_BYTES: usize = 32;

/// 서명 검증 전에 읽는 헤더 필드
#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

/// HS256 클레임 코덱
pub struct ClaimsCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl ClaimsCodec {
    /// 대칭 서명 키로 코덱 생성
    ///
    /// # Errors
    ///
    /// * `AuthError::InternalFault` - 키가 32바이트보다 짧음
    pub fn new(secret: &[u8]) -> Result<Self, AuthError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(AuthError::InternalFault(format!(
                "JWT signing secret must be at least {} bytes, got {}",
                MIN_SECRET_BYTES,
                secret.len()
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    /// 클레임을 서명된 토큰 문자열로 직렬화
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalFault(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 토큰 서명을 확인하고 클레임을 해석
    ///
    /// 만료 여부는 확인하지 않습니다.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut segments = token.split('.');
        let (Some(encoded_header), Some(encoded_payload), Some(signature), None) =
            (segments.next(), segments.next(), segments.next(), segments.next())
        else {
            return Err(AuthError::Malformed);
        };
        let signing_input = &token[..encoded_header.len() + 1 + encoded_payload.len()];

        let header: RawHeader = decode_segment(encoded_header)?;
        if header.alg != "HS256" {
            return Err(AuthError::UnsupportedAlgorithm(header.alg));
        }

        let verified = crypto::verify(
            signature,
            signing_input.as_bytes(),
            &self.decoding_key,
            Algorithm::HS256,
        )
        .map_err(|e| AuthError::InternalFault(format!("JWT 서명 검증 실패: {}", e)))?;
        if !verified {
            return Err(AuthError::BadSignature);
        }

        decode_segment(encoded_payload)
    }
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, AuthError> {
    let bytes = URL_SAFE_NO_PAD.decode(segment).map_err(|_| AuthError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| AuthError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;

    const SECRET: &[u8] = b"cosmo-test-secret-0123456789abcdef";

    fn claims() -> TokenClaims {
        TokenClaims {
            sub: "ada@example.com".into(),
            username: "ada@example.com".into(),
            email: "ada@example.com".into(),
            roles: "ROLE_USER,ROLE_ADMIN".into(),
            auth_provider: AuthProvider::Google,
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        }
    }

    /// 임의의 header/payload 바이트에 올바른 HS256 서명을 붙임
    fn sign_raw(header: &str, payload: &str) -> String {
        let signing_input = format!("{}.{}", URL_SAFE_NO_PAD.encode(header), URL_SAFE_NO_PAD.encode(payload));
        let signature = crypto::sign(
            signing_input.as_bytes(),
            &EncodingKey::from_secret(SECRET),
            Algorithm::HS256,
        )
        .unwrap();
        format!("{}.{}", signing_input, signature)
    }

    #[test]
    fn test_encode_then_decode() {
        let codec = ClaimsCodec::new(SECRET).unwrap();
        let token = codec.encode(&claims()).unwrap();

        assert_eq!(token.split('.').count(), 3);
        assert_eq!(codec.decode(&token).unwrap(), claims());
    }

    #[test]
    fn test_short_secret_is_internal_fault() {
        assert!(matches!(ClaimsCodec::new(b"too-short"), Err(AuthError::InternalFault(_))));
    }

    #[test]
    fn test_every_signature_byte_flip_is_bad_signature() {
        let codec = ClaimsCodec::new(SECRET).unwrap();
        let token = codec.encode(&claims()).unwrap();
        let signature_start = token.rfind('.').unwrap() + 1;

        for index in signature_start..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            assert_eq!(codec.decode(&tampered), Err(AuthError::BadSignature), "position {}", index);
        }
    }

    #[test]
    fn test_tampered_payload_is_bad_signature() {
        let codec = ClaimsCodec::new(SECRET).unwrap();
        let token = codec.encode(&claims()).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let mut forged = claims();
        forged.exp += 86_400;
        forged.roles = "ROLE_ADMIN".into();
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());

        let tampered = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);
        assert_eq!(codec.decode(&tampered), Err(AuthError::BadSignature));
    }

    #[test]
    fn test_other_secret_is_bad_signature() {
        let token = ClaimsCodec::new(SECRET).unwrap().encode(&claims()).unwrap();
        let other = ClaimsCodec::new(b"another-secret-0123456789abcdefgh").unwrap();

        assert_eq!(other.decode(&token), Err(AuthError::BadSignature));
    }

    #[test]
    fn test_unsupported_algorithm() {
        let codec = ClaimsCodec::new(SECRET).unwrap();

        let hs512 = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims(),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert_eq!(codec.decode(&hs512), Err(AuthError::UnsupportedAlgorithm("HS512".into())));

        let unsigned = format!(
            "{}.{}.",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims()).unwrap())
        );
        assert_eq!(codec.decode(&unsigned), Err(AuthError::UnsupportedAlgorithm("none".into())));
    }

    #[test]
    fn test_structurally_invalid_tokens_are_malformed() {
        let codec = ClaimsCodec::new(SECRET).unwrap();

        for token in ["", "abc", "abc.def", "!!!.e30.sig", "e30.e30.sig"] {
            assert_eq!(codec.decode(token), Err(AuthError::Malformed), "token {:?}", token);
        }
    }

    #[test]
    fn test_extra_segments_are_malformed_not_bad_signature() {
        let codec = ClaimsCodec::new(SECRET).unwrap();
        let token = codec.encode(&claims()).unwrap();
        let header = token.split('.').next().unwrap();

        let four = format!("{}.extra", token);
        let five = format!("{}.e30.e30.e30.sig", header);
        let trailing_dot = format!("{}.", token);

        for candidate in [four, five, trailing_dot] {
            assert_eq!(codec.decode(&candidate), Err(AuthError::Malformed), "token {:?}", candidate);
        }
    }

    #[test]
    fn test_signed_but_invalid_payload_is_malformed() {
        let codec = ClaimsCodec::new(SECRET).unwrap();

        let not_json = sign_raw(r#"{"alg":"HS256","typ":"JWT"}"#, "not json");
        assert_eq!(codec.decode(&not_json), Err(AuthError::Malformed));

        let missing_claims = sign_raw(r#"{"alg":"HS256","typ":"JWT"}"#, r#"{"sub":"ada@example.com"}"#);
        assert_eq!(codec.decode(&missing_claims), Err(AuthError::Malformed));
    }

    #[test]
    fn test_missing_optional_claims_use_defaults() {
        let codec = ClaimsCodec::new(SECRET).unwrap();
        let token = sign_raw(
            r#"{"alg":"HS256","typ":"JWT"}"#,
            r#"{"sub":"a@b.c","username":"a@b.c","email":"a@b.c","iat":1,"exp":2}"#,
        );

        let decoded = codec.decode(&token).unwrap();
        assert_eq!(decoded.roles, "");
        assert_eq!(decoded.auth_provider, AuthProvider::Local);
    }
}
