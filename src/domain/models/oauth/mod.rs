//! OAuth 2.0 프로바이더 연동 모델
//!
//! 인가 코드 교환 응답과, 사용자 정보 엔드포인트가 돌려주는 속성 맵을 정의합니다.

use serde::Deserialize;
use serde_json::{Map, Value};

/// 프로바이더 사용자 정보 응답 (속성 이름 → 값)
///
/// Google은 `sub`, Facebook은 `id`를 프로바이더 측 식별자로 사용합니다.
pub type ProviderAttributes = Map<String, Value>;

/// 속성 맵에서 비어 있지 않은 문자열 값 조회
pub fn string_attribute<'a>(attributes: &'a ProviderAttributes, key: &str) -> Option<&'a str> {
    attributes
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// 프로바이더 측 사용자 식별자 (`sub` 또는 `id`)
pub fn provider_user_id(attributes: &ProviderAttributes) -> Option<String> {
    match attributes.get("sub").or_else(|| attributes.get("id")) {
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    }
}

/// 프로필 이미지 URL (Google `picture` 문자열, Facebook `picture.data.url`)
pub fn picture_url(attributes: &ProviderAttributes) -> Option<String> {
    match attributes.get("picture") {
        Some(Value::String(url)) => Some(url.clone()),
        Some(Value::Object(picture)) => picture
            .get("data")
            .and_then(|data| data.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// 프로바이더가 이메일 소유를 확인했는지 여부
///
/// Google은 `email_verified`(불리언 또는 `"true"`/`"false"` 문자열)를 주고,
/// Facebook은 확인된 이메일만 돌려주므로 값이 없습니다.
pub fn email_verified(attributes: &ProviderAttributes) -> Option<bool> {
    match attributes.get("email_verified") {
        Some(Value::Bool(verified)) => Some(*verified),
        Some(Value::String(raw)) => Some(raw.eq_ignore_ascii_case("true")),
        _ => None,
    }
}

/// 인가 코드 교환 응답
#[derive(Debug, Deserialize)]
pub struct ProviderTokenResponse {
    /// 프로바이더 액세스 토큰
    pub access_token: String,
    /// 토큰 타입 (보통 "Bearer")
    #[serde(default)]
    pub token_type: Option<String>,
    /// 토큰 만료 시간 (초 단위)
    #[serde(default)]
    pub expires_in: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> ProviderAttributes {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_string_attribute_skips_blank() {
        let attributes = attrs(json!({"email": "  ", "name": "Ada"}));

        assert_eq!(string_attribute(&attributes, "email"), None);
        assert_eq!(string_attribute(&attributes, "name"), Some("Ada"));
        assert_eq!(string_attribute(&attributes, "missing"), None);
    }

    #[test]
    fn test_provider_user_id_variants() {
        assert_eq!(provider_user_id(&attrs(json!({"sub": "g-1"}))), Some("g-1".to_string()));
        assert_eq!(provider_user_id(&attrs(json!({"id": 42}))), Some("42".to_string()));
        assert_eq!(provider_user_id(&attrs(json!({}))), None);
    }

    #[test]
    fn test_picture_url_variants() {
        let google = attrs(json!({"picture": "https://img/g.png"}));
        let facebook = attrs(json!({"picture": {"data": {"url": "https://img/f.png"}}}));

        assert_eq!(picture_url(&google).as_deref(), Some("https://img/g.png"));
        assert_eq!(picture_url(&facebook).as_deref(), Some("https://img/f.png"));
    }

    #[test]
    fn test_email_verified_variants() {
        assert_eq!(email_verified(&attrs(json!({"email_verified": true}))), Some(true));
        assert_eq!(email_verified(&attrs(json!({"email_verified": "false"}))), Some(false));
        assert_eq!(email_verified(&attrs(json!({"email_verified": "TRUE"}))), Some(true));
        assert_eq!(email_verified(&attrs(json!({"email": "a@b.c"}))), None);
    }
}
