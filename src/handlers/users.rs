//! 사용자 핸들러

use actix_web::{get, HttpResponse};

use crate::domain::dto::auth::IdentityResponse;
use crate::domain::models::auth::AuthenticatedIdentity;

/// 현재 인증된 사용자 정보
///
/// 인증 미들웨어가 설치한 신원을 그대로 돌려줍니다. 신원이 없으면
/// 추출자가 401로 응답합니다.
#[get("/me")]
pub async fn me(identity: AuthenticatedIdentity) -> HttpResponse {
    HttpResponse::Ok().json(IdentityResponse::from(&identity))
}
