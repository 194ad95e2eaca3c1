//! 페더레이션 로그인 리다이렉트 가드
//!
//! 외부 프로바이더 핸드셰이크가 끝난 뒤, 호출자가 요청한 `redirect_uri`를
//! 허용 목록과 대조하고 토큰을 붙여 302로 돌려보냅니다.
//!
//! ```text
//! redirect_uri? ─► 없으면 허용 목록 첫 항목 ─► host/port 대조 ─► issue() ─► ?token=... ─► 302
//!                        │                          │
//!               NoAuthorizedRedirects     UnauthorizedRedirectUri
//! ```
//!
//! 스킴과 경로는 비교하지 않습니다. 호스트는 대소문자를 구분하지 않고,
//! 포트는 URI에 적힌 그대로 비교합니다. `https://a.com`과 `https://a.com:443`은
//! 서로 다른 항목입니다.

use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use reqwest::Url;

use crate::domain::models::auth::AuthenticatedIdentity;
use crate::errors::{error_body, AppError, AuthError};

use super::TokenService;

/// 허용 목록의 한 항목
#[derive(Debug, Clone)]
struct AllowedRedirect {
    url: Url,
    port: Option<u16>,
}

/// 로그인 완료 후 돌아갈 수 있는 URI 목록
///
/// 순서를 유지하며 첫 항목이 기본 리다이렉트 대상입니다.
#[derive(Debug, Clone, Default)]
pub struct RedirectAllowList {
    entries: Vec<AllowedRedirect>,
}

impl RedirectAllowList {
    /// 설정 문자열 목록 해석
    ///
    /// 절대 URI가 아니거나 호스트가 없는 항목이 있으면 기동을 중단합니다.
    pub fn parse<I, S>(uris: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = uris
            .into_iter()
            .map(|raw| {
                let raw = raw.as_ref();
                Url::parse(raw)
                    .ok()
                    .filter(|url| url.host_str().is_some())
                    .map(|url| AllowedRedirect {
                        url,
                        port: explicit_port(raw),
                    })
                    .ok_or_else(|| {
                        AppError::ConfigError(format!("허용 리다이렉트 URI 형식 오류: {}", raw))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// 후보 URI가 어떤 항목과 호스트와 포트가 모두 같은지 확인
    pub fn is_authorized(&self, candidate: &str) -> bool {
        let Some(url) = Url::parse(candidate).ok() else {
            return false;
        };
        let Some(host) = url.host_str() else {
            return false;
        };
        let port = explicit_port(candidate);

        self.entries.iter().any(|entry| {
            entry
                .url
                .host_str()
                .is_some_and(|allowed| allowed.eq_ignore_ascii_case(host))
                && entry.port == port
        })
    }

    /// 요청된 URI(없으면 기본값)를 검증하여 리다이렉트 대상으로 확정
    ///
    /// 빈 문자열은 요청이 없는 것으로 보지 않으며 검증에서 거부됩니다.
    pub fn resolve(&self, requested: Option<&str>) -> Result<Url, AuthError> {
        let Some(raw) = requested else {
            return self
                .entries
                .first()
                .map(|entry| entry.url.clone())
                .ok_or(AuthError::NoAuthorizedRedirects);
        };

        if !self.is_authorized(raw) {
            return Err(AuthError::UnauthorizedRedirectUri(raw.to_string()));
        }
        Url::parse(raw).map_err(|_| AuthError::UnauthorizedRedirectUri(raw.to_string()))
    }
}

/// URI authority에 명시된 포트
///
/// `Url::port()`는 스킴 기본 포트를 지우므로 원문에서 직접 읽습니다.
fn explicit_port(raw: &str) -> Option<u16> {
    let (_, rest) = raw.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host_port)| host_port);

    let port = match host_port.rsplit_once(']') {
        Some((_, after_ipv6)) => after_ipv6.strip_prefix(':')?,
        None => host_port.rsplit_once(':')?.1,
    };
    port.parse().ok()
}

/// 콜백 요청 하나의 응답 상태
///
/// 앞 단계에서 이미 응답을 확정했다면 가드는 아무것도 쓰지 않습니다.
#[derive(Debug)]
pub struct CallbackExchange {
    redirect_uri: Option<String>,
    response: Option<HttpResponse>,
}

impl CallbackExchange {
    pub fn new(redirect_uri: Option<String>) -> Self {
        Self {
            redirect_uri,
            response: None,
        }
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    pub fn is_committed(&self) -> bool {
        self.response.is_some()
    }

    /// 응답 확정 (이미 확정되었으면 무시)
    pub fn commit(&mut self, response: HttpResponse) {
        if self.response.is_none() {
            self.response = Some(response);
        }
    }

    pub fn into_response(self) -> Option<HttpResponse> {
        self.response
    }
}

/// 리다이렉트 가드
#[derive(Debug, Clone)]
pub struct FederatedRedirectGuard {
    allow_list: RedirectAllowList,
}

impl FederatedRedirectGuard {
    pub fn new(allow_list: RedirectAllowList) -> Self {
        Self { allow_list }
    }

    /// 토큰이 붙은 최종 리다이렉트 URL 계산
    pub fn target_url(
        &self,
        requested: Option<&str>,
        identity: &AuthenticatedIdentity,
        tokens: &TokenService,
    ) -> Result<String, AuthError> {
        let mut target = self.allow_list.resolve(requested)?;
        let token = tokens.issue(identity)?;

        target.query_pairs_mut().append_pair("token", &token);
        Ok(target.into())
    }

    /// 인증 성공 처리
    ///
    /// 성공하면 302, 리다이렉트 검증 실패는 400, 그 밖의 실패는 원인 메시지를 담은 500을
    /// `exchange`에 확정합니다.
    pub fn on_authentication_success(
        &self,
        exchange: &mut CallbackExchange,
        identity: &AuthenticatedIdentity,
        tokens: &TokenService,
    ) {
        if exchange.is_committed() {
            log::debug!(
                "Response has already been committed. Unable to redirect {}",
                identity.subject_id()
            );
            return;
        }

        let response = match self.target_url(exchange.redirect_uri(), identity, tokens) {
            Ok(location) => {
                log::info!("페더레이션 로그인 완료: {} ({})", identity.subject_id(), identity.provider());
                HttpResponse::Found()
                    .insert_header((header::LOCATION, location))
                    .finish()
            }
            Err(e @ (AuthError::UnauthorizedRedirectUri(_) | AuthError::NoAuthorizedRedirects)) => {
                log::error!("리다이렉트 거부: {}", e);
                error_body(StatusCode::BAD_REQUEST, &e.to_string())
            }
            Err(e) => {
                log::error!("페더레이션 로그인 완료 처리 실패: {}", e);
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("Authentication failed: {}", e),
                )
            }
        };

        exchange.commit(response);
    }
}
