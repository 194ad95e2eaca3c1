use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::errors::AuthError;
use crate::middlewares::auth_middleware::is_public_path;
use crate::services::auth::{extract_bearer_token, TokenVerifier};

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub tokens: Arc<dyn TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let tokens = self.tokens.clone();

        Box::pin(async move {
            if !is_public_path(req.path()) {
                let token = req
                    .headers()
                    .get(AUTHORIZATION)
                    .and_then(|h| h.to_str().ok())
                    .and_then(extract_bearer_token)
                    .map(str::to_string);

                if let Some(token) = token {
                    match tokens.verify(&token) {
                        Ok(identity) => {
                            log::debug!("인증 성공: {}", identity.subject_id());
                            req.extensions_mut().insert(identity);
                        }
                        Err(err) => {
                            log_rejection(req.path(), &err);
                            let response = err.error_response();
                            let (req, _) = req.into_parts();
                            return Ok(ServiceResponse::new(req, response).map_into_right_body());
                        }
                    }
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn log_rejection(path: &str, err: &AuthError) {
    if err.is_token_error() {
        log::warn!("토큰 거부 ({}): {}", path, err);
    } else {
        log::error!("토큰 검증 중 내부 오류 ({}): {}", path, err);
    }
}
