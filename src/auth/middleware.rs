use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::TokenCodec;
use crate::error::AppError;

/// Guards a scope behind session-token authentication.
///
/// Checks run in a fixed order and each failure mode answers 401 with its own
/// message: header presence, header shape, scheme, then signature and expiry.
/// On success the decoded identity is attached to the request extensions for
/// the handlers downstream.
pub struct AuthMiddleware {
    codec: TokenCodec,
}

impl AuthMiddleware {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            codec: self.codec.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    codec: TokenCodec,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header_value = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let header_value = match header_value {
            Some(value) => value,
            None => return reject(AppError::Unauthorized("No token provided".into())),
        };

        let parts: Vec<&str> = header_value.split(' ').collect();
        if parts.len() != 2 {
            return reject(AppError::Unauthorized("Token error".into()));
        }

        let (scheme, token) = (parts[0], parts[1]);
        if scheme != "Bearer" || token.is_empty() {
            return reject(AppError::Unauthorized("Malformed token".into()));
        }

        match self.codec.verify(token) {
            Ok(claims) => {
                req.extensions_mut().insert(AuthenticatedUser(claims.sub));
                Box::pin(self.service.call(req))
            }
            Err(app_err) => reject(app_err),
        }
    }
}

fn reject<B: 'static>(err: AppError) -> LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>> {
    Box::pin(ready(Err(err.into())))
}
