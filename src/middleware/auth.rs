use std::future::{ready, Ready};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;

use crate::auth::session::{verify_session_token, Claims, SESSION_COOKIE};
use crate::config::session::SessionSettings;
use crate::errors::ApiError;

/// Resolve the caller's identity from the session cookie.
/// Rejected requests never reach the wrapped handler.
pub fn validate_session_from_request(req: &ServiceRequest) -> Result<Claims, Error> {
    let session_settings = req
        .app_data::<web::Data<SessionSettings>>()
        .ok_or(ApiError::AuthenticationRequired)?;

    let cookie = req
        .request()
        .cookie(SESSION_COOKIE)
        .ok_or(ApiError::AuthenticationRequired)?;

    let claims = verify_session_token(cookie.value(), session_settings).map_err(|e| {
        tracing::debug!("Failed to verify session token: {:?}", e);
        ApiError::AuthenticationRequired
    })?;

    Ok(claims)
}

// Create the middleware
pub struct AuthMiddleware;

// Middleware factory
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
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
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
        let claims = match validate_session_from_request(&req) {
            Ok(claims) => claims,
            Err(e) => return Box::pin(async move { Err(e) }),
        };

        // Store the claims in the request extensions for handlers to access
        req.extensions_mut().insert(claims);

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}
