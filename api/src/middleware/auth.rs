//! Bearer-token authentication middleware for extension endpoints.
//!
//! Extracts the token from the Authorization header, verifies it through
//! the [`ExtensionAuthService`](ext_core::services::ExtensionAuthService) in
//! app data, and injects the caller's identity into the request.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use ext_core::domain::entities::VerifiedToken;
use ext_core::services::parse_bearer;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::handlers::ApiError;
use crate::routes::extension::AppState;

/// Identity of the extension user behind the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionIdentity {
    pub user_id: String,
    pub email: String,
    pub token_version: i64,
}

impl From<VerifiedToken> for ExtensionIdentity {
    fn from(verified: VerifiedToken) -> Self {
        Self {
            user_id: verified.user_id,
            email: verified.email,
            token_version: verified.token_version,
        }
    }
}

/// Middleware factory guarding routes with an extension token
#[derive(Default)]
pub struct ExtensionTokenAuth;

impl ExtensionTokenAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for ExtensionTokenAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ExtensionTokenAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ExtensionTokenAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ExtensionTokenAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ExtensionTokenAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or(ApiError::Internal("Token validation failed"))?;

            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());
            let token = parse_bearer(header).map_err(ApiError::from)?.to_string();

            let verified = state
                .auth_service
                .validate_token(&token)
                .await
                .map_err(|e| ApiError::from_domain(e, "Token validation failed"))?;

            req.extensions_mut().insert(ExtensionIdentity::from(verified));

            service.call(req).await
        })
    }
}

/// Extractor for routes behind [`ExtensionTokenAuth`]
impl FromRequest for ExtensionIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<ExtensionIdentity>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized.into());

        ready(result)
    }
}
