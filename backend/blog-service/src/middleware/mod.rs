/// HTTP middleware for the blog service
///
/// Validates the bearer token on every protected route and stores the
/// decoded claims in request extensions. Handlers receive the identity
/// explicitly through the `AuthenticatedUser` extractor; there is no
/// ambient current-user accessor anywhere downstream.
use crate::error::AppError;
use access_control::RoleSet;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use crypto_core::jwt;
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use uuid::Uuid;

/// Verified caller identity, reconstructed from the token on each request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub roles: RoleSet,
}

/// Actix middleware that validates a Bearer token using the shared JWT helpers
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| unauthorized("Missing Authorization header"))?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or_else(|| unauthorized("Invalid Authorization scheme"))?;

            // Fails closed: signature, issuer, audience, expiry, or shape
            // problems all collapse into one rejection.
            let claims = jwt::validate_token(token)
                .map_err(|_| unauthorized("Invalid or expired token"))?
                .claims;

            let user_id = Uuid::parse_str(&claims.sub)
                .map_err(|_| unauthorized("Invalid user ID in token"))?;

            req.extensions_mut().insert(AuthenticatedUser {
                id: user_id,
                username: claims.username,
                roles: RoleSet::from_names(&claims.roles),
            });

            service.call(req).await
        })
    }
}

fn unauthorized(msg: &str) -> Error {
    AppError::Unauthorized(msg.to_string()).into()
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| unauthorized("Authentication required")),
        )
    }
}
