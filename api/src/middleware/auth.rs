//! Bearer session authentication middleware for protected endpoints.
//!
//! The middleware extracts the opaque bearer token from the
//! Authorization header, resolves it to a user and session through the
//! account service, and injects the authenticated context into the
//! request extensions for handlers to extract.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::{BoxFuture, LocalBoxFuture};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::handlers::error::domain_error_response;
use pt_core::domain::entities::session::Session;
use pt_core::domain::entities::user::User;
use pt_core::errors::{DomainError, DomainResult};
use pt_core::repositories::{SessionRepository, UserRepository};
use pt_core::services::account::{AccountService, PasswordHasherTrait};
use pt_shared::types::response::ApiResponse;

/// Authenticated caller context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated user
    pub user: User,
    /// The session the bearer token resolved to
    pub session: Session,
    /// The presented bearer token, kept so logout can revoke it
    pub token: String,
}

/// Trait for resolving bearer tokens behind dynamic dispatch
///
/// The middleware cannot name the concrete `AccountService` generics,
/// so the service is registered in app data as a trait object.
pub trait SessionAuthenticator: Send + Sync {
    /// Resolves a plaintext bearer token to its user and live session
    fn resolve<'a>(&'a self, token: &'a str) -> BoxFuture<'a, DomainResult<(User, Session)>>;
}

impl<U, S, P> SessionAuthenticator for AccountService<U, S, P>
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
    P: PasswordHasherTrait + 'static,
{
    fn resolve<'a>(&'a self, token: &'a str) -> BoxFuture<'a, DomainResult<(User, Session)>> {
        Box::pin(self.authenticate(token))
    }
}

/// Session authentication middleware factory
pub struct SessionAuth;

impl SessionAuth {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SessionAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Session authentication middleware service
pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return Ok(reject(
                        req,
                        HttpResponse::Unauthorized().json(ApiResponse::<()>::error(
                            "Missing or invalid Authorization header",
                        )),
                    ));
                }
            };

            let authenticator = match req.app_data::<web::Data<Arc<dyn SessionAuthenticator>>>() {
                Some(authenticator) => authenticator.get_ref().clone(),
                None => {
                    return Ok(reject(
                        req,
                        HttpResponse::Unauthorized().json(ApiResponse::<()>::error(
                            "Session verification not configured",
                        )),
                    ));
                }
            };

            match authenticator.resolve(&token).await {
                Ok((user, session)) => {
                    req.extensions_mut().insert(AuthContext {
                        user,
                        session,
                        token,
                    });
                }
                Err(error @ DomainError::Internal { .. }) => {
                    return Ok(reject(req, domain_error_response(&error)));
                }
                Err(error) => {
                    log::warn!("Bearer token rejected: {}", error);
                    return Ok(reject(
                        req,
                        HttpResponse::Unauthorized()
                            .json(ApiResponse::<()>::error("Invalid or expired session")),
                    ));
                }
            }

            service.call(req).await.map(|res| res.map_into_left_body())
        })
    }
}

/// Ends the request with an early response carrying the error envelope
fn reject<B>(req: ServiceRequest, response: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    let (req, _payload) = req.into_parts();
    ServiceResponse::new(req, response.map_into_right_body())
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Builds a 401 error carrying the standard response envelope
fn unauthorized(message: &str) -> Error {
    let response = HttpResponse::Unauthorized().json(ApiResponse::<()>::error(message));
    InternalError::from_response(message.to_string(), response).into()
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| unauthorized("Authentication required"));

        ready(result)
    }
}
