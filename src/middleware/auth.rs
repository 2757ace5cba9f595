// Bearer-token authentication.
//
// The middleware validates the Authorization header on every request inside
// the protected scope, loads the account behind the token subject and stores
// a `Session` in the request extensions. Handlers receive the session through
// its `FromRequest` impl; there is no process-global auth state, a session
// lives exactly as long as its request.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;

use crate::core::AppError;
use crate::modules::auth::models::UserRole;
use crate::modules::auth::services::{AuthService, TokenService};

/// The authenticated caller, valid for one request.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
}

impl Session {
    pub fn require_admin(&self) -> crate::core::Result<()> {
        if self.role != UserRole::Admin {
            return Err(AppError::forbidden("Admin access required"));
        }
        Ok(())
    }
}

impl FromRequest for Session {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Session>()
                .cloned()
                .ok_or_else(|| Error::from(AppError::unauthorized("Authentication required"))),
        )
    }
}

/// Bearer token authentication middleware
pub struct BearerAuth {
    tokens: Arc<TokenService>,
    auth: Arc<AuthService>,
}

impl BearerAuth {
    pub fn new(tokens: Arc<TokenService>, auth: Arc<AuthService>) -> Self {
        Self { tokens, auth }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
            auth: self.auth.clone(),
        }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<TokenService>,
    auth: Arc<AuthService>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let tokens = self.tokens.clone();
        let auth = self.auth.clone();

        Box::pin(async move {
            let token = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .ok_or_else(|| Error::from(AppError::unauthorized("Missing bearer token")))?;

            let claims = tokens.verify(token).map_err(Error::from)?;

            // the account is re-checked on every request so deactivated or
            // deleted users are cut off before their token expires
            let user = auth.current_user(&claims.sub).await.map_err(Error::from)?;

            req.extensions_mut().insert(Session {
                user_id: user.id,
                username: user.username,
                role: user.role,
            });

            svc.call(req).await
        })
    }
}
