use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::Header,
    web, Error, HttpMessage, ResponseError,
};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures::future::LocalBoxFuture;

use crate::{
    app_state::AppState,
    auth::principal::{authorize, Access, Principal},
    errors::{AppError, AppResult},
};

/// Gate for a routing scope: resolves the bearer token to a live user and
/// checks the scope's access level before the handler runs.
#[derive(Clone, Copy, Debug)]
pub struct AuthGuard {
    access: Access,
}

impl AuthGuard {
    pub fn user() -> Self {
        Self {
            access: Access::User,
        }
    }

    pub fn admin() -> Self {
        Self {
            access: Access::Admin,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardService {
            service: Rc::new(service),
            access: self.access,
        }))
    }
}

pub struct AuthGuardService<S> {
    service: Rc<S>,
    access: Access,
}

impl<S, B> Service<ServiceRequest> for AuthGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let access = self.access;

        Box::pin(async move {
            let principal = match resolve_principal(&req, access).await {
                Ok(principal) => principal,
                Err(err) => {
                    log::debug!("{} {} rejected: {}", req.method(), req.path(), err);
                    let response = err.error_response().map_into_right_body();
                    return Ok(req.into_response(response));
                }
            };

            req.extensions_mut().insert(principal);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

async fn resolve_principal(req: &ServiceRequest, access: Access) -> AppResult<Principal> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("Application state not configured".to_string()))?;

    let token = bearer_token(req)?;
    let principal = state.auth_service.authenticate(&token).await?;
    authorize(access, &principal)?;

    Ok(principal)
}

fn bearer_token(req: &ServiceRequest) -> AppResult<String> {
    Authorization::<Bearer>::parse(req)
        .map(|auth| auth.into_scheme().token().to_string())
        .map_err(|_| AppError::Unauthorized("Unauthorized. Token is missing.".to_string()))
}
