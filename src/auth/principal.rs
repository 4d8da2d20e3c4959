use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;

use crate::{
    errors::{AppError, AppResult},
    models::domain::User,
};

/// The authenticated caller, resolved from a live user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Principal {
            id: user.id,
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    User,
    Admin,
}

pub fn authorize(access: Access, principal: &Principal) -> AppResult<()> {
    match access {
        Access::User => Ok(()),
        Access::Admin if principal.is_admin => Ok(()),
        Access::Admin => Err(AppError::Forbidden(
            "Access denied. Admins only.".to_string(),
        )),
    }
}

// Handlers take the principal as an argument; it is only present behind an AuthGuard.
impl FromRequest for Principal {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let principal = req
            .extensions()
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()));

        ready(principal)
    }
}
