use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{hash_password, verify_password, JwtService, Principal},
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::{
            request::{SigninRequest, SignupRequest},
            response::{AuthResponse, UserDto},
        },
    },
    repositories::UserRepository,
};

/// Result of making sure an admin account exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminSeed {
    Created(UserDto),
    Promoted(UserDto),
    AlreadyAdmin(UserDto),
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: Arc<JwtService>) -> Self {
        Self { users, jwt }
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .users
            .create(User::new(&request.name, &request.email, &password_hash))
            .await?;

        let token = self.jwt.issue(&user.id, user.is_admin)?;
        log::info!("Registered user {}", user.id);

        Ok(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: user.into(),
        })
    }

    /// Unknown email and wrong password produce the same error.
    pub async fn signin(&self, request: SigninRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.jwt.issue(&user.id, user.is_admin)?;

        Ok(AuthResponse {
            message: "Signed in successfully".to_string(),
            token,
            user: user.into(),
        })
    }

    /// Resolves a bearer token to the live user it names.
    pub async fn authenticate(&self, token: &str) -> AppResult<Principal> {
        let claims = self.jwt.verify(token)?;

        let user = self
            .users
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unauthorized. User not found.".to_string()))?;

        Ok(Principal::from(user))
    }

    pub async fn ensure_admin(&self, name: &str, email: &str, password: &str) -> AppResult<AdminSeed> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::BadRequest(
                "Admin email and password are required".to_string(),
            ));
        }

        match self.users.find_by_email(email).await? {
            Some(user) if user.is_admin => Ok(AdminSeed::AlreadyAdmin(user.into())),
            Some(mut user) => {
                self.users.set_admin(&user.id, true).await?;
                user.is_admin = true;
                log::info!("Promoted user {} to admin", user.id);
                Ok(AdminSeed::Promoted(user.into()))
            }
            None => {
                let password_hash = hash_password(password)?;
                let admin = self
                    .users
                    .create(User::new_admin(name, email, &password_hash))
                    .await?;
                log::info!("Created admin user {}", admin.id);
                Ok(AdminSeed::Created(admin.into()))
            }
        }
    }
}
