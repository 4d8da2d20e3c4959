//! Seeds an administrator account.
//!
//! Reads `ADMIN_EMAIL`, `ADMIN_PASSWORD` and optionally `ADMIN_NAME`, then
//! creates the account, promotes an existing one, or reports that it is
//! already an admin.

use std::{env, sync::Arc};

use secrecy::SecretString;
use uuid::Uuid;

use lingo_server::{
    auth::JwtService,
    config::MongoSettings,
    db::Database,
    errors::{AppError, AppResult},
    repositories::{MongoUserRepository, UserRepository},
    services::auth_service::{AdminSeed, AuthService},
};

const DEFAULT_ADMIN_NAME: &str = "Admin";

fn required_var(name: &str) -> AppResult<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{} must be set", name)))
}

async fn run() -> AppResult<AdminSeed> {
    let email = required_var("ADMIN_EMAIL")?;
    let password = required_var("ADMIN_PASSWORD")?;
    let name = env::var("ADMIN_NAME").unwrap_or_else(|_| DEFAULT_ADMIN_NAME.to_string());

    let mongo = MongoSettings::from_env();
    let db = Database::connect(&mongo.conn_string, &mongo.db_name).await?;
    let users = Arc::new(MongoUserRepository::new(&db));
    users.ensure_indexes().await?;

    // No token is issued here, so any key will do when JWT_SECRET is absent.
    let secret = env::var("JWT_SECRET").unwrap_or_else(|_| Uuid::new_v4().to_string());
    let jwt = Arc::new(JwtService::new(&SecretString::from(secret), 1));

    AuthService::new(users, jwt)
        .ensure_admin(&name, &email, &password)
        .await
}

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    match run().await {
        Ok(AdminSeed::Created(user)) => log::info!("Admin user created: {}", user.email),
        Ok(AdminSeed::Promoted(user)) => {
            log::info!("Existing user promoted to admin: {}", user.email)
        }
        Ok(AdminSeed::AlreadyAdmin(user)) => log::info!("User is already an admin: {}", user.email),
        Err(err) => {
            log::error!("Failed to seed admin user: {}", err);
            std::process::exit(1);
        }
    }
}
