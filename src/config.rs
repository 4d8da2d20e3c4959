use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_PORT: u16 = 2000;
const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24 * 7;
const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365 * 10;
const MIN_PRODUCTION_SECRET_LEN: usize = 32;
const DEFAULT_MONGO_CONN_STRING: &str = "mongodb://localhost:27017";
const DEFAULT_MONGO_DB_NAME: &str = "lingo";

/// MongoDB connection settings, shared by the server and the admin tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoSettings {
    pub conn_string: String,
    pub db_name: String,
}

impl MongoSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            conn_string: lookup("MONGO_CONN_STRING")
                .unwrap_or_else(|| DEFAULT_MONGO_CONN_STRING.to_string()),
            db_name: lookup("MONGO_DB_NAME").unwrap_or_else(|| DEFAULT_MONGO_DB_NAME.to_string()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub cors_origin: String,
    pub environment: String,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// `JWT_SECRET` has no fallback: a missing or empty secret is an error
    /// and the server refuses to start.
    pub fn from_env() -> AppResult<Self> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                AppError::InternalError(
                    "JWT_SECRET is not set; refusing to start without a signing key".to_string(),
                )
            })?;

        let mongo = MongoSettings::from_env();

        let config = Self {
            mongo_conn_string: mongo.conn_string,
            mongo_db_name: mongo.db_name,
            web_server_host: env::var("WEB_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            jwt_secret: SecretString::from(jwt_secret),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    fn validate(&self) -> AppResult<()> {
        let secret_len = self.jwt_secret.expose_secret().len();
        if self.is_production() && secret_len < MIN_PRODUCTION_SECRET_LEN {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}). Must be at least {} characters in production.",
                secret_len, MIN_PRODUCTION_SECRET_LEN
            )));
        }

        if self.jwt_expiration_hours <= 0 {
            return Err(AppError::InternalError(
                "JWT_EXPIRATION_HOURS must be positive".to_string(),
            ));
        }

        if self.jwt_expiration_hours > MAX_JWT_EXPIRATION_HOURS {
            return Err(AppError::InternalError(format!(
                "JWT_EXPIRATION_HOURS must be at most {}",
                MAX_JWT_EXPIRATION_HOURS
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "lingo-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: DEFAULT_PORT,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            cors_origin: "http://localhost:5173".to_string(),
            environment: "test".to_string(),
        }
    }
}
