pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod principal;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::AuthGuard;
pub use password::{hash_password, verify_password};
pub use principal::{authorize, Access, Principal};
