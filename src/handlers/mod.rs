pub mod admin_handler;
pub mod auth_handler;
pub mod chat_handler;
pub mod health_handler;
pub mod query_handler;
pub mod quiz_handler;
