pub mod auth_service;
pub mod chat_service;
pub mod query_service;
pub mod quiz_service;
