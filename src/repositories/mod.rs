pub mod chat_repository;
pub mod query_repository;
pub mod quiz_repository;
pub mod user_repository;

pub use chat_repository::{ChatRepository, MongoChatRepository};
pub use query_repository::{MongoQueryRepository, QueryRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
