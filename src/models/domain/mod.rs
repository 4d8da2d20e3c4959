pub mod chat;
pub mod query;
pub mod quiz;
pub mod user;
pub use chat::{Chat, Message, Sender};
pub use query::Query;
pub use quiz::{Question, QuestionAction, Quiz, QuizFilter, QuizView, Subject};
pub use user::User;
