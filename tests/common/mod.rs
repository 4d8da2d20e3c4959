#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::RwLock;

use lingo_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Chat, Message, Query, QuestionAction, Quiz, QuizFilter, Subject, User},
    repositories::{
        chat_repository::chat_not_found, quiz_repository::quiz_not_found, ChatRepository,
        QueryRepository, QuizRepository, UserRepository,
    },
};

pub const TEST_JWT_SECRET: &str = "integration_test_jwt_secret";

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "lingo-test".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 2000,
        jwt_secret: SecretString::from(TEST_JWT_SECRET.to_string()),
        jwt_expiration_hours: 168,
        cors_origin: "http://localhost:5173".to_string(),
        environment: "test".to_string(),
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("User already exists".to_string()));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn add_quiz_ref(&self, user_id: &str, quiz_id: i64) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))?;
        if !user.quiz_refs.contains(&quiz_id) {
            user.quiz_refs.push(quiz_id);
        }
        Ok(())
    }

    async fn set_admin(&self, user_id: &str, is_admin: bool) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))?;
        user.is_admin = is_admin;
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
struct QuizStore {
    next_id: i64,
    quizzes: Vec<Quiz>,
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    store: RwLock<QuizStore>,
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn next_quiz_id(&self) -> AppResult<i64> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        Ok(store.next_id)
    }

    async fn find(&self, filter: &QuizFilter) -> AppResult<Vec<Quiz>> {
        let store = self.store.read().await;
        let mut quizzes: Vec<Quiz> = store
            .quizzes
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect();
        quizzes.sort_by_key(|q| q.quiz_id);
        Ok(quizzes)
    }

    async fn find_by_quiz_id(&self, quiz_id: i64) -> AppResult<Option<Quiz>> {
        let store = self.store.read().await;
        Ok(store.quizzes.iter().find(|q| q.quiz_id == quiz_id).cloned())
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut store = self.store.write().await;
        if store.quizzes.iter().any(|q| q.quiz_id == quiz.quiz_id) {
            return Err(AppError::Conflict(format!(
                "Quiz with quiz_id {} already exists",
                quiz.quiz_id
            )));
        }
        store.quizzes.push(quiz.clone());
        Ok(quiz)
    }

    async fn replace_content(
        &self,
        quiz_id: i64,
        class_name: &str,
        subjects: Vec<Subject>,
    ) -> AppResult<Quiz> {
        let mut store = self.store.write().await;
        let quiz = store
            .quizzes
            .iter_mut()
            .find(|q| q.quiz_id == quiz_id)
            .ok_or_else(|| quiz_not_found(quiz_id))?;
        quiz.class_name = class_name.to_string();
        quiz.subjects = subjects;
        Ok(quiz.clone())
    }

    async fn apply_question_action(
        &self,
        quiz_id: i64,
        subject_name: &str,
        action: QuestionAction,
    ) -> AppResult<Quiz> {
        let mut store = self.store.write().await;
        let quiz = store
            .quizzes
            .iter_mut()
            .find(|q| q.quiz_id == quiz_id)
            .ok_or_else(|| quiz_not_found(quiz_id))?;
        quiz.apply_question_action(subject_name, action)?;
        Ok(quiz.clone())
    }

    async fn delete(&self, quiz_id: i64) -> AppResult<Quiz> {
        let mut store = self.store.write().await;
        let position = store
            .quizzes
            .iter()
            .position(|q| q.quiz_id == quiz_id)
            .ok_or_else(|| quiz_not_found(quiz_id))?;
        Ok(store.quizzes.remove(position))
    }

    async fn mark_attempted(&self, quiz_id: i64, user_id: &str) -> AppResult<Quiz> {
        // Check and push under one write lock, like the conditional update in Mongo.
        let mut store = self.store.write().await;
        let quiz = store
            .quizzes
            .iter_mut()
            .find(|q| q.quiz_id == quiz_id)
            .ok_or_else(|| quiz_not_found(quiz_id))?;
        if quiz.has_attempted(user_id) {
            return Err(AppError::AlreadyAttempted);
        }
        quiz.users_attempted.push(user_id.to_string());
        Ok(quiz.clone())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQueryRepository {
    queries: RwLock<Vec<Query>>,
}

#[async_trait]
impl QueryRepository for InMemoryQueryRepository {
    async fn create(&self, query: Query) -> AppResult<Query> {
        self.queries.write().await.push(query.clone());
        Ok(query)
    }

    async fn find_all(&self) -> AppResult<Vec<Query>> {
        let mut queries = self.queries.read().await.clone();
        queries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(queries)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Query>> {
        let queries = self.queries.read().await;
        Ok(queries.iter().find(|q| q.id == id).cloned())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut queries = self.queries.write().await;
        let before = queries.len();
        queries.retain(|q| q.id != id);
        if queries.len() == before {
            return Err(AppError::NotFound("Query not found".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryChatRepository {
    chats: RwLock<HashMap<String, Chat>>,
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn create(&self, chat: Chat) -> AppResult<Chat> {
        self.chats.write().await.insert(chat.id.clone(), chat.clone());
        Ok(chat)
    }

    async fn push_message(&self, chat_id: &str, owner_id: &str, message: Message) -> AppResult<Chat> {
        let mut chats = self.chats.write().await;
        let chat = chats
            .get_mut(chat_id)
            .filter(|c| c.user == owner_id)
            .ok_or_else(chat_not_found)?;
        chat.messages.push(message);
        Ok(chat.clone())
    }

    async fn find_by_owner(&self, owner_id: &str) -> AppResult<Vec<Chat>> {
        let chats = self.chats.read().await;
        let mut owned: Vec<Chat> = chats.values().filter(|c| c.user == owner_id).cloned().collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn find_for_owner(&self, chat_id: &str, owner_id: &str) -> AppResult<Option<Chat>> {
        let chats = self.chats.read().await;
        Ok(chats.get(chat_id).filter(|c| c.user == owner_id).cloned())
    }

    async fn delete_for_owner(&self, chat_id: &str, owner_id: &str) -> AppResult<()> {
        let mut chats = self.chats.write().await;
        match chats.get(chat_id) {
            Some(chat) if chat.user == owner_id => {
                chats.remove(chat_id);
                Ok(())
            }
            _ => Err(chat_not_found()),
        }
    }

    async fn delete_all_for_owner(&self, owner_id: &str) -> AppResult<u64> {
        let mut chats = self.chats.write().await;
        let before = chats.len();
        chats.retain(|_, c| c.user != owner_id);
        Ok((before - chats.len()) as u64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Handles on the in-memory stores behind an `AppState`, for seeding and
/// inspecting data directly in tests.
pub struct TestStores {
    pub users: Arc<InMemoryUserRepository>,
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub queries: Arc<InMemoryQueryRepository>,
    pub chats: Arc<InMemoryChatRepository>,
}

pub fn test_state() -> (AppState, TestStores) {
    let stores = TestStores {
        users: Arc::new(InMemoryUserRepository::default()),
        quizzes: Arc::new(InMemoryQuizRepository::default()),
        queries: Arc::new(InMemoryQueryRepository::default()),
        chats: Arc::new(InMemoryChatRepository::default()),
    };

    let state = AppState::from_repositories(
        test_config(),
        stores.users.clone(),
        stores.quizzes.clone(),
        stores.queries.clone(),
        stores.chats.clone(),
    );

    (state, stores)
}
