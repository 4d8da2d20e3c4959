use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        ChatRepository, MongoChatRepository, MongoQueryRepository, MongoQuizRepository,
        MongoUserRepository, QueryRepository, QuizRepository, UserRepository,
    },
    services::{
        auth_service::AuthService, chat_service::ChatService, query_service::QueryService,
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub quiz_service: Arc<QuizService>,
    pub query_service: Arc<QueryService>,
    pub chat_service: Arc<ChatService>,
    pub config: Arc<Config>,
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config.mongo_conn_string, &config.mongo_db_name).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let chat_repository = Arc::new(MongoChatRepository::new(&db));
        chat_repository.ensure_indexes().await?;

        let query_repository = Arc::new(MongoQueryRepository::new(&db));

        let mut state = Self::from_repositories(
            config,
            user_repository,
            quiz_repository,
            query_repository,
            chat_repository,
        );
        state.db = Some(db);

        Ok(state)
    }

    /// Wires services over arbitrary repository implementations.
    pub fn from_repositories(
        config: Config,
        users: Arc<dyn UserRepository>,
        quizzes: Arc<dyn QuizRepository>,
        queries: Arc<dyn QueryRepository>,
        chats: Arc<dyn ChatRepository>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        Self {
            auth_service: Arc::new(AuthService::new(users.clone(), jwt_service)),
            quiz_service: Arc::new(QuizService::new(quizzes, users)),
            query_service: Arc::new(QueryService::new(queries)),
            chat_service: Arc::new(ChatService::new(chats)),
            config: Arc::new(config),
            db: None,
        }
    }
}
