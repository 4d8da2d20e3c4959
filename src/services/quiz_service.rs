use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizFilter, QuizView},
        dto::request::{QuestionActionRequest, QuizRequest},
    },
    repositories::{quiz_repository::quiz_not_found, QuizRepository, UserRepository},
};

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    users: Arc<dyn UserRepository>,
}

impl QuizService {
    pub fn new(quizzes: Arc<dyn QuizRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { quizzes, users }
    }

    pub async fn list(&self, filter: QuizFilter) -> AppResult<Vec<Quiz>> {
        self.quizzes.find(&filter.normalized()).await
    }

    pub async fn list_for_user(&self, filter: QuizFilter, user_id: &str) -> AppResult<Vec<QuizView>> {
        let quizzes = self.list(filter).await?;

        Ok(quizzes
            .into_iter()
            .map(|quiz| QuizView::for_user(quiz, user_id))
            .collect())
    }

    pub async fn get_quiz(&self, quiz_id: i64) -> AppResult<Quiz> {
        self.quizzes
            .find_by_quiz_id(quiz_id)
            .await?
            .ok_or_else(|| quiz_not_found(quiz_id))
    }

    /// Quiz ids come from the store sequence; a client-supplied id is refused.
    pub async fn create_quiz(&self, request: QuizRequest) -> AppResult<Quiz> {
        if request.quiz_id.is_some() {
            return Err(AppError::BadRequest(
                "quiz_id is assigned by the server and must not be supplied".to_string(),
            ));
        }
        request.validate()?;
        request.check_question_ids()?;

        let quiz_id = self.quizzes.next_quiz_id().await?;
        let class_name = request.class_name.clone();
        let quiz = self
            .quizzes
            .create(Quiz::new(quiz_id, &class_name, request.into_subjects()))
            .await?;

        log::info!("Created quiz {}", quiz.quiz_id);
        Ok(quiz)
    }

    pub async fn replace_quiz(&self, quiz_id: i64, request: QuizRequest) -> AppResult<Quiz> {
        if request.quiz_id.is_some_and(|id| id != quiz_id) {
            return Err(AppError::BadRequest(
                "quiz_id in body does not match the path".to_string(),
            ));
        }
        request.validate()?;
        request.check_question_ids()?;

        let class_name = request.class_name.clone();
        let quiz = self
            .quizzes
            .replace_content(quiz_id, &class_name, request.into_subjects())
            .await?;

        log::info!("Replaced content of quiz {}", quiz_id);
        Ok(quiz)
    }

    pub async fn mutate_question(&self, quiz_id: i64, request: QuestionActionRequest) -> AppResult<Quiz> {
        let (subject, action) = request.into_action()?;
        let quiz = self
            .quizzes
            .apply_question_action(quiz_id, &subject, action)
            .await?;

        log::info!("Updated questions of subject '{}' in quiz {}", subject, quiz_id);
        Ok(quiz)
    }

    pub async fn delete_quiz(&self, quiz_id: i64) -> AppResult<Quiz> {
        let quiz = self.quizzes.delete(quiz_id).await?;
        log::info!("Deleted quiz {}", quiz_id);
        Ok(quiz)
    }

    pub async fn mark_attempted(&self, quiz_id: i64, user_id: &str) -> AppResult<Quiz> {
        let quiz = self.quizzes.mark_attempted(quiz_id, user_id).await?;

        // The attempted set on the quiz is authoritative; quiz_refs is a convenience copy.
        if let Err(err) = self.users.add_quiz_ref(user_id, quiz_id).await {
            log::warn!("Could not record quiz {} on user {}: {}", quiz_id, user_id, err);
        }

        Ok(quiz)
    }
}
