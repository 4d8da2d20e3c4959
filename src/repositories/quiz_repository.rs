use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::{is_duplicate_key_error, Database},
    errors::{AppError, AppResult},
    models::domain::{quiz::subject_not_found, QuestionAction, Quiz, QuizFilter, Subject},
};

const QUIZ_SEQUENCE: &str = "quiz_id";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Next value of the quiz id sequence.
    async fn next_quiz_id(&self) -> AppResult<i64>;
    async fn find(&self, filter: &QuizFilter) -> AppResult<Vec<Quiz>>;
    async fn find_by_quiz_id(&self, quiz_id: i64) -> AppResult<Option<Quiz>>;
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn replace_content(
        &self,
        quiz_id: i64,
        class_name: &str,
        subjects: Vec<Subject>,
    ) -> AppResult<Quiz>;
    async fn apply_question_action(
        &self,
        quiz_id: i64,
        subject_name: &str,
        action: QuestionAction,
    ) -> AppResult<Quiz>;
    async fn delete(&self, quiz_id: i64) -> AppResult<Quiz>;
    /// Adds `user_id` to the attempted set in one conditional write.
    async fn mark_attempted(&self, quiz_id: i64, user_id: &str) -> AppResult<Quiz>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

#[derive(Debug, Deserialize, Serialize)]
struct Counter {
    #[serde(rename = "_id")]
    id: String,
    seq: i64,
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
    counters: Collection<Counter>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_collection("quizzes"),
            counters: db.get_collection("counters"),
        }
    }

    fn return_updated() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }

    async fn exists(&self, quiz_id: i64) -> AppResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "quiz_id": quiz_id })
            .await?;
        Ok(count > 0)
    }
}

pub fn quiz_not_found(quiz_id: i64) -> AppError {
    AppError::NotFound(format!("Quiz {} not found", quiz_id))
}

/// Query document for a listing filter. User input is escaped so the
/// subject filter is a plain case-insensitive substring match.
pub fn filter_document(filter: &QuizFilter) -> Document {
    let mut query = doc! {};

    if let Some(class_name) = &filter.class_name {
        query.insert("class", class_name.as_str());
    }

    if let Some(subject) = &filter.subject {
        query.insert(
            "subjects.subject",
            doc! { "$regex": regex::escape(subject), "$options": "i" },
        );
    }

    query
}

/// Update document and optional array filters for a question action on the
/// first subject matched by `subjects.subject` in the query.
pub fn question_update(
    action: &QuestionAction,
) -> AppResult<(Document, Option<Vec<Document>>)> {
    let update = match action {
        QuestionAction::Add(question) => (
            doc! { "$push": { "subjects.$.questions": to_bson(question)? } },
            None,
        ),
        QuestionAction::Remove { question_id } => (
            doc! { "$pull": { "subjects.$.questions": { "id": question_id.as_str() } } },
            None,
        ),
        QuestionAction::Update {
            question_id,
            question,
        } => {
            let mut replacement = question.clone();
            replacement.id = question_id.clone();

            (
                doc! { "$set": { "subjects.$.questions.$[q]": to_bson(&replacement)? } },
                Some(vec![doc! { "q.id": question_id.as_str() }]),
            )
        }
    };

    Ok(update)
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn next_quiz_id(&self) -> AppResult<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters
            .find_one_and_update(doc! { "_id": QUIZ_SEQUENCE }, doc! { "$inc": { "seq": 1_i64 } })
            .with_options(options)
            .await?
            .ok_or_else(|| AppError::InternalError("Quiz id sequence unavailable".to_string()))?;

        Ok(counter.seq)
    }

    async fn find(&self, filter: &QuizFilter) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(filter_document(filter))
            .sort(doc! { "quiz_id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn find_by_quiz_id(&self, quiz_id: i64) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "quiz_id": quiz_id }).await?;
        Ok(quiz)
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        match self.collection.insert_one(&quiz).await {
            Ok(_) => Ok(quiz),
            Err(err) if is_duplicate_key_error(&err) => Err(AppError::Conflict(format!(
                "Quiz with quiz_id {} already exists",
                quiz.quiz_id
            ))),
            Err(err) => Err(err.into()),
        }
    }

    async fn replace_content(
        &self,
        quiz_id: i64,
        class_name: &str,
        subjects: Vec<Subject>,
    ) -> AppResult<Quiz> {
        let update = doc! {
            "$set": {
                "class": class_name,
                "subjects": to_bson(&subjects)?,
            }
        };

        self.collection
            .find_one_and_update(doc! { "quiz_id": quiz_id }, update)
            .with_options(Self::return_updated())
            .await?
            .ok_or_else(|| quiz_not_found(quiz_id))
    }

    async fn apply_question_action(
        &self,
        quiz_id: i64,
        subject_name: &str,
        action: QuestionAction,
    ) -> AppResult<Quiz> {
        let (update, array_filters) = question_update(&action)?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .array_filters(array_filters)
            .build();

        let updated = self
            .collection
            .find_one_and_update(
                doc! { "quiz_id": quiz_id, "subjects.subject": subject_name },
                update,
            )
            .with_options(options)
            .await?;

        match updated {
            Some(quiz) => Ok(quiz),
            None if self.exists(quiz_id).await? => Err(subject_not_found(subject_name)),
            None => Err(quiz_not_found(quiz_id)),
        }
    }

    async fn delete(&self, quiz_id: i64) -> AppResult<Quiz> {
        self.collection
            .find_one_and_delete(doc! { "quiz_id": quiz_id })
            .await?
            .ok_or_else(|| quiz_not_found(quiz_id))
    }

    async fn mark_attempted(&self, quiz_id: i64, user_id: &str) -> AppResult<Quiz> {
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "quiz_id": quiz_id, "users_attempted": { "$ne": user_id } },
                doc! { "$push": { "users_attempted": user_id } },
            )
            .with_options(Self::return_updated())
            .await?;

        match updated {
            Some(quiz) => Ok(quiz),
            None if self.exists(quiz_id).await? => Err(AppError::AlreadyAttempted),
            None => Err(quiz_not_found(quiz_id)),
        }
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let quiz_id_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(quiz_id_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}
