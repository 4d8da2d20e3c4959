use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Question, QuestionAction, Sender, Subject};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SigninRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct QuestionInput {
    pub id: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "question text is required"))]
    pub question: String,

    #[serde(default)]
    pub options: Vec<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "correct_answer is required"))]
    pub correct_answer: String,
}

impl From<QuestionInput> for Question {
    fn from(input: QuestionInput) -> Self {
        Question {
            id: input
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            question: input.question,
            options: input.options,
            correct_answer: input.correct_answer,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SubjectInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "subject name is required"))]
    pub subject: String,

    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<QuestionInput>,
}

impl From<SubjectInput> for Subject {
    fn from(input: SubjectInput) -> Self {
        Subject {
            subject: input.subject,
            questions: input.questions.into_iter().map(Question::from).collect(),
        }
    }
}

/// Body for creating or fully replacing a quiz.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuizRequest {
    pub quiz_id: Option<i64>,

    #[serde(rename = "class", default)]
    #[validate(length(min = 1, message = "Class and subjects are required"))]
    pub class_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Class and subjects are required"), nested)]
    pub subjects: Vec<SubjectInput>,
}

impl QuizRequest {
    /// Question ids supplied in the body must be unique within each subject.
    pub fn check_question_ids(&self) -> AppResult<()> {
        for subject in &self.subjects {
            let mut seen = HashSet::new();
            let ids = subject
                .questions
                .iter()
                .filter_map(|q| q.id.as_deref())
                .filter(|id| !id.is_empty());

            for id in ids {
                if !seen.insert(id) {
                    return Err(AppError::BadRequest(format!(
                        "Duplicate question id '{}' in subject '{}'",
                        id, subject.subject
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn into_subjects(self) -> Vec<Subject> {
        self.subjects.into_iter().map(Subject::from).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionActionKind {
    Add,
    Remove,
    Update,
}

/// Body for editing questions inside one subject of a quiz.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionActionRequest {
    #[serde(default)]
    pub subject: String,
    pub action: Option<QuestionActionKind>,
    pub question_id: Option<String>,
    pub question: Option<QuestionInput>,
}

impl QuestionActionRequest {
    /// Checks that the fields required by the chosen action are present.
    pub fn into_action(self) -> AppResult<(String, QuestionAction)> {
        if self.subject.is_empty() {
            return Err(AppError::BadRequest("subject is required".to_string()));
        }

        let action = self.action.ok_or_else(|| {
            AppError::BadRequest("action must be one of add, remove, update".to_string())
        })?;

        let question_id = self.question_id.filter(|id| !id.is_empty());
        let question = match self.question {
            Some(mut input) => {
                input.validate()?;
                // Added questions always get a fresh id; update keeps `question_id`.
                input.id = None;
                Some(Question::from(input))
            }
            None => None,
        };

        let action = match (action, question_id, question) {
            (QuestionActionKind::Add, _, Some(question)) => QuestionAction::Add(question),
            (QuestionActionKind::Remove, Some(question_id), _) => {
                QuestionAction::Remove { question_id }
            }
            (QuestionActionKind::Update, Some(question_id), Some(question)) => {
                QuestionAction::Update {
                    question_id,
                    question,
                }
            }
            (QuestionActionKind::Add, _, None) => {
                return Err(AppError::BadRequest(
                    "question is required for add".to_string(),
                ))
            }
            (QuestionActionKind::Remove, None, _) => {
                return Err(AppError::BadRequest(
                    "question_id is required for remove".to_string(),
                ))
            }
            (QuestionActionKind::Update, _, _) => {
                return Err(AppError::BadRequest(
                    "question_id and question are required for update".to_string(),
                ))
            }
        };

        Ok((self.subject, action))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QueryRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name, email, and query are required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Name, email, and query are required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Name, email, and query are required"))]
    pub query: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewChatRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title, text, and sender are required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Title, text, and sender are required"))]
    pub text: String,

    #[validate(required(message = "Title, text, and sender are required"))]
    pub sender: Option<Sender>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatMessageRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Text and sender are required"))]
    pub text: String,

    #[validate(required(message = "Text and sender are required"))]
    pub sender: Option<Sender>,
}
