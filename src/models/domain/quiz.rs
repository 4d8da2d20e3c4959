use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub quiz_id: i64, // Assigned from the counters sequence, never by clients
    #[serde(rename = "class")]
    pub class_name: String,
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub users_attempted: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Subject {
    pub subject: String,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Question {
    pub fn new(question: &str, options: &[&str], correct_answer: &str) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct_answer.to_string(),
        }
    }
}

/// An edit applied to the question list of one subject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionAction {
    Add(Question),
    Remove { question_id: String },
    Update { question_id: String, question: Question },
}

impl Subject {
    /// Unknown question ids on remove/update leave the list untouched.
    pub fn apply(&mut self, action: QuestionAction) {
        match action {
            QuestionAction::Add(question) => self.questions.push(question),
            QuestionAction::Remove { question_id } => {
                self.questions.retain(|q| q.id != question_id);
            }
            QuestionAction::Update {
                question_id,
                question,
            } => {
                if let Some(existing) = self.questions.iter_mut().find(|q| q.id == question_id) {
                    *existing = Question {
                        id: question_id,
                        ..question
                    };
                }
            }
        }
    }
}

impl Quiz {
    pub fn new(quiz_id: i64, class_name: &str, subjects: Vec<Subject>) -> Self {
        Quiz {
            quiz_id,
            class_name: class_name.to_string(),
            subjects,
            users_attempted: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn has_attempted(&self, user_id: &str) -> bool {
        self.users_attempted.iter().any(|id| id == user_id)
    }

    /// Applies `action` to the first subject named exactly `subject_name`.
    pub fn apply_question_action(
        &mut self,
        subject_name: &str,
        action: QuestionAction,
    ) -> AppResult<()> {
        let subject = self
            .subjects
            .iter_mut()
            .find(|s| s.subject == subject_name)
            .ok_or_else(|| subject_not_found(subject_name))?;

        subject.apply(action);
        Ok(())
    }
}

pub fn subject_not_found(subject_name: &str) -> AppError {
    AppError::NotFound(format!("Subject '{}' not found in quiz", subject_name))
}

/// Listing filter. Class matches exactly; subject is a case-insensitive
/// substring of any nested subject name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct QuizFilter {
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub subject: Option<String>,
}

impl QuizFilter {
    /// Drops empty parameters so `?class=&subject=` behaves like no filter.
    pub fn normalized(self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        QuizFilter {
            class_name: non_empty(self.class_name),
            subject: non_empty(self.subject),
        }
    }

    pub fn matches(&self, quiz: &Quiz) -> bool {
        if let Some(class_name) = &self.class_name {
            if &quiz.class_name != class_name {
                return false;
            }
        }

        match &self.subject {
            Some(subject) => {
                let needle = subject.to_lowercase();
                quiz.subjects
                    .iter()
                    .any(|s| s.subject.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

/// A quiz as seen by one user.
#[derive(Clone, Debug, Serialize)]
pub struct QuizView {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub attempted: bool,
}

impl QuizView {
    pub fn for_user(quiz: Quiz, user_id: &str) -> Self {
        let attempted = quiz.has_attempted(user_id);
        QuizView { quiz, attempted }
    }
}
