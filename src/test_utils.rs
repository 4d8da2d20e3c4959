use crate::models::domain::{Question, Quiz, Subject, User};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A regular learner account.
    pub fn test_user() -> User {
        User::new("Test Learner", "learner@example.com", "hash")
    }

    pub fn test_admin() -> User {
        User::new_admin("Test Admin", "admin@example.com", "hash")
    }

    /// Class 5 quiz with a Mathematics subject holding two questions and
    /// an empty Sindhi subject.
    pub fn test_quiz(quiz_id: i64) -> Quiz {
        Quiz::new(
            quiz_id,
            "5",
            vec![
                Subject {
                    subject: "Mathematics".to_string(),
                    questions: vec![
                        Question::new("2 + 2?", &["3", "4"], "4"),
                        Question::new("3 * 3?", &["6", "9"], "9"),
                    ],
                },
                Subject {
                    subject: "Sindhi".to_string(),
                    questions: vec![],
                },
            ],
        )
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_roles() {
        assert!(!test_user().is_admin);
        assert!(test_admin().is_admin);
    }

    #[test]
    fn test_fixtures_quiz_shape() {
        let quiz = test_quiz(7);
        assert_eq!(quiz.quiz_id, 7);
        assert_eq!(quiz.class_name, "5");
        assert_eq!(quiz.subjects[0].questions.len(), 2);
        assert!(quiz.users_attempted.is_empty());
    }
}
