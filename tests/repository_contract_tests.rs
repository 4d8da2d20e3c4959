mod common;

use std::sync::Arc;

use lingo_server::{
    auth::JwtService,
    errors::AppError,
    models::{
        domain::{Question, QuizFilter, Sender},
        dto::request::{
            ChatMessageRequest, NewChatRequest, QueryRequest, QuestionActionRequest, QuizRequest,
            SigninRequest, SignupRequest,
        },
    },
    repositories::UserRepository,
    services::auth_service::AdminSeed,
};

use common::test_state;

fn signup_request(name: &str, email: &str) -> SignupRequest {
    SignupRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: "secret-pw".to_string(),
    }
}

fn quiz_request(class_name: &str, subject: &str) -> QuizRequest {
    serde_json::from_value(serde_json::json!({
        "class": class_name,
        "subjects": [{
            "subject": subject,
            "questions": [
                { "question": "2 + 2?", "options": ["3", "4"], "correct_answer": "4" },
                { "question": "3 * 3?", "options": ["6", "9"], "correct_answer": "9" }
            ]
        }]
    }))
    .unwrap()
}

fn action_request(json: serde_json::Value) -> QuestionActionRequest {
    serde_json::from_value(json).unwrap()
}

#[tokio::test]
async fn signup_twice_with_same_email_conflicts() {
    let (state, _) = test_state();

    state
        .auth_service
        .signup(signup_request("Aleena", "aleena@example.com"))
        .await
        .unwrap();
    let second = state
        .auth_service
        .signup(signup_request("Someone Else", "aleena@example.com"))
        .await;

    assert!(matches!(second, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn issued_token_names_the_created_user() {
    let (state, stores) = test_state();

    let response = state
        .auth_service
        .signup(signup_request("Aleena", "aleena@example.com"))
        .await
        .unwrap();

    let config = common::test_config();
    let claims = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours)
        .verify(&response.token)
        .unwrap();

    assert_eq!(claims.sub, response.user.id);
    assert!(!claims.is_admin);

    let stored = stores.users.find_by_id(&claims.sub).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "secret-pw");
}

#[tokio::test]
async fn signin_round_trip_and_uniform_failure() {
    let (state, _) = test_state();
    state
        .auth_service
        .signup(signup_request("Aleena", "aleena@example.com"))
        .await
        .unwrap();

    let ok = state
        .auth_service
        .signin(SigninRequest {
            email: "aleena@example.com".to_string(),
            password: "secret-pw".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(ok.user.email, "aleena@example.com");

    let wrong = state
        .auth_service
        .signin(SigninRequest {
            email: "aleena@example.com".to_string(),
            password: "nope".to_string(),
        })
        .await;
    assert!(matches!(wrong, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn ensure_admin_creates_then_reports_existing() {
    let (state, _) = test_state();

    let first = state
        .auth_service
        .ensure_admin("Admin", "admin@example.com", "admin-pw")
        .await
        .unwrap();
    assert!(matches!(first, AdminSeed::Created(ref user) if user.is_admin));

    let second = state
        .auth_service
        .ensure_admin("Admin", "admin@example.com", "admin-pw")
        .await
        .unwrap();
    assert!(matches!(second, AdminSeed::AlreadyAdmin(_)));
}

#[tokio::test]
async fn quiz_ids_are_sequential() {
    let (state, _) = test_state();

    let first = state.quiz_service.create_quiz(quiz_request("5", "Mathematics")).await.unwrap();
    let second = state.quiz_service.create_quiz(quiz_request("6", "Science")).await.unwrap();

    assert_eq!(second.quiz_id, first.quiz_id + 1);
}

#[tokio::test]
async fn marking_attempted_twice_is_rejected() {
    let (state, stores) = test_state();
    let user = state
        .auth_service
        .signup(signup_request("Aleena", "aleena@example.com"))
        .await
        .unwrap()
        .user;
    let quiz = state.quiz_service.create_quiz(quiz_request("5", "Mathematics")).await.unwrap();

    let attempted = state.quiz_service.mark_attempted(quiz.quiz_id, &user.id).await.unwrap();
    assert_eq!(attempted.users_attempted, vec![user.id.clone()]);

    let again = state.quiz_service.mark_attempted(quiz.quiz_id, &user.id).await;
    assert!(matches!(again, Err(AppError::AlreadyAttempted)));

    let stored = stores.users.find_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.quiz_refs, vec![quiz.quiz_id]);
}

#[tokio::test]
async fn concurrent_attempts_record_user_once() {
    let (state, _) = test_state();
    let quiz = state.quiz_service.create_quiz(quiz_request("5", "Mathematics")).await.unwrap();
    let quiz_id = quiz.quiz_id;
    let quiz_service = Arc::clone(&state.quiz_service);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let quiz_service = Arc::clone(&quiz_service);
            tokio::spawn(async move { quiz_service.mark_attempted(quiz_id, "user-1").await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AppError::AlreadyAttempted) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(successes, 1);
    let stored = state.quiz_service.get_quiz(quiz_id).await.unwrap();
    assert_eq!(stored.users_attempted, vec!["user-1".to_string()]);
}

#[tokio::test]
async fn attempting_unknown_quiz_is_not_found() {
    let (state, _) = test_state();
    let result = state.quiz_service.mark_attempted(999, "user-1").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn question_add_appends_and_remove_unknown_is_noop() {
    let (state, _) = test_state();
    let quiz = state.quiz_service.create_quiz(quiz_request("5", "Mathematics")).await.unwrap();
    let original_ids: Vec<String> = quiz.subjects[0].questions.iter().map(|q| q.id.clone()).collect();

    let added = state
        .quiz_service
        .mutate_question(
            quiz.quiz_id,
            action_request(serde_json::json!({
                "subject": "Mathematics",
                "action": "add",
                "question": { "question": "10 / 2?", "options": ["5", "2"], "correct_answer": "5" }
            })),
        )
        .await
        .unwrap();

    let questions: &Vec<Question> = &added.subjects[0].questions;
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[0].id, original_ids[0]);
    assert_eq!(questions[1].id, original_ids[1]);
    assert_eq!(questions[2].question, "10 / 2?");

    let unchanged = state
        .quiz_service
        .mutate_question(
            quiz.quiz_id,
            action_request(serde_json::json!({
                "subject": "Mathematics",
                "action": "remove",
                "question_id": "does-not-exist"
            })),
        )
        .await
        .unwrap();
    assert_eq!(unchanged.subjects, added.subjects);
}

#[tokio::test]
async fn question_action_on_unknown_subject_is_not_found() {
    let (state, _) = test_state();
    let quiz = state.quiz_service.create_quiz(quiz_request("5", "Mathematics")).await.unwrap();

    let result = state
        .quiz_service
        .mutate_question(
            quiz.quiz_id,
            action_request(serde_json::json!({
                "subject": "History",
                "action": "remove",
                "question_id": "q-1"
            })),
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn subject_filter_is_case_insensitive_substring() {
    let (state, _) = test_state();
    state.quiz_service.create_quiz(quiz_request("5", "Mathematics")).await.unwrap();
    state.quiz_service.create_quiz(quiz_request("5", "Sindhi")).await.unwrap();
    state.quiz_service.create_quiz(quiz_request("6", "Applied math")).await.unwrap();

    let filter = QuizFilter {
        class_name: None,
        subject: Some("Math".to_string()),
    };
    let found = state.quiz_service.list(filter).await.unwrap();
    assert_eq!(found.len(), 2);

    let filter = QuizFilter {
        class_name: Some("5".to_string()),
        subject: Some("math".to_string()),
    };
    let found = state.quiz_service.list(filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].subjects[0].subject, "Mathematics");
}

#[tokio::test]
async fn replace_and_delete_quiz() {
    let (state, _) = test_state();
    let quiz = state.quiz_service.create_quiz(quiz_request("5", "Mathematics")).await.unwrap();

    let replaced = state
        .quiz_service
        .replace_quiz(quiz.quiz_id, quiz_request("7", "Physics"))
        .await
        .unwrap();
    assert_eq!(replaced.quiz_id, quiz.quiz_id);
    assert_eq!(replaced.class_name, "7");
    assert_eq!(replaced.subjects[0].subject, "Physics");

    state.quiz_service.delete_quiz(quiz.quiz_id).await.unwrap();
    let missing = state.quiz_service.get_quiz(quiz.quiz_id).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn queries_are_stored_and_deleted() {
    let (state, _) = test_state();

    let query = state
        .query_service
        .submit(QueryRequest {
            name: "Parent".to_string(),
            email: "parent@example.com".to_string(),
            query: "When does class 6 start?".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(state.query_service.list().await.unwrap().len(), 1);
    assert_eq!(state.query_service.get(&query.id).await.unwrap(), query);

    state.query_service.delete(&query.id).await.unwrap();
    let again = state.query_service.delete(&query.id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn chats_are_isolated_between_users() {
    let (state, _) = test_state();

    let chat = state
        .chat_service
        .create(
            "owner",
            NewChatRequest {
                title: "Homework".to_string(),
                text: "Help with fractions".to_string(),
                sender: Some(Sender::User),
            },
        )
        .await
        .unwrap();

    let foreign_get = state.chat_service.get(&chat.id, "intruder").await;
    assert!(matches!(foreign_get, Err(AppError::NotFound(_))));

    let foreign_append = state
        .chat_service
        .append_message(
            &chat.id,
            "intruder",
            ChatMessageRequest {
                text: "hi".to_string(),
                sender: Some(Sender::User),
            },
        )
        .await;
    assert!(matches!(foreign_append, Err(AppError::NotFound(_))));

    let foreign_delete = state.chat_service.delete(&chat.id, "intruder").await;
    assert!(matches!(foreign_delete, Err(AppError::NotFound(_))));

    assert!(state.chat_service.list_for_owner("intruder").await.unwrap().is_empty());

    let updated = state
        .chat_service
        .append_message(
            &chat.id,
            "owner",
            ChatMessageRequest {
                text: "Sure, let's start".to_string(),
                sender: Some(Sender::Bot),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.messages.len(), 2);
    assert_eq!(updated.messages[1].sender, Sender::Bot);
}

#[tokio::test]
async fn delete_all_chats_with_none_is_zero() {
    let (state, _) = test_state();
    assert_eq!(state.chat_service.delete_all("nobody").await.unwrap(), 0);
}

#[tokio::test]
async fn added_question_never_reuses_an_existing_id() {
    let (state, _) = test_state();
    let request: QuizRequest = serde_json::from_value(serde_json::json!({
        "class": "5",
        "subjects": [{
            "subject": "Mathematics",
            "questions": [{ "id": "q-1", "question": "2 + 2?", "options": ["4"], "correct_answer": "4" }]
        }]
    }))
    .unwrap();
    let quiz = state.quiz_service.create_quiz(request).await.unwrap();
    assert_eq!(quiz.subjects[0].questions[0].id, "q-1");

    let added = state
        .quiz_service
        .mutate_question(
            quiz.quiz_id,
            action_request(serde_json::json!({
                "subject": "Mathematics",
                "action": "add",
                "question": { "id": "q-1", "question": "3 + 3?", "options": ["6"], "correct_answer": "6" }
            })),
        )
        .await
        .unwrap();
    let ids: Vec<&str> = added.subjects[0].questions.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);

    let removed = state
        .quiz_service
        .mutate_question(
            quiz.quiz_id,
            action_request(serde_json::json!({
                "subject": "Mathematics",
                "action": "remove",
                "question_id": "q-1"
            })),
        )
        .await
        .unwrap();
    assert_eq!(removed.subjects[0].questions.len(), 1);
    assert_eq!(removed.subjects[0].questions[0].question, "3 + 3?");
}

#[tokio::test]
async fn quiz_body_with_repeated_question_ids_is_rejected() {
    let (state, _) = test_state();
    let request: QuizRequest = serde_json::from_value(serde_json::json!({
        "class": "5",
        "subjects": [{
            "subject": "Mathematics",
            "questions": [
                { "id": "q-1", "question": "2 + 2?", "options": ["4"], "correct_answer": "4" },
                { "id": "q-1", "question": "3 + 3?", "options": ["6"], "correct_answer": "6" }
            ]
        }]
    }))
    .unwrap();

    let created = state.quiz_service.create_quiz(request.clone()).await;
    assert!(matches!(created, Err(AppError::BadRequest(_))));

    let quiz = state.quiz_service.create_quiz(quiz_request("5", "Mathematics")).await.unwrap();
    let replaced = state.quiz_service.replace_quiz(quiz.quiz_id, request).await;
    assert!(matches!(replaced, Err(AppError::BadRequest(_))));
}
