use actix_web::{web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::QuizFilter,
        dto::{
            request::{QuestionActionRequest, QuizRequest},
            response::{ApiResponse, MessageResponse},
        },
    },
};

pub async fn list_quizzes(
    state: web::Data<AppState>,
    filter: web::Query<QuizFilter>,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list(filter.into_inner()).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

pub async fn get_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(quiz_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<QuizRequest>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.create_quiz(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::new("Quiz added successfully", quiz)))
}

pub async fn replace_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<i64>,
    request: web::Json<QuizRequest>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .replace_quiz(quiz_id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new("Quiz updated successfully", quiz)))
}

pub async fn mutate_questions(
    state: web::Data<AppState>,
    quiz_id: web::Path<i64>,
    request: web::Json<QuestionActionRequest>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .mutate_question(quiz_id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new("Quiz updated successfully", quiz)))
}

pub async fn delete_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.delete_quiz(quiz_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new("Quiz removed successfully", quiz)))
}

pub async fn list_queries(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let queries = state.query_service.list().await?;
    Ok(HttpResponse::Ok().json(queries))
}

pub async fn get_query(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let query = state.query_service.get(&id).await?;
    Ok(HttpResponse::Ok().json(query))
}

pub async fn delete_query(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.query_service.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Query deleted successfully")))
}
