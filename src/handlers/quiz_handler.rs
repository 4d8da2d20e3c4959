use actix_web::{web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::Principal,
    errors::AppError,
    models::{domain::QuizFilter, dto::response::ApiResponse},
};

pub async fn list_quizzes(
    state: web::Data<AppState>,
    filter: web::Query<QuizFilter>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    let quizzes = state
        .quiz_service
        .list_for_user(filter.into_inner(), &principal.id)
        .await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

pub async fn get_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(quiz_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

pub async fn attempt_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<i64>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .mark_attempted(quiz_id.into_inner(), &principal.id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new("Quiz marked as attempted", quiz)))
}
