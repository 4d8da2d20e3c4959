use actix_web::{web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{SigninRequest, SignupRequest},
};

pub async fn signup(
    state: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.auth_service.signup(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

pub async fn signin(
    state: web::Data<AppState>,
    request: web::Json<SigninRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.auth_service.signin(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
