use actix_web::{web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{request::QueryRequest, response::ApiResponse},
};

pub async fn submit_query(
    state: web::Data<AppState>,
    request: web::Json<QueryRequest>,
) -> Result<HttpResponse, AppError> {
    let query = state.query_service.submit(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::new("Query submitted successfully", query)))
}
