use actix_web::{web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::Principal,
    errors::AppError,
    models::dto::{
        request::{ChatMessageRequest, NewChatRequest},
        response::{ApiResponse, DeletedCount, MessageResponse},
    },
};

pub async fn create_chat(
    state: web::Data<AppState>,
    request: web::Json<NewChatRequest>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    let chat = state
        .chat_service
        .create(&principal.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::new("Chat created successfully", chat)))
}

pub async fn append_message(
    state: web::Data<AppState>,
    chat_id: web::Path<String>,
    request: web::Json<ChatMessageRequest>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    let chat = state
        .chat_service
        .append_message(&chat_id, &principal.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new("Message saved successfully", chat)))
}

pub async fn list_chats(
    state: web::Data<AppState>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    let chats = state.chat_service.list_for_owner(&principal.id).await?;
    Ok(HttpResponse::Ok().json(chats))
}

pub async fn get_chat(
    state: web::Data<AppState>,
    chat_id: web::Path<String>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    let chat = state.chat_service.get(&chat_id, &principal.id).await?;
    Ok(HttpResponse::Ok().json(chat))
}

pub async fn delete_chat(
    state: web::Data<AppState>,
    chat_id: web::Path<String>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    state.chat_service.delete(&chat_id, &principal.id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Chat deleted successfully")))
}

pub async fn delete_all_chats(
    state: web::Data<AppState>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    let deleted_count = state.chat_service.delete_all(&principal.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(
        "All chats deleted successfully",
        DeletedCount { deleted_count },
    )))
}
