use actix_cors::Cors;
use actix_web::{http::header, web};

use crate::{
    auth::AuthGuard,
    errors::AppError,
    handlers::{
        admin_handler, auth_handler, chat_handler, health_handler, query_handler, quiz_handler,
    },
};

/// The routing table. Each scope declares its access level once; handlers
/// never opt in to authorization on their own.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health_handler::health_check))
        .route("/health/ready", web::get().to(health_handler::health_check_ready))
        .service(
            web::scope("/api/auth")
                .route("/signup", web::post().to(auth_handler::signup))
                .route("/signin", web::post().to(auth_handler::signin)),
        )
        .service(
            web::scope("/api/queries")
                .route("", web::post().to(query_handler::submit_query)),
        )
        .service(
            web::scope("/api/quizzes")
                .wrap(AuthGuard::user())
                .route("", web::get().to(quiz_handler::list_quizzes))
                .route("/{quiz_id}", web::get().to(quiz_handler::get_quiz))
                .route("/{quiz_id}/attempt", web::post().to(quiz_handler::attempt_quiz)),
        )
        .service(
            web::scope("/api/admin")
                .wrap(AuthGuard::admin())
                .route("/quizzes", web::get().to(admin_handler::list_quizzes))
                .route("/quizzes", web::post().to(admin_handler::create_quiz))
                .route("/quizzes/{quiz_id}", web::get().to(admin_handler::get_quiz))
                .route("/quizzes/{quiz_id}", web::put().to(admin_handler::replace_quiz))
                .route("/quizzes/{quiz_id}", web::delete().to(admin_handler::delete_quiz))
                .route(
                    "/quizzes/{quiz_id}/questions",
                    web::put().to(admin_handler::mutate_questions),
                )
                .route("/queries", web::get().to(admin_handler::list_queries))
                .route("/queries/{id}", web::get().to(admin_handler::get_query))
                .route("/queries/{id}", web::delete().to(admin_handler::delete_query)),
        )
        .service(
            web::scope("/api/chats")
                .wrap(AuthGuard::user())
                .route("", web::get().to(chat_handler::list_chats))
                .route("", web::delete().to(chat_handler::delete_all_chats))
                .route("/new", web::post().to(chat_handler::create_chat))
                .route("/{chat_id}", web::post().to(chat_handler::append_message))
                .route("/{chat_id}", web::get().to(chat_handler::get_chat))
                .route("/{chat_id}", web::delete().to(chat_handler::delete_chat)),
        );
}

/// Malformed JSON bodies are reported like any other bad request.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {}", err)).into()
    })
}

pub fn cors(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .supports_credentials()
        .max_age(3600)
}
