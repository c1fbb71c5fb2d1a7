pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::auth::{AuthMiddleware, TokenCodec};
use crate::error::AppError;

/// Mounts the public `/auth` scope and the `/tasks` scope guarded by
/// `AuthMiddleware`. The codec is the one the login handler signs with.
pub fn config(codec: TokenCodec) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(
            web::scope("/auth")
                .service(auth::register)
                .service(auth::login)
                .service(auth::logout),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware::new(codec))
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
    }
}

/// Renders request-body deserialization failures in the same
/// `{"error": ...}` shape as application errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
