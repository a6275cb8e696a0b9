pub mod meeting_handlers;
pub mod user_handlers;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, error, web};

use crate::errors::{AppError, ErrorBody};

/// Body and query extraction failures answer with the same `{message}`
/// shape as every other validation error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
        let message = match err {
            error::JsonPayloadError::ContentType => {
                "Invalid request body: expected application/json".to_string()
            }
            other => format!("Invalid request body: {other}"),
        };
        AppError::validation(message).into()
    })
}

/// A request that sent no `Content-Type` at all is read as an empty body, so
/// the route reports its own missing-field message. Other extraction errors
/// pass through.
pub(crate) fn body_or_empty<T: Default>(
    req: &HttpRequest,
    body: Result<web::Json<T>, actix_web::Error>,
) -> Result<T, actix_web::Error> {
    match body {
        Ok(json) => Ok(json.into_inner()),
        Err(_) if !req.headers().contains_key(header::CONTENT_TYPE) => Ok(T::default()),
        Err(err) => Err(err),
    }
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: error::QueryPayloadError, _req: &HttpRequest| {
        AppError::validation(format!("Invalid query string: {err}")).into()
    })
}

async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody {
        message: "Route not found".to_string(),
    })
}

/// Register all routes. The caller provides `web::Data<DbPool>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope("/users")
                .route("", web::post().to(user_handlers::create))
                .route("/{id}", web::get().to(user_handlers::read)),
        )
        .service(
            web::scope("/meetings")
                .route("", web::post().to(meeting_handlers::create))
                .route("", web::get().to(meeting_handlers::list))
                .route("/{id}", web::get().to(meeting_handlers::read))
                .route("/{id}", web::put().to(meeting_handlers::update))
                .route("/{id}", web::delete().to(meeting_handlers::delete)),
        )
        .default_service(web::to(route_not_found));
}
