use actix_web::{HttpRequest, HttpResponse, web};

use crate::db::DbPool;
use crate::errors::AppError;
use crate::services::user as user_service;
use crate::validate::CreateUserRequest;

use super::body_or_empty;

/// POST /users
pub async fn create(
    pool: web::Data<DbPool>,
    req: HttpRequest,
    body: Result<web::Json<CreateUserRequest>, actix_web::Error>,
) -> Result<HttpResponse, actix_web::Error> {
    let body = body_or_empty(&req, body)?;
    let user = user_service::create_user(&pool, &body).await?;
    Ok(HttpResponse::Created().json(user))
}

/// GET /users/{id}
pub async fn read(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::get_user(&pool, &path).await?;
    Ok(HttpResponse::Ok().json(user))
}
