use actix_web::{HttpRequest, HttpResponse, web};

use crate::db::DbPool;
use crate::errors::AppError;
use crate::services::meeting as meeting_service;
use crate::validate::{CreateMeetingRequest, ListMeetingsQuery, UpdateMeetingRequest};

use super::body_or_empty;

/// POST /meetings
pub async fn create(
    pool: web::Data<DbPool>,
    req: HttpRequest,
    body: Result<web::Json<CreateMeetingRequest>, actix_web::Error>,
) -> Result<HttpResponse, actix_web::Error> {
    let body = body_or_empty(&req, body)?;
    let meeting = meeting_service::create_meeting(&pool, &body).await?;
    Ok(HttpResponse::Created().json(meeting))
}

/// GET /meetings?userId=&startDate=&endDate=
pub async fn list(
    pool: web::Data<DbPool>,
    query: web::Query<ListMeetingsQuery>,
) -> Result<HttpResponse, AppError> {
    let meetings = meeting_service::list_meetings(&pool, &query).await?;
    Ok(HttpResponse::Ok().json(meetings))
}

/// GET /meetings/{id}
pub async fn read(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let meeting = meeting_service::get_meeting(&pool, &path).await?;
    Ok(HttpResponse::Ok().json(meeting))
}

/// PUT /meetings/{id}
pub async fn update(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    req: HttpRequest,
    body: Result<web::Json<UpdateMeetingRequest>, actix_web::Error>,
) -> Result<HttpResponse, actix_web::Error> {
    let body = body_or_empty(&req, body)?;
    let meeting = meeting_service::update_meeting(&pool, &path, &body).await?;
    Ok(HttpResponse::Ok().json(meeting))
}

/// DELETE /meetings/{id}
pub async fn delete(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    meeting_service::delete_meeting(&pool, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
