//! User workflow tests: signup validation, email uniqueness, lookup by id.

mod common;

use serde_json::json;

use meeting_scheduler::errors::AppError;
use meeting_scheduler::models::user::{self, NewUser};
use meeting_scheduler::services::user as user_service;
use common::*;

#[tokio::test]
async fn test_create_user_success() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let created = user_service::create_user(
        pool,
        &user_request(json!({"name": "  Ada Lovelace ", "email": " ada@example.com "})),
    )
    .await
    .expect("create user");

    assert!(created.id > 0);
    assert_eq!(created.name, "Ada Lovelace");
    assert_eq!(created.email, TEST_EMAIL);
    assert_eq!(created.created_at, created.updated_at);

    let found = user_service::get_user(pool, &created.id.to_string())
        .await
        .expect("get user");
    assert_eq!(found, created);
}

#[tokio::test]
async fn test_create_user_rejects_email_without_tld() {
    let db = setup_test_db().await;

    let req = user_request(json!({"name": "A", "email": "a@b"}));
    let err = user_service::create_user(db.pool(), &req).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == "Invalid email format"));

    let req = user_request(json!({"name": "A", "email": "a@b.com"}));
    let ok = user_service::create_user(db.pool(), &req).await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let db = setup_test_db().await;
    let pool = db.pool();

    user_service::create_user(pool, &user_request(json!({"name": "First", "email": "a@b.com"})))
        .await
        .expect("first signup");

    // Same address after trimming.
    let req = user_request(json!({"name": "Second", "email": "  a@b.com"}));
    let err = user_service::create_user(pool, &req).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(ref msg) if msg == "Email already exists"));
}

#[tokio::test]
async fn test_create_user_missing_fields() {
    let db = setup_test_db().await;

    let err = user_service::create_user(db.pool(), &user_request(json!({"email": "a@b.com"})))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == "Name and email are required"));
}

#[tokio::test]
async fn test_store_enforces_unique_email() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let new = NewUser {
        name: "Dup".to_string(),
        email: "dup@example.com".to_string(),
    };
    user::create(pool, &new).await.expect("first insert");

    let err = user::create(pool, &new).await.unwrap_err();
    match &err {
        AppError::Db(sqlx::Error::Database(e)) => assert!(e.is_unique_violation()),
        other => panic!("expected unique violation, got {other:?}"),
    }

    // A signup that loses the race to the unique index reads like the
    // up-front duplicate check.
    let mapped = user_service::map_insert_error(err);
    assert!(matches!(mapped, AppError::Conflict(ref msg) if msg == "Email already exists"));
}

#[test]
fn test_insert_error_mapping_leaves_other_errors_alone() {
    let mapped = user_service::map_insert_error(AppError::Db(sqlx::Error::RowNotFound));
    assert!(matches!(mapped, AppError::Db(sqlx::Error::RowNotFound)));
}

#[tokio::test]
async fn test_get_user_invalid_id() {
    let db = setup_test_db().await;

    for raw in ["abc", "0", "-4", "1.5", ""] {
        let err = user_service::get_user(db.pool(), raw).await.unwrap_err();
        assert!(
            matches!(err, AppError::Validation(ref msg) if msg == "Invalid user id"),
            "id {raw:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_get_user_not_found() {
    let db = setup_test_db().await;

    let err = user_service::get_user(db.pool(), "999999").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref msg) if msg == "User not found"));
}

#[tokio::test]
async fn test_find_by_email() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let created = create_test_user(pool, "lookup").await;

    let found = user::find_by_email(pool, "user_lookup@example.com")
        .await
        .expect("query")
        .expect("user exists");
    assert_eq!(found.id, created.id);

    let missing = user::find_by_email(pool, "nobody@example.com").await.expect("query");
    assert!(missing.is_none());
}
