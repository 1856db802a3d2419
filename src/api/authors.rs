use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::api::error_response;
use crate::services::author_service::{self, AuthorInput};

pub async fn list_authors(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match author_service::list_authors(&db).await {
        Ok(authors) => Json(json!({ "authors": authors })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_author(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match author_service::get_author(&db, id).await {
        Ok(author) => Json(json!({ "author": author })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_author(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<AuthorInput>,
) -> impl IntoResponse {
    match author_service::create_author(&db, payload).await {
        Ok(author) => (StatusCode::CREATED, Json(json!({ "author": author }))).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_author(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<AuthorInput>,
) -> impl IntoResponse {
    match author_service::update_author(&db, id, payload).await {
        Ok(author) => Json(json!({ "author": author })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_author(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match author_service::delete_author(&db, id).await {
        Ok(()) => Json(json!({ "message": "Author deleted successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}
