use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::api::error_response;
use crate::services::genre_service::{self, GenreInput};

pub async fn list_genres(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match genre_service::list_genres(&db).await {
        Ok(genres) => Json(json!({ "genres": genres })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_genre(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match genre_service::get_genre(&db, id).await {
        Ok(genre) => Json(json!({ "genre": genre })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_genre(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<GenreInput>,
) -> impl IntoResponse {
    match genre_service::create_genre(&db, payload).await {
        Ok(genre) => (StatusCode::CREATED, Json(json!({ "genre": genre }))).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_genre(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<GenreInput>,
) -> impl IntoResponse {
    match genre_service::update_genre(&db, id, payload).await {
        Ok(genre) => Json(json!({ "genre": genre })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_genre(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match genre_service::delete_genre(&db, id).await {
        Ok(()) => Json(json!({ "message": "Genre deleted successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}
