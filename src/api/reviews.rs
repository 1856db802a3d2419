use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::models::Review;
use crate::services::review_service;

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: i32,
    pub comment: Option<String>,
}

// Responses carry the parent book id so the caller can return to the book.
pub async fn create_review(
    State(db): State<DatabaseConnection>,
    Json(review): Json<Review>,
) -> impl IntoResponse {
    match review_service::create_review(&db, review).await {
        Ok(review) => (
            StatusCode::CREATED,
            Json(json!({
                "review": review,
                "book_id": review.book_id,
                "message": "Review created successfully"
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_review(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReviewRequest>,
) -> impl IntoResponse {
    match review_service::update_review(&db, id, payload.rating, payload.comment).await {
        Ok(review) => Json(json!({
            "review": review,
            "book_id": review.book_id,
            "message": "Review updated successfully"
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_review(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match review_service::delete_review(&db, id).await {
        Ok(book_id) => Json(json!({
            "book_id": book_id,
            "message": "Review deleted successfully"
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}
