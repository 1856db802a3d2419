use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::models::Book;
use crate::services::book_service::{self, BookFilter};
use crate::services::genre_service;

#[derive(Debug, Deserialize)]
pub struct BooksQuery {
    pub search: Option<String>,
    pub genre_id: Option<i32>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopRatedQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceAuthorsRequest {
    pub author_ids: Vec<i32>,
}

// The listing carries the available genres so callers can render the filter
// without a second round trip.
pub async fn list_books(
    State(db): State<DatabaseConnection>,
    Query(params): Query<BooksQuery>,
) -> impl IntoResponse {
    let filter = BookFilter {
        search: params.search,
        genre_id: params.genre_id,
        sort: params.sort_by,
    };

    let genres = match genre_service::list_genres(&db).await {
        Ok(genres) => genres,
        Err(e) => return error_response(e),
    };

    match book_service::list_books(&db, filter).await {
        Ok(books) => {
            let total = books.len();
            Json(json!({
                "books": books,
                "genres": genres,
                "total": total
            }))
            .into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn top_rated(
    State(db): State<DatabaseConnection>,
    Query(params): Query<TopRatedQuery>,
) -> impl IntoResponse {
    match book_service::top_rated(&db, params.count).await {
        Ok(books) => Json(json!({ "books": books })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn by_genre(
    State(db): State<DatabaseConnection>,
    Path(genre_id): Path<i32>,
) -> impl IntoResponse {
    match book_service::by_genre(&db, genre_id).await {
        Ok(books) => Json(json!({ "books": books })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match book_service::get_book(&db, id).await {
        Ok(book) => Json(json!({ "book": book })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_book(
    State(db): State<DatabaseConnection>,
    Json(book): Json<Book>,
) -> impl IntoResponse {
    match book_service::create_book(&db, book).await {
        Ok(book) => (
            StatusCode::CREATED,
            Json(json!({
                "book": book,
                "message": "Book created successfully"
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(book): Json<Book>,
) -> impl IntoResponse {
    match book_service::update_book(&db, id, book).await {
        Ok(book) => Json(json!({
            "book": book,
            "message": "Book updated successfully"
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn replace_authors(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<ReplaceAuthorsRequest>,
) -> impl IntoResponse {
    match book_service::replace_authors(&db, id, payload.author_ids).await {
        Ok(book) => Json(json!({ "book": book })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match book_service::delete_book(&db, id).await {
        Ok(()) => Json(json!({ "message": "Book deleted successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}
