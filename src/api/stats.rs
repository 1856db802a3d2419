use axum::{Json, extract::State, response::IntoResponse};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::api::error_response;
use crate::services::stats_service;

pub async fn dashboard(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match stats_service::dashboard(&db).await {
        Ok(stats) => Json(json!({ "statistics": stats })).into_response(),
        Err(e) => error_response(e),
    }
}
