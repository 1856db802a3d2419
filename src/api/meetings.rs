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
use crate::models::Meeting;
use crate::services::meeting_service;

#[derive(Debug, Deserialize)]
pub struct MeetingRequest {
    pub date: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub book_ids: Vec<i32>,
    #[serde(default)]
    pub member_ids: Vec<i32>,
}

#[derive(Debug, Deserialize)]
pub struct AssociationsRequest {
    #[serde(default)]
    pub book_ids: Vec<i32>,
    #[serde(default)]
    pub member_ids: Vec<i32>,
}

impl MeetingRequest {
    fn meeting(&self) -> Meeting {
        Meeting {
            id: None,
            date: self.date.clone(),
            location: self.location.clone(),
            notes: self.notes.clone(),
            books: Vec::new(),
            members: Vec::new(),
        }
    }
}

pub async fn list_meetings(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match meeting_service::list_meetings(&db).await {
        Ok(meetings) => {
            let total = meetings.len();
            Json(json!({ "meetings": meetings, "total": total })).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn get_meeting(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match meeting_service::get_meeting(&db, id).await {
        Ok(meeting) => Json(json!({ "meeting": meeting })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_meeting(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<MeetingRequest>,
) -> impl IntoResponse {
    let meeting = payload.meeting();
    match meeting_service::create_meeting(&db, meeting, payload.book_ids, payload.member_ids).await
    {
        Ok(meeting) => (
            StatusCode::CREATED,
            Json(json!({
                "meeting": meeting,
                "message": "Meeting created successfully"
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_meeting(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<MeetingRequest>,
) -> impl IntoResponse {
    let meeting = payload.meeting();
    match meeting_service::update_meeting(&db, id, meeting, payload.book_ids, payload.member_ids)
        .await
    {
        Ok(meeting) => Json(json!({
            "meeting": meeting,
            "message": "Meeting updated successfully"
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn replace_associations(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<AssociationsRequest>,
) -> impl IntoResponse {
    match meeting_service::replace_associations(&db, id, payload.book_ids, payload.member_ids).await
    {
        Ok(meeting) => Json(json!({ "meeting": meeting })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_meeting(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match meeting_service::delete_meeting(&db, id).await {
        Ok(()) => Json(json!({ "message": "Meeting deleted successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}
