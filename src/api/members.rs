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
use crate::models::Member;
use crate::services::member_service::{self, MemberFilter};

#[derive(Debug, Deserialize)]
pub struct MembersQuery {
    pub search: Option<String>,
    pub role: Option<String>,
}

pub async fn list_members(
    State(db): State<DatabaseConnection>,
    Query(params): Query<MembersQuery>,
) -> impl IntoResponse {
    let filter = MemberFilter {
        search: params.search,
        role: params.role,
    };

    match member_service::list_members(&db, filter).await {
        Ok(members) => {
            let total = members.len();
            Json(json!({ "members": members, "total": total })).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn get_member(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match member_service::get_member(&db, id).await {
        Ok(member) => Json(json!({ "member": member })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_member(
    State(db): State<DatabaseConnection>,
    Json(member): Json<Member>,
) -> impl IntoResponse {
    match member_service::create_member(&db, member).await {
        Ok(member) => (
            StatusCode::CREATED,
            Json(json!({
                "member": member,
                "message": "Member created successfully"
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_member(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(member): Json<Member>,
) -> impl IntoResponse {
    match member_service::update_member(&db, id, member).await {
        Ok(member) => Json(json!({
            "member": member,
            "message": "Member updated successfully"
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_member(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match member_service::delete_member(&db, id).await {
        Ok(()) => Json(json!({ "message": "Member deleted successfully" })).into_response(),
        Err(e) => error_response(e),
    }
}
