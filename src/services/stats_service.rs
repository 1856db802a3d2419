//! Dashboard aggregates: catalog totals, the highest-rated books and the
//! most active reviewers.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;

use crate::domain::DomainError;
use crate::models::Book;
use crate::models::{book, meeting, member, review};
use crate::services::book_service;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_books: u64,
    pub total_members: u64,
    pub total_meetings: u64,
    pub total_reviews: u64,
    pub top_rated_books: Vec<Book>,
    pub active_members: Vec<ActiveMember>,
}

#[derive(Debug, Serialize)]
pub struct ActiveMember {
    pub member: member::Model,
    pub review_count: u64,
}

/// Collect the dashboard numbers. Member totals count active members only.
pub async fn dashboard(db: &DatabaseConnection) -> Result<DashboardStats, DomainError> {
    let total_books = book::Entity::find().count(db).await?;
    let total_members = member::Entity::find()
        .filter(member::Column::IsActive.eq(true))
        .count(db)
        .await?;
    let total_meetings = meeting::Entity::find().count(db).await?;
    let total_reviews = review::Entity::find().count(db).await?;

    let top_rated_books = book_service::top_rated(db, Some(5)).await?;

    let members = member::Entity::find()
        .filter(member::Column::IsActive.eq(true))
        .all(db)
        .await?;

    let mut active_members = Vec::with_capacity(members.len());
    for member in members {
        let review_count = member.find_related(review::Entity).count(db).await?;
        active_members.push(ActiveMember {
            member,
            review_count,
        });
    }
    active_members.sort_by(|a, b| b.review_count.cmp(&a.review_count));
    active_members.truncate(5);

    Ok(DashboardStats {
        total_books,
        total_members,
        total_meetings,
        total_reviews,
        top_rated_books,
        active_members,
    })
}
