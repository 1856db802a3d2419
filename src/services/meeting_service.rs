//! Meeting service - meeting CRUD plus atomic replacement of the book and
//! member association lists.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::DomainError;
use crate::models::Meeting;
use crate::models::meeting::{
    self, ActiveModel as MeetingActiveModel, Column, Entity as MeetingEntity,
};
use crate::models::{book, book_meetings, member, member_meetings};
use crate::services::associations;

async fn with_relations(
    db: &DatabaseConnection,
    model: meeting::Model,
) -> Result<Meeting, DomainError> {
    let books = model.find_related(book::Entity).all(db).await?;
    let members = model.find_related(member::Entity).all(db).await?;

    let mut dto = Meeting::from(model);
    dto.books = books;
    dto.members = members;
    Ok(dto)
}

/// List meetings newest first, with discussed books and attendees attached.
pub async fn list_meetings(db: &DatabaseConnection) -> Result<Vec<Meeting>, DomainError> {
    let models = MeetingEntity::find()
        .order_by_desc(Column::Date)
        .all(db)
        .await?;

    let mut meetings = Vec::with_capacity(models.len());
    for model in models {
        meetings.push(with_relations(db, model).await?);
    }
    Ok(meetings)
}

/// Get a single meeting with both association lists attached.
pub async fn get_meeting(db: &DatabaseConnection, id: i32) -> Result<Meeting, DomainError> {
    let model = MeetingEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    with_relations(db, model).await
}

fn validate(meeting: &Meeting) -> Result<(), DomainError> {
    if meeting.date.trim().is_empty() {
        return Err(DomainError::Validation("date is required".to_string()));
    }
    if let Some(location) = &meeting.location
        && location.len() > 255
    {
        return Err(DomainError::Validation(
            "location must be at most 255 characters".to_string(),
        ));
    }
    Ok(())
}

/// Create a meeting together with its initial book and member lists. The
/// meeting row and both association sets are written in one transaction.
pub async fn create_meeting(
    db: &DatabaseConnection,
    meeting: Meeting,
    book_ids: Vec<i32>,
    member_ids: Vec<i32>,
) -> Result<Meeting, DomainError> {
    validate(&meeting)?;

    let now = chrono::Utc::now().to_rfc3339();

    let txn = db.begin().await?;

    let new_meeting = MeetingActiveModel {
        date: Set(meeting.date.clone()),
        location: Set(meeting.location.clone()),
        notes: Set(meeting.notes.clone()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let model = new_meeting.insert(&txn).await?;

    associations::replace_meeting_books(&txn, model.id, &book_ids).await?;
    associations::replace_meeting_members(&txn, model.id, &member_ids).await?;

    txn.commit().await?;

    tracing::info!("Created meeting {} on {}", model.id, model.date);
    with_relations(db, model).await
}

/// Update a meeting and replace both association lists atomically. On any
/// failure the previous associations remain intact.
pub async fn update_meeting(
    db: &DatabaseConnection,
    id: i32,
    meeting: Meeting,
    book_ids: Vec<i32>,
    member_ids: Vec<i32>,
) -> Result<Meeting, DomainError> {
    validate(&meeting)?;

    let existing = MeetingEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let txn = db.begin().await?;

    let mut active: MeetingActiveModel = existing.into();
    active.date = Set(meeting.date);
    active.location = Set(meeting.location);
    active.notes = Set(meeting.notes);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());
    let model = active.update(&txn).await?;

    associations::replace_meeting_books(&txn, id, &book_ids).await?;
    associations::replace_meeting_members(&txn, id, &member_ids).await?;

    txn.commit().await?;

    with_relations(db, model).await
}

/// Replace the meeting's book and member lists without touching its fields.
pub async fn replace_associations(
    db: &DatabaseConnection,
    id: i32,
    book_ids: Vec<i32>,
    member_ids: Vec<i32>,
) -> Result<Meeting, DomainError> {
    let model = MeetingEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let txn = db.begin().await?;
    associations::replace_meeting_books(&txn, id, &book_ids).await?;
    associations::replace_meeting_members(&txn, id, &member_ids).await?;
    txn.commit().await?;

    with_relations(db, model).await
}

/// Delete a meeting; both junction tables are cleared first.
pub async fn delete_meeting(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    MeetingEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let txn = db.begin().await?;

    book_meetings::Entity::delete_many()
        .filter(book_meetings::Column::MeetingId.eq(id))
        .exec(&txn)
        .await?;
    member_meetings::Entity::delete_many()
        .filter(member_meetings::Column::MeetingId.eq(id))
        .exec(&txn)
        .await?;
    MeetingEntity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!("Deleted meeting {} and its association rows", id);
    Ok(())
}
