//! Replace-all-children maintenance for the three junction tables.
//!
//! Each helper removes every existing row for the parent and inserts one row
//! per referenced id. Callers run these inside a transaction so an edit
//! either fully replaces the association set or leaves the old rows intact.
//! Unknown ids are rejected before anything is deleted.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::domain::DomainError;
use crate::models::{author, book, book_authors, book_meetings, member, member_meetings};

pub async fn replace_book_authors<C: ConnectionTrait>(
    conn: &C,
    book_id: i32,
    author_ids: &[i32],
) -> Result<(), DomainError> {
    let ids = dedup(author_ids);

    let found = author::Entity::find()
        .filter(author::Column::Id.is_in(ids.clone()))
        .count(conn)
        .await?;
    if found != ids.len() as u64 {
        return Err(DomainError::Integrity(
            "author list contains an unknown id".to_string(),
        ));
    }

    book_authors::Entity::delete_many()
        .filter(book_authors::Column::BookId.eq(book_id))
        .exec(conn)
        .await?;

    if !ids.is_empty() {
        let rows: Vec<book_authors::ActiveModel> = ids
            .into_iter()
            .map(|author_id| book_authors::ActiveModel {
                book_id: Set(book_id),
                author_id: Set(author_id),
            })
            .collect();
        book_authors::Entity::insert_many(rows).exec(conn).await?;
    }

    Ok(())
}

pub async fn replace_meeting_books<C: ConnectionTrait>(
    conn: &C,
    meeting_id: i32,
    book_ids: &[i32],
) -> Result<(), DomainError> {
    let ids = dedup(book_ids);

    let found = book::Entity::find()
        .filter(book::Column::Id.is_in(ids.clone()))
        .count(conn)
        .await?;
    if found != ids.len() as u64 {
        return Err(DomainError::Integrity(
            "book list contains an unknown id".to_string(),
        ));
    }

    book_meetings::Entity::delete_many()
        .filter(book_meetings::Column::MeetingId.eq(meeting_id))
        .exec(conn)
        .await?;

    if !ids.is_empty() {
        let rows: Vec<book_meetings::ActiveModel> = ids
            .into_iter()
            .map(|book_id| book_meetings::ActiveModel {
                book_id: Set(book_id),
                meeting_id: Set(meeting_id),
            })
            .collect();
        book_meetings::Entity::insert_many(rows).exec(conn).await?;
    }

    Ok(())
}

pub async fn replace_meeting_members<C: ConnectionTrait>(
    conn: &C,
    meeting_id: i32,
    member_ids: &[i32],
) -> Result<(), DomainError> {
    let ids = dedup(member_ids);

    let found = member::Entity::find()
        .filter(member::Column::Id.is_in(ids.clone()))
        .count(conn)
        .await?;
    if found != ids.len() as u64 {
        return Err(DomainError::Integrity(
            "member list contains an unknown id".to_string(),
        ));
    }

    member_meetings::Entity::delete_many()
        .filter(member_meetings::Column::MeetingId.eq(meeting_id))
        .exec(conn)
        .await?;

    if !ids.is_empty() {
        let rows: Vec<member_meetings::ActiveModel> = ids
            .into_iter()
            .map(|member_id| member_meetings::ActiveModel {
                member_id: Set(member_id),
                meeting_id: Set(meeting_id),
            })
            .collect();
        member_meetings::Entity::insert_many(rows).exec(conn).await?;
    }

    Ok(())
}

// The composite primary keys reject duplicate pairs, so repeated ids in the
// input collapse to one row.
fn dedup(ids: &[i32]) -> Vec<i32> {
    let mut out = Vec::with_capacity(ids.len());
    for &id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
