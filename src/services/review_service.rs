//! Review service - create/update/delete with rating range validation.
//!
//! Mutations return the parent book id so the caller can go back to the
//! book context.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};

use crate::domain::DomainError;
use crate::models::Review;
use crate::models::review::{ActiveModel as ReviewActiveModel, Entity as ReviewEntity};
use crate::models::{book, member};

fn validate_rating(rating: i32) -> Result<(), DomainError> {
    if !(1..=5).contains(&rating) {
        return Err(DomainError::Validation(
            "rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

/// Create a review for a book. The posting date is stamped server-side.
pub async fn create_review(db: &DatabaseConnection, review: Review) -> Result<Review, DomainError> {
    validate_rating(review.rating)?;

    book::Entity::find_by_id(review.book_id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::Integrity(format!("book {} does not exist", review.book_id)))?;
    member::Entity::find_by_id(review.member_id)
        .one(db)
        .await?
        .ok_or_else(|| {
            DomainError::Integrity(format!("member {} does not exist", review.member_id))
        })?;

    let new_review = ReviewActiveModel {
        rating: Set(review.rating),
        comment: Set(review.comment.clone()),
        date_posted: Set(chrono::Utc::now().to_rfc3339()),
        book_id: Set(review.book_id),
        member_id: Set(review.member_id),
        ..Default::default()
    };

    let model = new_review.insert(db).await?;
    tracing::info!("Created review {} for book {}", model.id, model.book_id);

    Ok(Review::from(model))
}

/// Update a review's rating and comment. Book and member stay fixed.
pub async fn update_review(
    db: &DatabaseConnection,
    id: i32,
    rating: i32,
    comment: Option<String>,
) -> Result<Review, DomainError> {
    validate_rating(rating)?;

    let existing = ReviewEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let mut active: ReviewActiveModel = existing.into();
    active.rating = Set(rating);
    active.comment = Set(comment);

    let model = active.update(db).await?;
    Ok(Review::from(model))
}

/// Delete a review, returning the id of the book it belonged to.
pub async fn delete_review(db: &DatabaseConnection, id: i32) -> Result<i32, DomainError> {
    let existing = ReviewEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let book_id = existing.book_id;
    existing.delete(db).await?;

    Ok(book_id)
}
