//! Author service - reference-data CRUD. Author deletion takes its junction
//! rows with it; the books themselves are untouched.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::Deserialize;

use crate::domain::DomainError;
use crate::models::author::{self, ActiveModel as AuthorActiveModel, Entity as AuthorEntity};
use crate::models::book_authors;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorInput {
    pub name: String,
    pub birth_date: Option<String>,
    pub nationality: Option<String>,
}

fn validate(input: &AuthorInput) -> Result<(), DomainError> {
    if input.name.trim().is_empty() {
        return Err(DomainError::Validation("name is required".to_string()));
    }
    if input.name.len() > 255 {
        return Err(DomainError::Validation(
            "name must be at most 255 characters".to_string(),
        ));
    }
    if let Some(nationality) = &input.nationality
        && nationality.len() > 100
    {
        return Err(DomainError::Validation(
            "nationality must be at most 100 characters".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_authors(db: &DatabaseConnection) -> Result<Vec<author::Model>, DomainError> {
    Ok(AuthorEntity::find().all(db).await?)
}

pub async fn get_author(db: &DatabaseConnection, id: i32) -> Result<author::Model, DomainError> {
    AuthorEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)
}

pub async fn create_author(
    db: &DatabaseConnection,
    input: AuthorInput,
) -> Result<author::Model, DomainError> {
    validate(&input)?;

    let now = chrono::Utc::now().to_rfc3339();

    let new_author = AuthorActiveModel {
        name: Set(input.name),
        birth_date: Set(input.birth_date),
        nationality: Set(input.nationality),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(new_author.insert(db).await?)
}

pub async fn update_author(
    db: &DatabaseConnection,
    id: i32,
    input: AuthorInput,
) -> Result<author::Model, DomainError> {
    validate(&input)?;

    let existing = AuthorEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let mut active: AuthorActiveModel = existing.into();
    active.name = Set(input.name);
    active.birth_date = Set(input.birth_date);
    active.nationality = Set(input.nationality);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    Ok(active.update(db).await?)
}

pub async fn delete_author(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    AuthorEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let txn = db.begin().await?;

    book_authors::Entity::delete_many()
        .filter(book_authors::Column::AuthorId.eq(id))
        .exec(&txn)
        .await?;
    AuthorEntity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}
