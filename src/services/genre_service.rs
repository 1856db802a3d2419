//! Genre service - reference-data CRUD. A genre cannot be removed while
//! books still point at it.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use serde::Deserialize;

use crate::domain::DomainError;
use crate::models::book;
use crate::models::genre::{self, ActiveModel as GenreActiveModel, Entity as GenreEntity};

#[derive(Debug, Clone, Deserialize)]
pub struct GenreInput {
    pub name: String,
    pub description: Option<String>,
}

fn validate(input: &GenreInput) -> Result<(), DomainError> {
    if input.name.trim().is_empty() {
        return Err(DomainError::Validation("name is required".to_string()));
    }
    if input.name.len() > 100 {
        return Err(DomainError::Validation(
            "name must be at most 100 characters".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_genres(db: &DatabaseConnection) -> Result<Vec<genre::Model>, DomainError> {
    Ok(GenreEntity::find().all(db).await?)
}

pub async fn get_genre(db: &DatabaseConnection, id: i32) -> Result<genre::Model, DomainError> {
    GenreEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)
}

pub async fn create_genre(
    db: &DatabaseConnection,
    input: GenreInput,
) -> Result<genre::Model, DomainError> {
    validate(&input)?;

    let new_genre = GenreActiveModel {
        name: Set(input.name),
        description: Set(input.description),
        ..Default::default()
    };

    Ok(new_genre.insert(db).await?)
}

pub async fn update_genre(
    db: &DatabaseConnection,
    id: i32,
    input: GenreInput,
) -> Result<genre::Model, DomainError> {
    validate(&input)?;

    let existing = GenreEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let mut active: GenreActiveModel = existing.into();
    active.name = Set(input.name);
    active.description = Set(input.description);

    Ok(active.update(db).await?)
}

/// Delete a genre. Blocked while any book references it, so books are never
/// silently orphaned.
pub async fn delete_genre(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    GenreEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let in_use = book::Entity::find()
        .filter(book::Column::GenreId.eq(id))
        .count(db)
        .await?;
    if in_use > 0 {
        return Err(DomainError::Integrity(format!(
            "genre {} still has {} books",
            id, in_use
        )));
    }

    GenreEntity::delete_by_id(id).exec(db).await?;
    Ok(())
}
