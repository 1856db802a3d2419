use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub publication_year: Option<i32>,
    pub page_count: Option<i32>,
    pub isbn: Option<String>,
    pub genre_id: i32,
    /// Maintained by a database trigger; may lag behind the live review set.
    pub review_count: i32,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub is_available: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::genre::Entity",
        from = "Column::GenreId",
        to = "super::genre::Column::Id"
    )]
    Genre,
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Genre.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        super::book_authors::Relation::Author.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::book_authors::Relation::Book.def().rev())
    }
}

impl Related<super::meeting::Entity> for Entity {
    fn to() -> RelationDef {
        super::book_meetings::Relation::Meeting.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::book_meetings::Relation::Book.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses and create/update payloads. `average_rating` is
// derived from the attached reviews and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Option<i32>,
    pub title: String,
    pub publication_year: Option<i32>,
    pub page_count: Option<i32>,
    pub isbn: Option<String>,
    pub genre_id: i32,
    #[serde(default)]
    pub review_count: i32,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub is_available: Option<bool>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<super::genre::Model>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<super::author::Model>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<super::review::Model>,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            title: model.title,
            publication_year: model.publication_year,
            page_count: model.page_count,
            isbn: model.isbn,
            genre_id: model.genre_id,
            review_count: model.review_count,
            description: model.description,
            cover_image_url: model.cover_image_url,
            is_available: Some(model.is_available),
            average_rating: 0.0,
            genre: None,
            authors: Vec::new(),
            reviews: Vec::new(),
        }
    }
}
