use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub date_posted: String,
    pub book_id: i32,
    pub member_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id"
    )]
    Book,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id"
    )]
    Member,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for create/update payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Option<i32>,
    pub rating: i32,
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
    pub book_id: i32,
    pub member_id: i32,
}

impl From<Model> for Review {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            rating: model.rating,
            comment: model.comment,
            date_posted: Some(model.date_posted),
            book_id: model.book_id,
            member_id: model.member_id,
        }
    }
}
