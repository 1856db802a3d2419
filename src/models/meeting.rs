use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meetings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        super::book_meetings::Relation::Book.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::book_meetings::Relation::Meeting.def().rev())
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        super::member_meetings::Relation::Member.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::member_meetings::Relation::Meeting.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO with both association lists attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: Option<i32>,
    pub date: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub books: Vec<super::book::Model>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<super::member::Model>,
}

impl From<Model> for Meeting {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            date: model.date,
            location: model.location,
            notes: model.notes,
            books: Vec::new(),
            members: Vec::new(),
        }
    }
}
