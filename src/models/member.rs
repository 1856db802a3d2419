use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub join_date: String,
    pub phone: Option<String>,
    #[sea_orm(default_value = "Member")]
    pub role: String,
    pub bio: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::meeting::Entity> for Entity {
    fn to() -> RelationDef {
        super::member_meetings::Relation::Meeting.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::member_meetings::Relation::Member.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses and create/update payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<super::review::Model>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meetings: Vec<super::meeting::Model>,
}

impl From<Model> for Member {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            email: model.email,
            join_date: Some(model.join_date),
            phone: model.phone,
            role: Some(model.role),
            bio: model.bio,
            is_active: Some(model.is_active),
            reviews: Vec::new(),
            meetings: Vec::new(),
        }
    }
}
