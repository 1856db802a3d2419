//! Member service - search, CRUD with unique-email enforcement, cascade
//! deletion of reviews and meeting attendance.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::DomainError;
use crate::models::Member;
use crate::models::member::{self, ActiveModel as MemberActiveModel, Column, Entity as MemberEntity};
use crate::models::{meeting, member_meetings, review};

/// Filter parameters for listing members
#[derive(Debug, Default, Clone)]
pub struct MemberFilter {
    pub search: Option<String>,
    pub role: Option<String>,
}

/// List members newest-joined first. The search filter matches name or
/// email substrings; the role filter is an exact match.
pub async fn list_members(
    db: &DatabaseConnection,
    filter: MemberFilter,
) -> Result<Vec<member::Model>, DomainError> {
    let mut query = MemberEntity::find();

    if let Some(search) = &filter.search
        && !search.is_empty()
    {
        let cond = Condition::any()
            .add(Column::Name.contains(search))
            .add(Column::Email.contains(search));
        query = query.filter(cond);
    }

    if let Some(role) = &filter.role
        && !role.is_empty()
    {
        query = query.filter(Column::Role.eq(role));
    }

    Ok(query.order_by_desc(Column::JoinDate).all(db).await?)
}

/// Get a single member with reviews and attended meetings attached.
pub async fn get_member(db: &DatabaseConnection, id: i32) -> Result<Member, DomainError> {
    let model = MemberEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let reviews = model.find_related(review::Entity).all(db).await?;
    let meetings = model.find_related(meeting::Entity).all(db).await?;

    let mut dto = Member::from(model);
    dto.reviews = reviews;
    dto.meetings = meetings;
    Ok(dto)
}

fn validate(member: &Member) -> Result<(), DomainError> {
    if member.name.trim().is_empty() {
        return Err(DomainError::Validation("name is required".to_string()));
    }
    if member.name.len() > 255 {
        return Err(DomainError::Validation(
            "name must be at most 255 characters".to_string(),
        ));
    }
    if member.email.trim().is_empty() {
        return Err(DomainError::Validation("email is required".to_string()));
    }
    if member.email.len() > 255 {
        return Err(DomainError::Validation(
            "email must be at most 255 characters".to_string(),
        ));
    }
    Ok(())
}

/// Create a new member. The join date is stamped server-side.
pub async fn create_member(db: &DatabaseConnection, member: Member) -> Result<Member, DomainError> {
    validate(&member)?;

    let existing = MemberEntity::find()
        .filter(Column::Email.eq(&member.email))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(DomainError::Conflict(format!(
            "email {} is already registered",
            member.email
        )));
    }

    let now = chrono::Utc::now().to_rfc3339();

    let new_member = MemberActiveModel {
        name: Set(member.name.clone()),
        email: Set(member.email.clone()),
        join_date: Set(now.clone()),
        phone: Set(member.phone.clone()),
        role: Set(member.role.clone().unwrap_or_else(|| "Member".to_string())),
        bio: Set(member.bio.clone()),
        is_active: Set(member.is_active.unwrap_or(true)),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_member.insert(db).await?;
    tracing::info!("Created member {} ({})", model.id, model.email);

    Ok(Member::from(model))
}

/// Update an existing member. The join date is kept; every other mutable
/// field is overwritten.
pub async fn update_member(
    db: &DatabaseConnection,
    id: i32,
    member: Member,
) -> Result<Member, DomainError> {
    validate(&member)?;

    let existing = MemberEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let duplicate = MemberEntity::find()
        .filter(Column::Email.eq(&member.email))
        .filter(Column::Id.ne(id))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(DomainError::Conflict(format!(
            "email {} is already registered",
            member.email
        )));
    }

    let mut active: MemberActiveModel = existing.into();
    active.name = Set(member.name);
    active.email = Set(member.email);
    active.phone = Set(member.phone);
    active.role = Set(member.role.unwrap_or_else(|| "Member".to_string()));
    active.bio = Set(member.bio);
    active.is_active = Set(member.is_active.unwrap_or(true));
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let model = active.update(db).await?;
    Ok(Member::from(model))
}

/// Delete a member along with their reviews and meeting attendance rows.
pub async fn delete_member(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    MemberEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let txn = db.begin().await?;

    review::Entity::delete_many()
        .filter(review::Column::MemberId.eq(id))
        .exec(&txn)
        .await?;
    member_meetings::Entity::delete_many()
        .filter(member_meetings::Column::MemberId.eq(id))
        .exec(&txn)
        .await?;
    MemberEntity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!("Deleted member {} and their dependent rows", id);
    Ok(())
}
