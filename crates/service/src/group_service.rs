use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use models::{group, group_member};
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Which side of the balance the caller asks for when listing groups.
///
/// Balances are not computed, so every variant selects the same groups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GroupFilter {
    All,
    Owe,
    #[default]
    Owed,
}

impl GroupFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupFilter::All => "all",
            GroupFilter::Owe => "owe",
            GroupFilter::Owed => "owed",
        }
    }
}

impl fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for GroupFilter {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(GroupFilter::All),
            "owe" => Ok(GroupFilter::Owe),
            "owed" => Ok(GroupFilter::Owed),
            other => Err(ServiceError::Validation(format!("invalid filter '{}'; expected all, owe or owed", other))),
        }
    }
}

/// Input for a new group.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub name: String,
    pub group_type: String,
    pub profile_image_url: Option<String>,
}

/// Partial update; `None` and empty strings leave the field untouched.
#[derive(Debug, Clone, Default)]
pub struct GroupUpdate {
    pub name: Option<String>,
    pub group_type: Option<String>,
    pub profile_image_url: Option<String>,
}

/// One row of a user's group list: the membership joined with its group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMembership {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub group_type: String,
    pub profile_image_url: Option<String>,
    pub is_admin: bool,
    pub joined_at: sea_orm::prelude::DateTimeWithTimeZone,
}

impl GroupMembership {
    fn join(member: group_member::Model, group: group::Model) -> Self {
        Self {
            group_id: member.group_id,
            user_id: member.user_id,
            name: group.name,
            group_type: group.group_type,
            profile_image_url: group.profile_image_url,
            is_admin: member.is_admin,
            joined_at: member.joined_at,
        }
    }
}

/// Create a group owned by `user_id` and enrol the creator as its admin.
///
/// Both rows are written in one transaction.
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_group(db: &DatabaseConnection, user_id: Uuid, input: NewGroup) -> Result<group::Model, ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::db)?;
    let created = async {
        let g = group::create(&txn, user_id, &input.name, &input.group_type, input.profile_image_url.as_deref()).await?;
        group_member::create(&txn, g.id, user_id, true).await?;
        Ok::<_, ServiceError>(g)
    }
    .await;

    match created {
        Ok(g) => {
            txn.commit().await.map_err(ServiceError::db)?;
            info!(group_id = %g.id, "group_created");
            Ok(g)
        }
        Err(e) => {
            txn.rollback().await.map_err(ServiceError::db)?;
            Err(e)
        }
    }
}

/// Page through the caller's memberships and resolve each group.
///
/// Memberships whose group row is gone are skipped, as are rows whose lookup fails.
#[instrument(skip(db))]
pub async fn list_groups(
    db: &DatabaseConnection,
    user_id: Uuid,
    page: Pagination,
    filter: GroupFilter,
) -> Result<Vec<GroupMembership>, ServiceError> {
    let (offset, limit) = page.normalize();
    let memberships = group_member::list_for_user(db, user_id, offset, limit).await.map_err(|e| {
        error!(error = %e, "membership query failed");
        ServiceError::GroupsUnavailable
    })?;

    let mut out = Vec::with_capacity(memberships.len());
    for m in memberships {
        match group::find(db, m.group_id).await {
            Ok(Some(g)) => out.push(GroupMembership::join(m, g)),
            Ok(None) => warn!(membership_id = %m.id, group_id = %m.group_id, "group not found for membership, skipping"),
            Err(e) => error!(membership_id = %m.id, group_id = %m.group_id, error = %e, "group lookup failed, skipping"),
        }
    }
    Ok(out)
}

/// Get a group by id, or `GroupNotFound`.
pub async fn get_group<C: sea_orm::ConnectionTrait>(db: &C, group_id: Uuid) -> Result<group::Model, ServiceError> {
    group::find(db, group_id).await?.ok_or(ServiceError::GroupNotFound)
}

/// Apply the non-empty fields of `changes` and bump `updated_at`.
#[instrument(skip(db, changes))]
pub async fn update_group(
    db: &DatabaseConnection,
    user_id: Uuid,
    group_id: Uuid,
    changes: GroupUpdate,
) -> Result<group::Model, ServiceError> {
    let mut am: group::ActiveModel = get_group(db, group_id).await?.into();

    if let Some(name) = non_empty(changes.name) {
        group::validate_name(&name)?;
        am.name = Set(name);
    }
    if let Some(group_type) = non_empty(changes.group_type) {
        group::validate_type(&group_type)?;
        am.group_type = Set(group_type);
    }
    if let Some(url) = non_empty(changes.profile_image_url) {
        group::validate_profile_image_url(&url)?;
        am.profile_image_url = Set(Some(url));
    }
    am.updated_at = Set(Utc::now().into());

    let updated = am.update(db).await.map_err(ServiceError::db)?;
    info!(group_id = %updated.id, "group_updated");
    Ok(updated)
}

/// Delete the group row. Memberships, payments and expenses stay behind.
#[instrument(skip(db))]
pub async fn delete_group(db: &DatabaseConnection, user_id: Uuid, group_id: Uuid) -> Result<(), ServiceError> {
    let g = get_group(db, group_id).await?;
    group::Entity::delete_by_id(g.id).exec(db).await.map_err(ServiceError::db)?;
    info!(group_id = %g.id, "group_deleted");
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
