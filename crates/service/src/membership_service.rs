use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use models::errors::ModelError;
use models::group_member;
use crate::errors::ServiceError;
use crate::group_service::get_group;
use crate::user_service::get_user;

/// Add `user_id` to a group.
///
/// The existence checks and the insert share a transaction; the unique
/// (group_id, user_id) index turns a concurrent duplicate into `AlreadyMember` too.
#[instrument(skip(db))]
pub async fn add_member(
    db: &DatabaseConnection,
    group_id: Uuid,
    current_user_id: Uuid,
    user_id: Uuid,
    is_admin: bool,
) -> Result<group_member::Model, ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::db)?;
    match insert_member(&txn, group_id, user_id, is_admin).await {
        Ok(m) => {
            txn.commit().await.map_err(ServiceError::db)?;
            info!(group_id = %group_id, user_id = %user_id, added_by = %current_user_id, is_admin, "member_added");
            Ok(m)
        }
        Err(e) => {
            txn.rollback().await.map_err(ServiceError::db)?;
            Err(e)
        }
    }
}

async fn insert_member(
    txn: &DatabaseTransaction,
    group_id: Uuid,
    user_id: Uuid,
    is_admin: bool,
) -> Result<group_member::Model, ServiceError> {
    get_group(txn, group_id).await?;
    get_user(txn, user_id).await?;
    if group_member::find(txn, group_id, user_id).await?.is_some() {
        return Err(ServiceError::AlreadyMember);
    }
    match group_member::create(txn, group_id, user_id, is_admin).await {
        Err(ModelError::Conflict(_)) => Err(ServiceError::AlreadyMember),
        other => Ok(other?),
    }
}

/// Remove the caller's own membership.
#[instrument(skip(db))]
pub async fn leave_group(db: &DatabaseConnection, user_id: Uuid, group_id: Uuid) -> Result<(), ServiceError> {
    let membership = group_member::find(db, group_id, user_id).await?.ok_or(ServiceError::NotMember)?;
    group_member::delete(db, membership.id).await?;
    info!(group_id = %group_id, user_id = %user_id, "member_left");
    Ok(())
}

/// Remove another user's membership. The acting user's role is looked up for the log only.
#[instrument(skip(db))]
pub async fn remove_user(
    db: &DatabaseConnection,
    acting_user_id: Uuid,
    group_id: Uuid,
    target_user_id: Uuid,
) -> Result<(), ServiceError> {
    get_group(db, group_id).await?;
    let acting = group_member::find(db, group_id, acting_user_id).await?;
    debug!(acting_is_member = acting.is_some(), acting_is_admin = acting.as_ref().map(|m| m.is_admin).unwrap_or(false));

    let target = group_member::find(db, group_id, target_user_id).await?.ok_or(ServiceError::NotInGroup)?;
    group_member::delete(db, target.id).await?;
    info!(group_id = %group_id, user_id = %target_user_id, removed_by = %acting_user_id, "member_removed");
    Ok(())
}

/// All memberships of a group, earliest joiner first.
pub async fn list_members(db: &DatabaseConnection, group_id: Uuid) -> Result<Vec<group_member::Model>, ServiceError> {
    get_group(db, group_id).await?;
    Ok(group_member::list_for_group(db, group_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group_service::{create_group, NewGroup};
    use crate::test_support::{get_db, seed_user};

    async fn group_of(db: &DatabaseConnection, owner: Uuid) -> Result<models::group::Model, anyhow::Error> {
        let input = NewGroup { name: "Flat".into(), group_type: "home".into(), profile_image_url: None };
        Ok(create_group(db, owner, input).await?)
    }

    #[tokio::test]
    async fn add_member_then_duplicate_fails() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let owner = seed_user(&db, "Owner").await?;
        let guest = seed_user(&db, "Guest").await?;
        let g = group_of(&db, owner.id).await?;

        let m = add_member(&db, g.id, owner.id, guest.id, false).await?;
        assert_eq!(m.group_id, g.id);
        assert_eq!(m.user_id, guest.id);
        assert!(!m.is_admin);

        let again = add_member(&db, g.id, owner.id, guest.id, false).await;
        assert!(matches!(again, Err(ServiceError::AlreadyMember)));
        assert_eq!(list_members(&db, g.id).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn add_member_requires_group_and_user() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let owner = seed_user(&db, "Owner").await?;
        let g = group_of(&db, owner.id).await?;

        let no_group = add_member(&db, Uuid::new_v4(), owner.id, owner.id, false).await;
        assert!(matches!(no_group, Err(ServiceError::GroupNotFound)));
        let no_user = add_member(&db, g.id, owner.id, Uuid::new_v4(), false).await;
        assert!(matches!(no_user, Err(ServiceError::UserNotFound)));
        Ok(())
    }

    #[tokio::test]
    async fn leave_requires_membership() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let owner = seed_user(&db, "Owner").await?;
        let stranger = seed_user(&db, "Stranger").await?;
        let g = group_of(&db, owner.id).await?;

        assert!(matches!(leave_group(&db, stranger.id, g.id).await, Err(ServiceError::NotMember)));
        leave_group(&db, owner.id, g.id).await?;
        assert!(group_member::find(&db, g.id, owner.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn remove_user_requires_target_membership() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let owner = seed_user(&db, "Owner").await?;
        let guest = seed_user(&db, "Guest").await?;
        let g = group_of(&db, owner.id).await?;

        let missing = remove_user(&db, owner.id, g.id, guest.id).await;
        assert!(matches!(missing, Err(ServiceError::NotInGroup)));

        add_member(&db, g.id, owner.id, guest.id, false).await?;
        remove_user(&db, owner.id, g.id, guest.id).await?;
        assert_eq!(list_members(&db, g.id).await?.len(), 1);

        let no_group = remove_user(&db, owner.id, Uuid::new_v4(), guest.id).await;
        assert!(matches!(no_group, Err(ServiceError::GroupNotFound)));
        Ok(())
    }
}
