use uuid::Uuid;
use sea_orm::{ConnectionTrait, EntityTrait};

use models::user;
use crate::errors::ServiceError;

/// Get a user by id, or `UserNotFound`.
pub async fn get_user<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or(ServiceError::UserNotFound)
}
