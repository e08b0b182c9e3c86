use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "group")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub group_type: String,
    pub created_by: Uuid,
    pub profile_image_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Creator }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Creator => Entity::belongs_to(user::Entity)
                .from(Column::CreatedBy)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() { return Err(ModelError::Validation("group name required".into())); }
    if name.len() > 128 { return Err(ModelError::Validation("group name too long (<=128)".into())); }
    Ok(())
}

pub fn validate_type(group_type: &str) -> Result<(), ModelError> {
    if group_type.trim().is_empty() { return Err(ModelError::Validation("group type required".into())); }
    if group_type.len() > 32 { return Err(ModelError::Validation("group type too long (<=32)".into())); }
    Ok(())
}

pub fn validate_profile_image_url(url: &str) -> Result<(), ModelError> {
    if url.len() > 512 { return Err(ModelError::Validation("profile_image_url too long (<=512)".into())); }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ModelError::Validation("profile_image_url must start with http(s)".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    created_by: Uuid,
    name: &str,
    group_type: &str,
    profile_image_url: Option<&str>,
) -> Result<Model, ModelError> {
    validate_name(name)?;
    validate_type(group_type)?;
    if let Some(url) = profile_image_url { validate_profile_image_url(url)?; }

    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        group_type: Set(group_type.trim().to_string()),
        created_by: Set(created_by),
        profile_image_url: Set(profile_image_url.map(str::to_string)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
