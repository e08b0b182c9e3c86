use std::fmt;
use std::str::FromStr;

use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use rust_decimal::Decimal;
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{payment, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expense")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub group_id: Uuid,
    pub payer_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    pub description: String,
    pub split_type: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Payer }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Payer => Entity::belongs_to(user::Entity)
                .from(Column::PayerId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// How an expense is divided between group members.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitType {
    Equal,
    Exact,
    Percentage,
}

impl SplitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitType::Equal => "equal",
            SplitType::Exact => "exact",
            SplitType::Percentage => "percentage",
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for SplitType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(SplitType::Equal),
            "exact" => Ok(SplitType::Exact),
            "percentage" => Ok(SplitType::Percentage),
            other => Err(ModelError::Validation(format!("invalid split type '{}'; expected equal, exact or percentage", other))),
        }
    }
}

pub fn validate_description(description: &str) -> Result<(), ModelError> {
    if description.trim().is_empty() { return Err(ModelError::Validation("description required".into())); }
    if description.len() > 255 { return Err(ModelError::Validation("description too long (<=255)".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    group_id: Uuid,
    payer_id: Uuid,
    amount: Decimal,
    description: &str,
    split_type: SplitType,
) -> Result<Model, ModelError> {
    let amount = payment::normalize_amount(amount)?;
    validate_description(description)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        group_id: Set(group_id),
        payer_id: Set(payer_id),
        amount: Set(amount),
        description: Set(description.trim().to_string()),
        split_type: Set(split_type.as_str().to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// All expenses of a group, oldest first.
pub async fn list_for_group<C: ConnectionTrait>(db: &C, group_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::GroupId.eq(group_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}
