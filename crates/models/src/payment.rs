use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub group_id: Uuid,
    pub payer_id: Uuid,
    pub payee_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Payer, Payee }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Payer => Entity::belongs_to(user::Entity)
                .from(Column::PayerId)
                .to(user::Column::Id)
                .into(),
            Relation::Payee => Entity::belongs_to(user::Entity)
                .from(Column::PayeeId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Lifecycle state of a payment. Payments are recorded as `Pending`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
        }
    }
}

/// Money amounts must be positive; they are stored with two decimal places.
pub fn normalize_amount(amount: Decimal) -> Result<Decimal, ModelError> {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded <= Decimal::ZERO {
        return Err(ModelError::Validation("amount must be greater than zero".into()));
    }
    if rounded >= Decimal::new(10_000_000_000, 0) {
        return Err(ModelError::Validation("amount too large".into()));
    }
    Ok(rounded)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    group_id: Uuid,
    payer_id: Uuid,
    payee_id: Uuid,
    amount: Decimal,
    status: PaymentStatus,
) -> Result<Model, ModelError> {
    if payer_id == payee_id {
        return Err(ModelError::Validation("payer and payee must differ".into()));
    }
    let amount = normalize_amount(amount)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        group_id: Set(group_id),
        payer_id: Set(payer_id),
        payee_id: Set(payee_id),
        amount: Set(amount),
        status: Set(status.as_str().to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// All payments of a group, newest first.
pub async fn list_for_group<C: ConnectionTrait>(db: &C, group_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::GroupId.eq(group_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}
