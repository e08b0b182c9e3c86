use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};
use uuid::Uuid;

use models::expense::{self, SplitType};
use models::group_member;
use crate::errors::ServiceError;
use crate::group_service::get_group;

/// Input for a new expense, as received from the API.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub group_id: Uuid,
    pub amount: Decimal,
    pub description: String,
    pub split_type: String,
}

/// Record an expense paid by `payer_id` in a group they belong to.
#[instrument(skip(db, input), fields(group_id = %input.group_id))]
pub async fn create_expense(db: &DatabaseConnection, payer_id: Uuid, input: NewExpense) -> Result<expense::Model, ServiceError> {
    let split_type: SplitType = input.split_type.parse()?;
    get_group(db, input.group_id).await?;
    group_member::find(db, input.group_id, payer_id).await?.ok_or(ServiceError::NotMember)?;

    let created = expense::create(db, input.group_id, payer_id, input.amount, &input.description, split_type).await?;
    info!(expense_id = %created.id, amount = %created.amount, "expense_created");
    Ok(created)
}

/// Expenses of a group, oldest first.
pub async fn list_expenses(db: &DatabaseConnection, group_id: Uuid) -> Result<Vec<expense::Model>, ServiceError> {
    Ok(expense::list_for_group(db, group_id).await?)
}
