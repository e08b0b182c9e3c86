use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};
use uuid::Uuid;

use models::group_member;
use models::payment::{self, PaymentStatus};
use crate::errors::ServiceError;
use crate::group_service::get_group;

/// Payments recorded in a group, newest first.
pub async fn list_payments(db: &DatabaseConnection, group_id: Uuid) -> Result<Vec<payment::Model>, ServiceError> {
    Ok(payment::list_for_group(db, group_id).await?)
}

/// Record a pending payment from `payer_id` to `payee_id`; both must belong to the group.
#[instrument(skip(db))]
pub async fn record_payment(
    db: &DatabaseConnection,
    group_id: Uuid,
    payer_id: Uuid,
    payee_id: Uuid,
    amount: Decimal,
) -> Result<payment::Model, ServiceError> {
    if payer_id == payee_id {
        return Err(ServiceError::Validation("payer and payee must differ".into()));
    }
    let amount = payment::normalize_amount(amount)?;
    get_group(db, group_id).await?;
    group_member::find(db, group_id, payer_id).await?.ok_or(ServiceError::NotMember)?;
    group_member::find(db, group_id, payee_id).await?.ok_or(ServiceError::NotInGroup)?;

    let created = payment::create(db, group_id, payer_id, payee_id, amount, PaymentStatus::Pending).await?;
    info!(payment_id = %created.id, group_id = %group_id, %amount, "payment_recorded");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group_service::{create_group, NewGroup};
    use crate::membership_service::add_member;
    use crate::test_support::{get_db, seed_user};

    #[tokio::test]
    async fn record_and_list_newest_first() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = seed_user(&db, "Ann").await?;
        let b = seed_user(&db, "Ben").await?;
        let g = create_group(&db, a.id, NewGroup { name: "Rent".into(), group_type: "home".into(), profile_image_url: None }).await?;
        add_member(&db, g.id, a.id, b.id, false).await?;

        let first = record_payment(&db, g.id, a.id, b.id, Decimal::new(2025, 2)).await?;
        assert_eq!(first.status, "pending");
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = record_payment(&db, g.id, b.id, a.id, Decimal::new(550, 2)).await?;

        let listed = list_payments(&db, g.id).await?;
        assert_eq!(listed.iter().map(|p| p.id).collect::<Vec<_>>(), vec![second.id, first.id]);
        assert_eq!(listed[0].amount, Decimal::new(550, 2));
        Ok(())
    }

    #[tokio::test]
    async fn record_checks_members_and_amount() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = seed_user(&db, "Ann").await?;
        let outsider = seed_user(&db, "Out").await?;
        let g = create_group(&db, a.id, NewGroup { name: "Rent".into(), group_type: "home".into(), profile_image_url: None }).await?;

        let to_outsider = record_payment(&db, g.id, a.id, outsider.id, Decimal::ONE).await;
        assert!(matches!(to_outsider, Err(ServiceError::NotInGroup)));
        let from_outsider = record_payment(&db, g.id, outsider.id, a.id, Decimal::ONE).await;
        assert!(matches!(from_outsider, Err(ServiceError::NotMember)));
        let zero = record_payment(&db, g.id, a.id, outsider.id, Decimal::ZERO).await;
        assert!(matches!(zero, Err(ServiceError::Validation(_))));
        let to_self = record_payment(&db, g.id, a.id, a.id, Decimal::ONE).await;
        assert!(matches!(to_self, Err(ServiceError::Validation(_))));

        assert!(list_payments(&db, g.id).await?.is_empty());
        Ok(())
    }
}
