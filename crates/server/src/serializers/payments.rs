use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use models::payment;

#[derive(Debug, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub id: Uuid,
    pub group_id: Uuid,
    pub payer_id: Uuid,
    pub payee_id: Uuid,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub status: String,
}

pub fn payment(p: &payment::Model) -> PaymentView {
    PaymentView {
        id: p.id,
        group_id: p.group_id,
        payer_id: p.payer_id,
        payee_id: p.payee_id,
        amount: p.amount,
        status: p.status.clone(),
    }
}

pub fn get_all_payments_for_group(rows: &[payment::Model]) -> Vec<PaymentView> {
    rows.iter().map(payment).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn payment_fields_are_camel_case() {
        let p = payment::Model {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            payer_id: Uuid::new_v4(),
            payee_id: Uuid::new_v4(),
            amount: Decimal::new(1250, 2),
            status: "pending".into(),
            created_at: Utc::now().fixed_offset(),
        };
        let v = serde_json::to_value(get_all_payments_for_group(&[p.clone()])).unwrap();
        assert_eq!(v[0]["payeeId"], p.payee_id.to_string());
        assert_eq!(v[0]["amount"].as_f64(), Some(12.5));
        assert_eq!(v[0]["status"], "pending");
        assert!(v[0].get("createdAt").is_none());
    }
}
