use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use models::expense;

#[derive(Debug, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseView {
    pub id: Uuid,
    pub group_id: Uuid,
    pub payer_id: Uuid,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub description: String,
    pub split_type: String,
    pub created_at: DateTime<FixedOffset>,
}

pub fn expense(e: &expense::Model) -> ExpenseView {
    ExpenseView {
        id: e.id,
        group_id: e.group_id,
        payer_id: e.payer_id,
        amount: e.amount,
        description: e.description.clone(),
        split_type: e.split_type.clone(),
        created_at: e.created_at,
    }
}

pub fn expenses(rows: &[expense::Model]) -> Vec<ExpenseView> {
    rows.iter().map(expense).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn expense_fields_are_camel_case() {
        let e = expense::Model {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            payer_id: Uuid::new_v4(),
            amount: Decimal::new(4200, 2),
            description: "Pizza".into(),
            split_type: "equal".into(),
            created_at: Utc::now().fixed_offset(),
        };
        let v = serde_json::to_value(expense(&e)).unwrap();
        assert_eq!(v["splitType"], "equal");
        assert_eq!(v["payerId"], e.payer_id.to_string());
        assert_eq!(v["amount"].as_f64(), Some(42.0));
        assert!(v["createdAt"].is_string());
    }
}
