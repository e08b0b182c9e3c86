use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use service::expense_service::{self, NewExpense};

use crate::errors::ApiError;
use crate::extract::{Json, Query};
use crate::routes::auth::CurrentUser;
use crate::serializers::expenses as ser;
use crate::state::ServerState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub group_id: Uuid,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub split_type: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListExpensesQuery {
    /// Group to list; may also be sent as `{"groupId": ...}` in the body
    pub group_id: Option<Uuid>,
}

#[utoipa::path(
    post, path = "/expenses", tag = "expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Created", body = ser::ExpenseView),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Group not found")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(CurrentUser(payer_id)): Extension<CurrentUser>,
    Json(input): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ser::ExpenseView>), ApiError> {
    let input = NewExpense {
        group_id: input.group_id,
        amount: input.amount,
        description: input.description,
        split_type: input.split_type,
    };
    let e = expense_service::create_expense(&state.db, payer_id, input).await?;
    Ok((StatusCode::CREATED, Json(ser::expense(&e))))
}

#[utoipa::path(
    get, path = "/expenses", tag = "expenses",
    params(ListExpensesQuery),
    responses(
        (status = 200, description = "Expenses, oldest first", body = [ser::ExpenseView]),
        (status = 400, description = "groupId missing")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListExpensesQuery>,
    body: Bytes,
) -> Result<Json<Vec<ser::ExpenseView>>, ApiError> {
    let group_id = match q.group_id {
        Some(id) => id,
        None => group_id_from_body(&body)?,
    };
    let rows = expense_service::list_expenses(&state.db, group_id).await?;
    info!(count = rows.len(), group_id = %group_id, "list expenses");
    Ok(Json(ser::expenses(&rows)))
}

fn group_id_from_body(body: &[u8]) -> Result<Uuid, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::bad_request("groupId is required"));
    }
    let parsed: ListExpensesQuery =
        serde_json::from_slice(body).map_err(|e| ApiError::bad_request(format!("invalid request body: {e}")))?;
    parsed.group_id.ok_or_else(|| ApiError::bad_request("groupId is required"))
}
