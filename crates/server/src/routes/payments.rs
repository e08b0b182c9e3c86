use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use service::payment_service;

use crate::errors::ApiError;
use crate::extract::{Json, Path};
use crate::routes::auth::CurrentUser;
use crate::serializers::payments as ser;
use crate::state::ServerState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub payee_id: Uuid,
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

#[utoipa::path(
    get, path = "/groups/{groupId}/payments", tag = "payments",
    params(("groupId" = Uuid, Path, description = "Group id")),
    responses((status = 200, description = "Payments, newest first", body = [ser::PaymentView]))
)]
pub async fn list(State(state): State<ServerState>, Path(group_id): Path<Uuid>) -> Result<Json<Vec<ser::PaymentView>>, ApiError> {
    let rows = payment_service::list_payments(&state.db, group_id).await?;
    info!(count = rows.len(), group_id = %group_id, "list payments");
    Ok(Json(ser::get_all_payments_for_group(&rows)))
}

#[utoipa::path(
    post, path = "/groups/{groupId}/payments", tag = "payments",
    params(("groupId" = Uuid, Path, description = "Group id")),
    request_body = RecordPaymentRequest,
    responses(
        (status = 201, description = "Recorded", body = ser::PaymentView),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Group or payee not found")
    )
)]
pub async fn record(
    State(state): State<ServerState>,
    Extension(CurrentUser(payer_id)): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
    Json(input): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<ser::PaymentView>), ApiError> {
    let p = payment_service::record_payment(&state.db, group_id, payer_id, input.payee_id, input.amount).await?;
    Ok((StatusCode::CREATED, Json(ser::payment(&p))))
}
