use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use service::group_service::{self, GroupFilter, GroupUpdate, NewGroup};
use service::membership_service;
use service::pagination::Pagination;

use crate::errors::ApiError;
use crate::extract::{Json, Path, Query};
use crate::routes::auth::CurrentUser;
use crate::serializers::{self, groups as ser, MessageResponse};
use crate::state::ServerState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub group_type: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub group_type: Option<String>,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListGroupsQuery {
    /// 1-based page, default 1
    pub page: Option<u32>,
    /// page size, default 10
    pub limit: Option<u32>,
    /// `all`, `owe` or `owed` (default)
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub is_admin: bool,
}

#[utoipa::path(
    post, path = "/groups", tag = "groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Created", body = ser::CreatedGroup),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(input): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<ser::CreatedGroup>), ApiError> {
    let input = NewGroup { name: input.name, group_type: input.group_type, profile_image_url: input.profile_image_url };
    let g = group_service::create_group(&state.db, user_id, input).await?;
    Ok((StatusCode::CREATED, Json(ser::create_group(&g))))
}

#[utoipa::path(
    get, path = "/groups", tag = "groups",
    params(ListGroupsQuery),
    responses(
        (status = 200, description = "List OK", body = [ser::GroupListItem]),
        (status = 400, description = "Invalid filter"),
        (status = 500, description = "Error retrieving groups")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(q): Query<ListGroupsQuery>,
) -> Result<Json<Vec<ser::GroupListItem>>, ApiError> {
    let filter: GroupFilter = q.filter.as_deref().map(str::parse::<GroupFilter>).transpose()?.unwrap_or_default();
    let page = Pagination::from_query(q.page, q.limit);
    let rows = group_service::list_groups(&state.db, user_id, page, filter).await?;
    info!(count = rows.len(), "list groups");
    Ok(Json(ser::get_groups(&rows)))
}

#[utoipa::path(
    put, path = "/groups/{groupId}", tag = "groups",
    params(("groupId" = Uuid, Path, description = "Group id")),
    request_body = UpdateGroupRequest,
    responses(
        (status = 200, description = "Updated", body = ser::UpdatedGroup),
        (status = 404, description = "Group not found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
    Json(input): Json<UpdateGroupRequest>,
) -> Result<Json<ser::UpdatedGroup>, ApiError> {
    let changes = GroupUpdate { name: input.name, group_type: input.group_type, profile_image_url: input.profile_image_url };
    let g = group_service::update_group(&state.db, user_id, group_id, changes).await?;
    Ok(Json(ser::update_group(&g)))
}

#[utoipa::path(
    delete, path = "/groups/{groupId}", tag = "groups",
    params(("groupId" = Uuid, Path, description = "Group id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Group not found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    group_service::delete_group(&state.db, user_id, group_id).await?;
    Ok(Json(serializers::message(serializers::GROUP_DELETED)))
}

#[utoipa::path(
    get, path = "/groups/{groupId}/members", tag = "groups",
    params(("groupId" = Uuid, Path, description = "Group id")),
    responses(
        (status = 200, description = "Members", body = [ser::MemberView]),
        (status = 404, description = "Group not found")
    )
)]
pub async fn list_members(State(state): State<ServerState>, Path(group_id): Path<Uuid>) -> Result<Json<Vec<ser::MemberView>>, ApiError> {
    let rows = membership_service::list_members(&state.db, group_id).await?;
    Ok(Json(ser::members(&rows)))
}

#[utoipa::path(
    post, path = "/groups/{groupId}/members", tag = "groups",
    params(("groupId" = Uuid, Path, description = "Group id")),
    request_body = AddMemberRequest,
    responses(
        (status = 200, description = "Added", body = ser::MemberAdded),
        (status = 404, description = "Group or user not found"),
        (status = 409, description = "Already a member")
    )
)]
pub async fn add_member(
    State(state): State<ServerState>,
    Extension(CurrentUser(current_user_id)): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
    Json(input): Json<AddMemberRequest>,
) -> Result<Json<ser::MemberAdded>, ApiError> {
    let m = membership_service::add_member(&state.db, group_id, current_user_id, input.user_id, input.is_admin).await?;
    Ok(Json(ser::add_member_to_group(&m)))
}

#[utoipa::path(
    post, path = "/groups/{groupId}/leave", tag = "groups",
    params(("groupId" = Uuid, Path, description = "Group id")),
    responses(
        (status = 200, description = "Left", body = MessageResponse),
        (status = 400, description = "Not a member")
    )
)]
pub async fn leave(
    State(state): State<ServerState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    membership_service::leave_group(&state.db, user_id, group_id).await?;
    Ok(Json(serializers::message(serializers::GROUP_LEFT)))
}

#[utoipa::path(
    delete, path = "/groups/{groupId}/members/{userId}", tag = "groups",
    params(
        ("groupId" = Uuid, Path, description = "Group id"),
        ("userId" = Uuid, Path, description = "Member to remove")
    ),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 404, description = "User not found in the group")
    )
)]
pub async fn remove_member(
    State(state): State<ServerState>,
    Extension(CurrentUser(acting_user_id)): Extension<CurrentUser>,
    Path((group_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, ApiError> {
    membership_service::remove_user(&state.db, acting_user_id, group_id, user_id).await?;
    Ok(Json(serializers::message(serializers::MEMBER_REMOVED)))
}
