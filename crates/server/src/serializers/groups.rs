use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use models::{group, group_member};
use service::group_service::GroupMembership;

use super::MEMBER_ADDED;

#[derive(Debug, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedGroup {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: String,
    pub created_by: Uuid,
}

pub fn create_group(g: &group::Model) -> CreatedGroup {
    CreatedGroup { id: g.id, name: g.name.clone(), group_type: g.group_type.clone(), created_by: g.created_by }
}

#[derive(Debug, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupListItem {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: String,
    pub profile_image_url: Option<String>,
    pub is_admin: bool,
    pub joined_at: DateTime<FixedOffset>,
}

pub fn get_groups(rows: &[GroupMembership]) -> Vec<GroupListItem> {
    rows.iter()
        .map(|m| GroupListItem {
            group_id: m.group_id,
            user_id: m.user_id,
            name: m.name.clone(),
            group_type: m.group_type.clone(),
            profile_image_url: m.profile_image_url.clone(),
            is_admin: m.is_admin,
            joined_at: m.joined_at,
        })
        .collect()
}

#[derive(Debug, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetails {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: String,
    pub created_by: Uuid,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, ToSchema)]
pub struct UpdatedGroup {
    pub group: GroupDetails,
}

pub fn update_group(g: &group::Model) -> UpdatedGroup {
    UpdatedGroup {
        group: GroupDetails {
            id: g.id,
            name: g.name.clone(),
            group_type: g.group_type.clone(),
            created_by: g.created_by,
            profile_image_url: g.profile_image_url.clone(),
        },
    }
}

#[derive(Debug, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub is_admin: bool,
    pub joined_at: DateTime<FixedOffset>,
}

pub fn member(m: &group_member::Model) -> MemberView {
    MemberView { group_id: m.group_id, user_id: m.user_id, is_admin: m.is_admin, joined_at: m.joined_at }
}

pub fn members(rows: &[group_member::Model]) -> Vec<MemberView> {
    rows.iter().map(member).collect()
}

#[derive(Debug, Serialize, PartialEq, ToSchema)]
pub struct MemberAdded {
    #[schema(value_type = String)]
    pub message: &'static str,
    pub data: MemberView,
}

pub fn add_member_to_group(m: &group_member::Model) -> MemberAdded {
    MemberAdded { message: MEMBER_ADDED, data: member(m) }
}
