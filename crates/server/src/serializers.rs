//! Pure mappings from service results to camelCase response bodies.
//!
//! Nothing here touches the transport: handlers pick the status and wrap the
//! returned value in `Json`.

pub mod groups;
pub mod payments;
pub mod expenses;

use serde::Serialize;
use utoipa::ToSchema;

/// Acknowledgement body for operations without a payload.
#[derive(Debug, Serialize, PartialEq, Eq, ToSchema)]
pub struct MessageResponse {
    #[schema(value_type = String)]
    pub message: &'static str,
}

pub fn message(message: &'static str) -> MessageResponse {
    MessageResponse { message }
}

pub const GROUP_DELETED: &str = "Group deleted successfully";
pub const GROUP_LEFT: &str = "You have left the group";
pub const MEMBER_REMOVED: &str = "User removed from the group";
pub const MEMBER_ADDED: &str = "User added to group successfully";
