use models::errors::ModelError;
use thiserror::Error;

/// Business errors. `Display` is the message returned to API clients.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Group not found")]
    GroupNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("User is already a member of the group")]
    AlreadyMember,
    #[error("You are not a member of this group")]
    NotMember,
    #[error("User not found in the group")]
    NotInGroup,
    #[error("Error retrieving groups")]
    GroupsUnavailable,
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn db(e: impl std::fmt::Display) -> Self { Self::Db(e.to_string()) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => ServiceError::Validation(m),
            ModelError::Conflict(m) => ServiceError::Conflict(m),
            ModelError::Db(m) => ServiceError::Db(m),
        }
    }
}
