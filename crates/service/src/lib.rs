//! Service layer providing the group, membership, payment and expense operations on top of models.
//! - Separates business rules from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Every failure surfaces as a `ServiceError` whose message is safe to show to API clients.

pub mod errors;
pub mod pagination;
pub mod auth;
pub mod user_service;
pub mod group_service;
pub mod membership_service;
pub mod payment_service;
pub mod expense_service;
#[cfg(test)]
pub mod test_support;
