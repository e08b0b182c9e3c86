pub mod errors;
pub mod db;
pub mod user;
pub mod user_credentials;
pub mod group;
pub mod group_member;
pub mod payment;
pub mod expense;

#[cfg(test)]
mod tests;
