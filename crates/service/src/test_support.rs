#![cfg(test)]
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Fresh migrated in-memory database; each test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

pub async fn seed_user(db: &DatabaseConnection, name: &str) -> Result<models::user::Model, anyhow::Error> {
    let email = format!("{}_{}@example.com", name.to_lowercase(), Uuid::new_v4().simple());
    Ok(models::user::create(db, &email, name).await?)
}
