use crate::db::connect_in_memory;
use crate::errors::ModelError;
use crate::{expense, group, group_member, payment, user, user_credentials};
use anyhow::Result;
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use uuid::Uuid;

/// Test user CRUD operations
#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let db = connect_in_memory().await?;

    let created = user::create(&db, "  Alice@Example.com ", "Alice").await?;
    assert_eq!(created.email, "alice@example.com");
    assert_eq!(created.name, "Alice");

    let found = user::find_by_email(&db, "ALICE@example.com").await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));

    // Duplicate email hits the unique index
    let dup = user::create(&db, "alice@example.com", "Other").await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn test_user_validation() -> Result<()> {
    let db = connect_in_memory().await?;
    assert!(matches!(user::create(&db, "not-an-email", "Bob").await, Err(ModelError::Validation(_))));
    assert!(matches!(user::create(&db, "bob@example.com", "  ").await, Err(ModelError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_credentials_upsert_replaces_hash() -> Result<()> {
    let db = connect_in_memory().await?;
    let u = user::create(&db, "carol@example.com", "Carol").await?;

    let first = user_credentials::upsert_password(&db, u.id, "hash-1".into(), "argon2").await?;
    let second = user_credentials::upsert_password(&db, u.id, "hash-2".into(), "argon2").await?;
    assert_eq!(first.id, second.id);

    let stored = user_credentials::find_for_user(&db, u.id).await?.unwrap();
    assert_eq!(stored.password_hash, "hash-2");

    assert!(user_credentials::upsert_password(&db, u.id, " ".into(), "argon2").await.is_err());
    Ok(())
}

/// Test group CRUD operations
#[tokio::test]
async fn test_group_crud() -> Result<()> {
    let db = connect_in_memory().await?;
    let owner = user::create(&db, "dave@example.com", "Dave").await?;

    let g = group::create(&db, owner.id, "Trip", "travel", Some("https://img.example.com/trip.png")).await?;
    assert_eq!(g.name, "Trip");
    assert_eq!(g.group_type, "travel");
    assert_eq!(g.created_by, owner.id);

    let found = group::find(&db, g.id).await?.unwrap();
    assert_eq!(found.profile_image_url.as_deref(), Some("https://img.example.com/trip.png"));

    assert!(group::create(&db, owner.id, "", "travel", None).await.is_err());
    assert!(group::create(&db, owner.id, "Trip", "travel", Some("ftp://x")).await.is_err());

    group::Entity::delete_by_id(g.id).exec(&db).await?;
    assert!(group::find(&db, g.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_group_member_unique_pair() -> Result<()> {
    let db = connect_in_memory().await?;
    let owner = user::create(&db, "erin@example.com", "Erin").await?;
    let g = group::create(&db, owner.id, "Flat", "home", None).await?;

    let m = group_member::create(&db, g.id, owner.id, true).await?;
    assert!(m.is_admin);

    let dup = group_member::create(&db, g.id, owner.id, false).await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))));

    assert_eq!(group_member::list_for_group(&db, g.id).await?.len(), 1);
    assert_eq!(group_member::find(&db, g.id, owner.id).await?.map(|x| x.id), Some(m.id));

    group_member::delete(&db, m.id).await?;
    assert!(group_member::find(&db, g.id, owner.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_group_member_window() -> Result<()> {
    let db = connect_in_memory().await?;
    let u = user::create(&db, "frank@example.com", "Frank").await?;
    for i in 0..5 {
        let g = group::create(&db, u.id, &format!("Group {i}"), "other", None).await?;
        group_member::create(&db, g.id, u.id, true).await?;
    }
    assert_eq!(group_member::list_for_user(&db, u.id, 0, 2).await?.len(), 2);
    assert_eq!(group_member::list_for_user(&db, u.id, 4, 2).await?.len(), 1);
    assert!(group_member::list_for_user(&db, u.id, 10, 2).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_payment_and_expense_rows() -> Result<()> {
    let db = connect_in_memory().await?;
    let a = user::create(&db, "gina@example.com", "Gina").await?;
    let b = user::create(&db, "hal@example.com", "Hal").await?;
    let g = group::create(&db, a.id, "Dinner club", "food", None).await?;

    let p1 = payment::create(&db, g.id, a.id, b.id, Decimal::new(1250, 2), payment::PaymentStatus::Pending).await?;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let p2 = payment::create(&db, g.id, b.id, a.id, Decimal::new(325, 2), payment::PaymentStatus::Pending).await?;

    let listed = payment::list_for_group(&db, g.id).await?;
    assert_eq!(listed.iter().map(|p| p.id).collect::<Vec<_>>(), vec![p2.id, p1.id]);
    assert_eq!(listed[1].amount, Decimal::new(1250, 2));
    assert_eq!(listed[1].status, "pending");
    assert!(payment::list_for_group(&db, Uuid::new_v4()).await?.is_empty());

    assert!(payment::create(&db, g.id, a.id, a.id, Decimal::ONE, payment::PaymentStatus::Pending).await.is_err());

    let e = expense::create(&db, g.id, a.id, Decimal::new(4250, 2), "Pizza", expense::SplitType::Equal).await?;
    assert_eq!(e.split_type, "equal");
    let expenses = expense::list_for_group(&db, g.id).await?;
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, Decimal::new(425, 1));
    Ok(())
}
