use super::crud_tests::setup_test_db;
use crate::user_commons;
use anyhow::Result;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

#[tokio::test]
async fn test_insert_if_absent_creates_once() -> Result<()> {
    let db = setup_test_db().await?;

    assert!(user_commons::insert_if_absent(&db, 1, 42, 100, 10.0, 1, 1000.0).await?);
    // Different values for the same pair must not overwrite the first row
    assert!(!user_commons::insert_if_absent(&db, 1, 42, 50, 99.0, 7, 1.0).await?);

    let row = user_commons::find_by_commons_and_user(&db, 1, 42).await?.expect("row");
    assert_eq!(row.cow_health, 100);
    assert_eq!(row.num_cows, 1);
    assert_eq!(row.cow_price, 10.0);
    assert_eq!(row.total_wealth, 1000.0);
    assert_eq!(user_commons::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_same_user_in_different_commons() -> Result<()> {
    let db = setup_test_db().await?;

    assert!(user_commons::insert_if_absent(&db, 1, 42, 100, 10.0, 1, 1000.0).await?);
    assert!(user_commons::insert_if_absent(&db, 2, 42, 100, 10.0, 1, 1000.0).await?);
    assert!(user_commons::insert_if_absent(&db, 1, 43, 100, 10.0, 1, 1000.0).await?);

    assert_eq!(user_commons::find_by_commons(&db, 1).await?.len(), 2);
    assert_eq!(user_commons::find_by_commons(&db, 2).await?.len(), 1);
    Ok(())
}

/// The unique index rejects a plain insert of a duplicate pair
#[tokio::test]
async fn test_unique_index_rejects_duplicate_pair() -> Result<()> {
    let db = setup_test_db().await?;
    assert!(user_commons::insert_if_absent(&db, 3, 7, 100, 10.0, 1, 1000.0).await?);

    let dup = user_commons::ActiveModel {
        commons_id: Set(3),
        user_id: Set(7),
        cow_health: Set(100),
        cow_price: Set(10.0),
        num_cows: Set(1),
        total_wealth: Set(1000.0),
        ..Default::default()
    };
    assert!(dup.insert(&db).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_delete_membership() -> Result<()> {
    let db = setup_test_db().await?;
    user_commons::insert_if_absent(&db, 1, 42, 100, 10.0, 1, 1000.0).await?;
    user_commons::insert_if_absent(&db, 1, 43, 100, 10.0, 1, 1000.0).await?;

    let row = user_commons::find_by_commons_and_user(&db, 1, 42).await?.expect("row");
    assert!(user_commons::delete(&db, row.id).await?);
    assert!(user_commons::find_by_commons_and_user(&db, 1, 42).await?.is_none());
    assert!(user_commons::find_by_commons_and_user(&db, 1, 43).await?.is_some());
    Ok(())
}
