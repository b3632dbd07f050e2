#![cfg(test)]
use chrono::NaiveDate;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::commons::domain::CreateCommonsParams;

/// Fresh in-memory database with the schema applied; each test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn sample_params(name: &str) -> CreateCommonsParams {
    CreateCommonsParams {
        name: name.to_string(),
        cow_price: 10.0,
        milk_price: 5.0,
        starting_balance: 1000.0,
        starting_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
        ending_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
    }
}
