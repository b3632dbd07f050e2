use sea_orm::DatabaseConnection;

use models::{commons, user_commons};

use crate::commons::domain::{CreateCommonsParams, InsertOutcome, NewUserCommons};
use crate::commons::repository::{CommonsRepository, UserCommonsRepository};
use crate::errors::ServiceError;

/// SeaORM-backed commons repository.
pub struct SeaOrmCommonsRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl CommonsRepository for SeaOrmCommonsRepository {
    async fn find_all(&self) -> Result<Vec<commons::Model>, ServiceError> {
        Ok(commons::find_all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<commons::Model>, ServiceError> {
        Ok(commons::find_by_id(&self.db, id).await?)
    }

    async fn create(&self, params: &CreateCommonsParams) -> Result<commons::Model, ServiceError> {
        Ok(commons::create(
            &self.db,
            &params.name,
            params.cow_price,
            params.milk_price,
            params.starting_balance,
            params.starting_date,
            params.ending_date,
        )
        .await?)
    }

    async fn save(&self, commons: commons::Model) -> Result<commons::Model, ServiceError> {
        let id = commons.id;
        commons::save(&self.db, commons)
            .await?
            .ok_or_else(|| ServiceError::not_found("Commons", id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(commons::delete(&self.db, id).await?)
    }
}

/// SeaORM-backed membership repository.
pub struct SeaOrmUserCommonsRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl UserCommonsRepository for SeaOrmUserCommonsRepository {
    async fn find_by_commons_and_user(&self, commons_id: i64, user_id: i64) -> Result<Option<user_commons::Model>, ServiceError> {
        Ok(user_commons::find_by_commons_and_user(&self.db, commons_id, user_id).await?)
    }

    async fn find_all_by_commons(&self, commons_id: i64) -> Result<Vec<user_commons::Model>, ServiceError> {
        Ok(user_commons::find_by_commons(&self.db, commons_id).await?)
    }

    async fn insert_if_absent(&self, row: NewUserCommons) -> Result<InsertOutcome, ServiceError> {
        let inserted = user_commons::insert_if_absent(
            &self.db,
            row.commons_id,
            row.user_id,
            row.cow_health,
            row.cow_price,
            row.num_cows,
            row.total_wealth,
        )
        .await?;
        // memberships are never updated here; this is the row the insert settled on
        let stored = user_commons::find_by_commons_and_user(&self.db, row.commons_id, row.user_id)
            .await?
            .ok_or_else(|| ServiceError::Db("membership vanished after insert".into()))?;
        Ok(if inserted { InsertOutcome::Inserted(stored) } else { InsertOutcome::AlreadyPresent(stored) })
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(user_commons::delete(&self.db, id).await?)
    }
}
