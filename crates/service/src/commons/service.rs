use std::sync::Arc;
use tracing::{info, instrument};

use models::{commons, user_commons};

use super::domain::{CreateCommonsParams, EditCommonsParams, InsertOutcome, JoinResult, NewUserCommons};
use super::repository::{CommonsRepository, UserCommonsRepository};
use crate::errors::ServiceError;

/// Application service behind every `/api/commons` operation.
///
/// Role checks happen before a request gets here; methods take the already
/// authenticated user id where one matters.
#[derive(Clone)]
pub struct CommonsService {
    commons: Arc<dyn CommonsRepository>,
    memberships: Arc<dyn UserCommonsRepository>,
}

impl CommonsService {
    pub fn new(commons: Arc<dyn CommonsRepository>, memberships: Arc<dyn UserCommonsRepository>) -> Self {
        Self { commons, memberships }
    }

    pub async fn list_all(&self) -> Result<Vec<commons::Model>, ServiceError> {
        self.commons.find_all().await
    }

    pub async fn get(&self, id: i64) -> Result<commons::Model, ServiceError> {
        self.commons
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Commons", id))
    }

    /// Create a commons; no range or uniqueness checks beyond the input shape.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use migration::MigratorTrait;
    /// use service::commons::{CommonsService, domain::CreateCommonsParams};
    /// use service::commons::repo::seaorm::{SeaOrmCommonsRepository, SeaOrmUserCommonsRepository};
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let db = models::db::connect_in_memory().await.unwrap();
    /// migration::Migrator::up(&db, None).await.unwrap();
    /// let svc = CommonsService::new(
    ///     Arc::new(SeaOrmCommonsRepository { db: db.clone() }),
    ///     Arc::new(SeaOrmUserCommonsRepository { db }),
    /// );
    /// let day = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let params = CreateCommonsParams {
    ///     name: "C1".into(), cow_price: 10.0, milk_price: 5.0, starting_balance: 1000.0,
    ///     starting_date: day, ending_date: day,
    /// };
    /// let created = svc.create(params).await.unwrap();
    /// assert_eq!(created.name, "C1");
    /// # });
    /// ```
    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create(&self, params: CreateCommonsParams) -> Result<commons::Model, ServiceError> {
        let created = self.commons.create(&params).await?;
        info!(commons_id = created.id, "commons_created");
        Ok(created)
    }

    /// Join `user_id` to commons `commons_id`.
    ///
    /// Idempotent: a second join for the same pair creates nothing and returns
    /// the same commons. The membership is created through the repository's
    /// atomic insert, so concurrent joins still leave exactly one row.
    #[instrument(skip(self))]
    pub async fn join(&self, commons_id: i64, user_id: i64) -> Result<JoinResult, ServiceError> {
        let commons = self.get(commons_id).await?;
        let membership = self
            .memberships
            .insert_if_absent(NewUserCommons::joining(&commons, user_id))
            .await?;
        match &membership {
            InsertOutcome::Inserted(row) => info!(user_commons_id = row.id, outcome = "created", "commons_joined"),
            InsertOutcome::AlreadyPresent(row) => info!(user_commons_id = row.id, outcome = "existing", "commons_joined"),
        }
        Ok(JoinResult { commons, membership })
    }

    /// Remove one membership. Fails without touching anything when the pair is unknown.
    #[instrument(skip(self))]
    pub async fn remove_user(&self, commons_id: i64, user_id: i64) -> Result<(), ServiceError> {
        let row = self
            .memberships
            .find_by_commons_and_user(commons_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found_by("UserCommons", &[("commonsId", commons_id), ("userId", user_id)]))?;
        self.memberships.delete_by_id(row.id).await?;
        info!(user_commons_id = row.id, "user_removed_from_commons");
        Ok(())
    }

    /// Delete the commons row only; memberships pointing at it are left as they are.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.get(id).await?;
        if !self.commons.delete_by_id(id).await? {
            return Err(ServiceError::not_found("Commons", id));
        }
        info!("commons_deleted");
        Ok(())
    }

    /// Overwrite name and prices; the start and end dates keep their values.
    #[instrument(skip(self, params))]
    pub async fn edit(&self, id: i64, params: EditCommonsParams) -> Result<commons::Model, ServiceError> {
        let mut current = self.get(id).await?;
        current.name = params.name;
        current.cow_price = params.cow_price;
        current.milk_price = params.milk_price;
        current.starting_balance = params.starting_balance;
        let saved = self.commons.save(current).await?;
        info!("commons_updated");
        Ok(saved)
    }

    pub async fn list_members(&self, commons_id: i64) -> Result<Vec<user_commons::Model>, ServiceError> {
        self.get(commons_id).await?;
        self.memberships.find_all_by_commons(commons_id).await
    }
}
