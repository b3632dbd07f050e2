use async_trait::async_trait;
use models::{commons, user_commons};

use super::domain::{CreateCommonsParams, InsertOutcome, NewUserCommons};
use crate::errors::ServiceError;

/// Persistence for commons records.
#[async_trait]
pub trait CommonsRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<commons::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<commons::Model>, ServiceError>;
    /// Insert a new record; the store assigns the id.
    async fn create(&self, params: &CreateCommonsParams) -> Result<commons::Model, ServiceError>;
    /// Overwrite an existing record.
    async fn save(&self, commons: commons::Model) -> Result<commons::Model, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
}

/// Persistence for memberships, unique per `(commons_id, user_id)`.
#[async_trait]
pub trait UserCommonsRepository: Send + Sync {
    async fn find_by_commons_and_user(&self, commons_id: i64, user_id: i64) -> Result<Option<user_commons::Model>, ServiceError>;
    async fn find_all_by_commons(&self, commons_id: i64) -> Result<Vec<user_commons::Model>, ServiceError>;
    /// Atomically create the membership unless one exists for the pair.
    async fn insert_if_absent(&self, row: NewUserCommons) -> Result<InsertOutcome, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
}

/// In-memory repositories for tests
#[cfg(any(test, feature = "test-util"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, ServiceError> {
        m.lock().map_err(|_| ServiceError::Db("in-memory store lock poisoned".into()))
    }

    struct Table<T> {
        next_id: i64,
        rows: BTreeMap<i64, T>,
    }

    // no `T: Default` bound
    impl<T> Default for Table<T> {
        fn default() -> Self {
            Self { next_id: 0, rows: BTreeMap::new() }
        }
    }

    impl<T> Table<T> {
        fn allocate_id(&mut self) -> i64 {
            self.next_id += 1;
            self.next_id
        }
    }

    #[derive(Default)]
    pub struct InMemoryCommonsRepository {
        table: Mutex<Table<commons::Model>>,
    }

    #[async_trait]
    impl CommonsRepository for InMemoryCommonsRepository {
        async fn find_all(&self) -> Result<Vec<commons::Model>, ServiceError> {
            Ok(lock(&self.table)?.rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<commons::Model>, ServiceError> {
            Ok(lock(&self.table)?.rows.get(&id).cloned())
        }

        async fn create(&self, params: &CreateCommonsParams) -> Result<commons::Model, ServiceError> {
            let mut table = lock(&self.table)?;
            let id = table.allocate_id();
            let model = commons::Model {
                id,
                name: params.name.clone(),
                cow_price: params.cow_price,
                milk_price: params.milk_price,
                starting_balance: params.starting_balance,
                starting_date: params.starting_date,
                ending_date: params.ending_date,
            };
            table.rows.insert(id, model.clone());
            Ok(model)
        }

        async fn save(&self, commons: commons::Model) -> Result<commons::Model, ServiceError> {
            let mut table = lock(&self.table)?;
            match table.rows.get_mut(&commons.id) {
                Some(slot) => {
                    *slot = commons.clone();
                    Ok(commons)
                }
                None => Err(ServiceError::not_found("Commons", commons.id)),
            }
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(lock(&self.table)?.rows.remove(&id).is_some())
        }
    }

    #[derive(Default)]
    pub struct InMemoryUserCommonsRepository {
        table: Mutex<Table<user_commons::Model>>,
    }

    impl InMemoryUserCommonsRepository {
        pub fn len(&self) -> Result<usize, ServiceError> {
            Ok(lock(&self.table)?.rows.len())
        }

        pub fn is_empty(&self) -> Result<bool, ServiceError> {
            Ok(self.len()? == 0)
        }
    }

    #[async_trait]
    impl UserCommonsRepository for InMemoryUserCommonsRepository {
        async fn find_by_commons_and_user(&self, commons_id: i64, user_id: i64) -> Result<Option<user_commons::Model>, ServiceError> {
            Ok(lock(&self.table)?
                .rows
                .values()
                .find(|r| r.commons_id == commons_id && r.user_id == user_id)
                .cloned())
        }

        async fn find_all_by_commons(&self, commons_id: i64) -> Result<Vec<user_commons::Model>, ServiceError> {
            Ok(lock(&self.table)?
                .rows
                .values()
                .filter(|r| r.commons_id == commons_id)
                .cloned()
                .collect())
        }

        async fn insert_if_absent(&self, row: NewUserCommons) -> Result<InsertOutcome, ServiceError> {
            // check and insert under one lock
            let mut table = lock(&self.table)?;
            if let Some(existing) = table
                .rows
                .values()
                .find(|r| r.commons_id == row.commons_id && r.user_id == row.user_id)
            {
                return Ok(InsertOutcome::AlreadyPresent(existing.clone()));
            }
            let id = table.allocate_id();
            let model = user_commons::Model {
                id,
                commons_id: row.commons_id,
                user_id: row.user_id,
                cow_health: row.cow_health,
                cow_price: row.cow_price,
                num_cows: row.num_cows,
                total_wealth: row.total_wealth,
            };
            table.rows.insert(id, model.clone());
            Ok(InsertOutcome::Inserted(model))
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(lock(&self.table)?.rows.remove(&id).is_some())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::sync::Arc;

        #[test]
        fn poisoned_table_is_reported_as_error() {
            let repo = Arc::new(InMemoryUserCommonsRepository::default());
            let held = Arc::clone(&repo);
            let _ = std::thread::spawn(move || {
                let _guard = held.table.lock().unwrap();
                panic!("poison the table");
            })
            .join();

            assert!(matches!(repo.len(), Err(ServiceError::Db(_))));
            assert!(repo.is_empty().is_err());
        }
    }
}
