use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Starting values of a fresh membership.
pub const INITIAL_COW_HEALTH: i32 = 100;
pub const INITIAL_NUM_COWS: i32 = 1;

/// Create input; every field is required
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommonsParams {
    pub name: String,
    pub cow_price: f64,
    pub milk_price: f64,
    pub starting_balance: f64,
    pub starting_date: NaiveDateTime,
    pub ending_date: NaiveDateTime,
}

/// Edit input. Dates are fixed at creation and not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCommonsParams {
    pub name: String,
    pub cow_price: f64,
    pub milk_price: f64,
    pub starting_balance: f64,
}

/// Membership row to be created on first join
#[derive(Debug, Clone, PartialEq)]
pub struct NewUserCommons {
    pub commons_id: i64,
    pub user_id: i64,
    pub cow_health: i32,
    pub cow_price: f64,
    pub num_cows: i32,
    pub total_wealth: f64,
}

impl NewUserCommons {
    /// Initial state of `user_id` in `commons`: price and wealth are snapshotted.
    pub fn joining(commons: &models::commons::Model, user_id: i64) -> Self {
        Self {
            commons_id: commons.id,
            user_id,
            cow_health: INITIAL_COW_HEALTH,
            cow_price: commons.cow_price,
            num_cows: INITIAL_NUM_COWS,
            total_wealth: commons.starting_balance,
        }
    }
}

/// What `insert_if_absent` did
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Inserted(models::user_commons::Model),
    AlreadyPresent(models::user_commons::Model),
}

impl InsertOutcome {
    pub fn row(&self) -> &models::user_commons::Model {
        match self {
            InsertOutcome::Inserted(m) | InsertOutcome::AlreadyPresent(m) => m,
        }
    }

    pub fn was_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }
}

/// Join result: the response body plus what happened to the membership
#[derive(Debug, Clone, PartialEq)]
pub struct JoinResult {
    pub commons: models::commons::Model,
    pub membership: InsertOutcome,
}
