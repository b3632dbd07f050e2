use sea_orm::{entity::prelude::*, sea_query::OnConflict, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// A user's membership and game state inside one commons.
///
/// `commons_id` is not a foreign key: rows outlive the commons they point to.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_commons")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub commons_id: i64,
    pub user_id: i64,
    pub cow_health: i32,
    pub cow_price: f64,
    pub num_cows: i32,
    pub total_wealth: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_by_commons_and_user(
    db: &DatabaseConnection,
    commons_id: i64,
    user_id: i64,
) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::CommonsId.eq(commons_id))
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

pub async fn find_by_commons(db: &DatabaseConnection, commons_id: i64) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::CommonsId.eq(commons_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

/// Single-statement `INSERT .. ON CONFLICT (commons_id, user_id) DO NOTHING`.
///
/// Returns `true` when this call created the row, `false` when a row for the
/// pair already existed. Concurrent callers for the same pair cannot both see `true`.
pub async fn insert_if_absent(
    db: &DatabaseConnection,
    commons_id: i64,
    user_id: i64,
    cow_health: i32,
    cow_price: f64,
    num_cows: i32,
    total_wealth: f64,
) -> Result<bool, errors::ModelError> {
    let am = ActiveModel {
        commons_id: Set(commons_id),
        user_id: Set(user_id),
        cow_health: Set(cow_health),
        cow_price: Set(cow_price),
        num_cows: Set(num_cows),
        total_wealth: Set(total_wealth),
        ..Default::default()
    };
    let rows = Entity::insert(am)
        .on_conflict(
            OnConflict::columns([Column::CommonsId, Column::UserId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(rows > 0)
}

pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
