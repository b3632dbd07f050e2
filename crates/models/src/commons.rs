use sea_orm::{entity::prelude::*, ActiveValue::Unchanged, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// One instance of the shared-resource game with its economic parameters.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "commons")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub cow_price: f64,
    pub milk_price: f64,
    pub starting_balance: f64,
    pub starting_date: DateTime,
    pub ending_date: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    cow_price: f64,
    milk_price: f64,
    starting_balance: f64,
    starting_date: DateTime,
    ending_date: DateTime,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        name: Set(name.to_string()),
        cow_price: Set(cow_price),
        milk_price: Set(milk_price),
        starting_balance: Set(starting_balance),
        starting_date: Set(starting_date),
        ending_date: Set(ending_date),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Write every column of `model` back to its existing row.
///
/// `Ok(None)` when the row no longer exists.
pub async fn save(db: &DatabaseConnection, model: Model) -> Result<Option<Model>, errors::ModelError> {
    let am = ActiveModel {
        id: Unchanged(model.id),
        name: Set(model.name),
        cow_price: Set(model.cow_price),
        milk_price: Set(model.milk_price),
        starting_balance: Set(model.starting_balance),
        starting_date: Set(model.starting_date),
        ending_date: Set(model.ending_date),
    };
    match am.update(db).await {
        Ok(updated) => Ok(Some(updated)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
