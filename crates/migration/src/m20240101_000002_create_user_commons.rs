//! Create `user_commons` table.
//!
//! One row per (commons, user) membership. There is deliberately no foreign key
//! to `commons`: deleting a commons leaves its membership rows in place.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserCommons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserCommons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(UserCommons::CommonsId).not_null())
                    .col(big_integer(UserCommons::UserId).not_null())
                    .col(integer(UserCommons::CowHealth).not_null())
                    .col(double(UserCommons::CowPrice).not_null())
                    .col(integer(UserCommons::NumCows).not_null())
                    .col(double(UserCommons::TotalWealth).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserCommons::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserCommons {
    Table,
    Id,
    CommonsId,
    UserId,
    CowHealth,
    CowPrice,
    NumCows,
    TotalWealth,
}
