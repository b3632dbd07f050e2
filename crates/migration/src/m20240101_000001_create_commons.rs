//! Create `commons` table.
//! One row per game instance with its economic parameters and schedule.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Commons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Commons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Commons::Name, 255).not_null())
                    .col(double(Commons::CowPrice).not_null())
                    .col(double(Commons::MilkPrice).not_null())
                    .col(double(Commons::StartingBalance).not_null())
                    .col(date_time(Commons::StartingDate).not_null())
                    .col(date_time(Commons::EndingDate).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Commons::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Commons {
    Table,
    Id,
    Name,
    CowPrice,
    MilkPrice,
    StartingBalance,
    StartingDate,
    EndingDate,
}
