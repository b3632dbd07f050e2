use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // UserCommons: at most one membership per (commons_id, user_id).
        // Join relies on this as its ON CONFLICT target.
        manager
            .create_index(
                Index::create()
                    .name("uniq_user_commons_commons_user")
                    .table(UserCommons::Table)
                    .col(UserCommons::CommonsId)
                    .col(UserCommons::UserId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // UserCommons: member listing by commons
        manager
            .create_index(
                Index::create()
                    .name("idx_user_commons_commons")
                    .table(UserCommons::Table)
                    .col(UserCommons::CommonsId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_user_commons_commons").table(UserCommons::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_user_commons_commons_user").table(UserCommons::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserCommons { Table, CommonsId, UserId }
