use sea_orm_migration::prelude::*;

use super::m20251210_000001_create_user_data_table::UserData;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_user_data_discord_user_id")
                    .table(UserData::Table)
                    .col(UserData::DiscordUserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_data_vid")
                    .table(UserData::Table)
                    .col(UserData::Vid)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_data_vid")
                    .table(UserData::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_data_discord_user_id")
                    .table(UserData::Table)
                    .to_owned(),
            )
            .await
    }
}
