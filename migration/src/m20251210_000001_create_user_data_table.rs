use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserData::Table)
                    .if_not_exists()
                    .col(pk_auto(UserData::Id))
                    .col(string_null(UserData::Vid))
                    .col(string_null(UserData::DiscordUserId))
                    .col(string_null(UserData::DiscordUsername))
                    .col(string_null(UserData::Firstname))
                    .col(string_null(UserData::Lastname))
                    .col(text_null(UserData::RefreshToken))
                    .col(timestamp_with_time_zone_null(UserData::RefreshTokenDate))
                    .col(boolean(UserData::Verified).default(false))
                    .col(boolean(UserData::IsBanned).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserData::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserData {
    Table,
    Id,
    Vid,
    DiscordUserId,
    DiscordUsername,
    Firstname,
    Lastname,
    RefreshToken,
    RefreshTokenDate,
    Verified,
    IsBanned,
}
