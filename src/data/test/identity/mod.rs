use crate::{
    data::identity::IdentityRepository,
    model::identity::{IdentityKey, ProfileUpdate},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::user_data::UserDataFactory};

mod find_all_with_refresh_token;
mod find_by_discord_id;
mod find_by_discord_username;
mod find_by_name;
mod find_by_vid;
mod find_with_refresh_token_older_than;
mod update_discord_id_for_vid;
mod update_profile;
mod update_refresh_token;
