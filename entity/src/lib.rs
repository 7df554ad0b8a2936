//! SeaORM entities for the IVAO authentication bot.

pub mod prelude;
pub mod user_data;
