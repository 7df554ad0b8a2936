pub use super::user_data::Entity as UserData;
