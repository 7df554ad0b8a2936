//! Factory methods for creating test data.
//!
//! Factories create identity records with sensible defaults so repository and
//! service tests only spell out the columns they care about.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let record = factory::create_user_data(&db).await?;
//!
//!     // Customize with the builder
//!     let banned = factory::user_data::UserDataFactory::new(&db)
//!         .vid("654321")
//!         .banned(true)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod helpers;
pub mod user_data;

pub use user_data::create_user_data;
