mod db;
mod error;
mod schema;

pub mod event;
pub mod membership;
pub mod org;
pub mod project;
pub mod user;

pub use db::{DbMapper, create_db_mapper, create_db_pool};
pub use error::{Error, Result};

#[cfg(feature = "test")]
pub use db::create_test_db_mapper;
