pub mod access;
pub mod actor;
pub mod dto;
pub mod health;
pub mod role;
pub mod utils;
pub mod validators;
