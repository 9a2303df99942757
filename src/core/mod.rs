//! Core domain logic

pub mod models;
pub mod roles;
pub mod users;
