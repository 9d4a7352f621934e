//! Business services orchestrating the repositories.

pub mod auth;
pub mod cart;
