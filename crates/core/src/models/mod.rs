//! Domain entities and request/response shapes.

pub mod user;
pub mod wallet;
