//! Domain core for the account and wallet backend.
//!
//! The centerpiece is a declarative validation engine: named rules are
//! declared per field, resolved against any serializable record at runtime,
//! and evaluated in full, so one request yields every violated rule at once.
//! Around it sit the domain model, the per-operation validators, and the
//! services that orchestrate validation against a pluggable persistence
//! port.
//!
//! HTTP transport, token issuance, and concrete storage backends are the
//! embedder's concern; this crate reaches persistence only through the
//! [`repository::Repository`] contract.

pub mod error;
pub mod models;
pub mod password;
pub mod repository;
pub mod services;
pub mod types;
pub mod validation;
