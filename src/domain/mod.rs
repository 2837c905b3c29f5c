//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Only catalog record types, repository trait definitions and domain error types.

pub mod errors;
pub mod records;
pub mod repositories;

pub use errors::DomainError;
pub use records::*;
pub use repositories::*;
