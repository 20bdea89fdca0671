//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod client;
pub mod movement;

pub use account::AccountRepository;
pub use client::ClientRepository;
pub use movement::{MovementRepository, MovementWithDetails, NewDetail, NewMovement};
