//! `SeaORM` entities.

pub mod accounts;
pub mod clients;
pub mod movement_details;
pub mod movements;
