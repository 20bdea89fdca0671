//! Client ledger.
//!
//! This module implements the balance-consistency rules:
//! - Detail lines and their categories
//! - Entry/egress totals
//! - The non-negative balance gate for applying and reversing movements
//! - The movement lifecycle with atomic commits through a record store
//! - Client and account operations

pub mod amount;
pub mod balance;
pub mod client;
pub mod detail;
pub mod error;
pub mod lifecycle;
pub mod locks;
pub mod memory;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod service_props;

pub use amount::{MovementTotals, total_egress, total_entry};
pub use balance::BalanceEngine;
pub use client::{Client, ClientName};
pub use detail::{DetailInput, DetailKind, MovementDetail};
pub use error::LedgerError;
pub use lifecycle::{MovementLifecycle, MovementState};
pub use locks::AccountLocks;
pub use memory::MemoryStore;
pub use service::LedgerService;
pub use store::{LedgerStore, StoreError};
pub use types::{Account, AccountView, Movement};
