//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage is reached only through the [`ledger::LedgerStore`] trait.
//!
//! # Modules
//!
//! - `ledger` - Clients, accounts, movements and the balance invariant
//! - `currency` - Read-only projection of balances into other currencies

pub mod currency;
pub mod ledger;
