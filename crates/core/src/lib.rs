//! Pure domain logic for the FleetDesk asset import and lifecycle engine.
//!
//! This crate has no database, async, or I/O dependencies. It provides:
//!
//! - The tabular ingestor for delimited text ([`tabular`])
//! - The field-mapping suggestion heuristic ([`mapping`])
//! - Typed row projection for the reconciler ([`reconcile`])
//! - The per-batch outcome ledger ([`ledger`])
//! - The asset lifecycle status set and warranty clock ([`lifecycle`])

pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod mapping;
pub mod reconcile;
pub mod tabular;
pub mod types;
