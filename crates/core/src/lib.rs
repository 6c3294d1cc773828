//! Domain logic for the Vigie alert triage service.
//!
//! Everything in this crate is pure and I/O-free: status/severity mapping,
//! the alert lifecycle state machine, campaign lookup, the loosely-typed
//! alert data bag, filter composition, and dashboard aggregation. The `db`
//! and `api` crates build on these types.

pub mod alert_data;
pub mod campaign;
pub mod error;
pub mod filter;
pub mod severity;
pub mod stats;
pub mod status;
pub mod types;
