//! Audit logging system for chairside
//!
//! Records all create, update, delete operations with before/after values
//! in an append-only audit log. The audit trail is how operators detect
//! drift between source records and the cash register, so every source
//! mutation must land here even when reconciliation fails.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
