//! Core data models for chairside
//!
//! All models are plain serde-serializable structs. Monetary values use the
//! whole-unit [`Amount`] type; entity references use the strongly-typed ID
//! wrappers from [`ids`].

pub mod consultation;
pub mod expense;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod payment;
pub mod transaction;

pub use consultation::{Consultation, ConsultationStatus};
pub use expense::Expense;
pub use ids::{ConsultationId, ExpenseId, LedgerEntryId, TransactionId};
pub use ledger::{EntryKind, LedgerEntry};
pub use money::Amount;
pub use payment::{PaymentLine, PaymentMethod, PaymentSlot, SourceRef};
pub use transaction::{Payment, Transaction};
