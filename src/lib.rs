//! # Bank Reconciler
//!
//! Reconciles a bank statement against an operational expense report to find
//! the charges nobody has filed an expense for yet.
//!
//! ## Features
//!
//! - **Tabular parsing**: header-first delimited text into field mappings
//! - **Record normalization**: field-name fallbacks and defaults for bank and expense rows
//! - **Matching**: amount tolerance plus case-insensitive description containment
//! - **Receipt reminders**: notification requests for unreported charges
//! - **Employee directory**: storage-agnostic list of people to remind
//!
//! ## Quick Start
//!
//! ```rust
//! use bank_reconciler::ReconciliationSession;
//!
//! let mut session = ReconciliationSession::default();
//! session
//!     .load_bank_statement("Date,Description,Amount\n2024-03-01,Shell Gas,42.50\n")
//!     .unwrap();
//! session
//!     .load_expense_report("Date,Vendor,Total\n2024-03-01,Shell,42.50\n")
//!     .unwrap();
//!
//! assert!(session.transaction("bank-0").unwrap().reported);
//! ```

pub mod directory;
pub mod ingest;
pub mod notification;
pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use directory::*;
pub use ingest::*;
pub use notification::*;
pub use reconciliation::*;
pub use traits::*;
pub use types::*;
