//! The Agora vote ledger.
//!
//! Coordinates the storage traits into the three ledger operations:
//! eligibility upserts, the transactional single-choice vote cast, and
//! quadratic allocation. All mutations go through the store's conditional
//! commits; the ledger itself holds no locks and no mutable state, so any
//! number of stateless instances can run against one backend.

pub mod cast;
pub mod eligibility;
pub mod error;
pub mod quadratic;

pub use cast::{CastOutcome, VoteLedger};
pub use eligibility::EligibilityLedger;
pub use error::LedgerError;
