//! Service facade for the eligibility and vote ledger.
//!
//! `CoreService` owns the ledgers, the credential registry, and the
//! device-linking coordinator, and exposes them as a set of operations
//! with serde-serializable request/response types. This is the only
//! layer that talks in strings and hex; everything below it works with
//! the typed vocabulary of `agora-types`.
//!
//! It is also the only layer allowed to see a raw national identifier,
//! and then only for the duration of one `verify_identity` call.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod service;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use logging::{init_logging, LogFormat};
pub use service::CoreService;
