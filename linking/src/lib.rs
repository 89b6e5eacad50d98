//! Device-linking coordinator.
//!
//! Linking a new device is the one flow that mutates who controls a
//! pseudonym, so it is deliberately harder than logging in: the new device
//! redeems a single-use QR token, the acting person must then re-prove
//! their identity through a full eID round (possession of the scanned
//! link is never sufficient), and only then does the coordinator hand off
//! to the credential registry's registration ceremony.

pub mod coordinator;
pub mod error;

pub use coordinator::LinkCoordinator;
pub use error::LinkError;
