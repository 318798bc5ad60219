//! Replay orchestration.
//!
//! Owns the session state machine
//! (`Idle -> Replaying -> {Succeeded | Failed} -> Idle`), drives the
//! resolver and player per recorded step, reports progress, and appends
//! the captured trace to the report on success. Collaborators (recorder,
//! progress sink, store, screenshot provider, outcome surface) are
//! reached only through port traits.

pub mod errors;
pub mod orchestrator;
pub mod policy;
pub mod ports;
pub mod session;

pub use errors::*;
pub use orchestrator::*;
pub use policy::*;
pub use ports::*;
pub use session::*;
