//! Action replay against a resolved live element.
//!
//! Bring into view, highlight briefly, then dispatch the recorded action,
//! with a fixed settle delay between phases so page reactions complete
//! before the next phase begins.

pub mod errors;
pub mod player;
pub mod ports;

pub use errors::*;
pub use player::*;
pub use ports::*;
