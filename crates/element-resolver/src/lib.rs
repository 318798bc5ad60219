//! Multi-strategy element resolution.
//!
//! Maps a recorded [`ElementDescriptor`] back onto a live document whose
//! structure may have drifted since recording:
//! - exact id lookup (most specific)
//! - CSS selector lookup
//! - text containment, scoped to the recorded tag when present
//! - absolute XPath lookup
//!
//! Strategies run in that fixed order within each attempt; misses fall
//! through, attempts are separated by a fixed backoff.
//!
//! [`ElementDescriptor`]: retrace_core_types::ElementDescriptor

pub mod errors;
pub mod ports;
pub mod resolver;
pub mod strategies;
pub mod types;

pub use errors::*;
pub use ports::*;
pub use resolver::*;
pub use strategies::*;
pub use types::*;
