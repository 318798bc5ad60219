//! Core types for the resolution chain.

use retrace_core_types::ElementHandle;
use serde::{Deserialize, Serialize};

/// Resolution strategy enumeration, ordered most-specific first.
///
/// Ids and selectors rot before visible text does, so the chain runs from
/// most-specific to most-durable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveStrategy {
    /// Exact identifier lookup
    Id,

    /// Structural CSS selector lookup
    Selector,

    /// Text containment, tag-scoped when the descriptor carries a tag
    Text,

    /// Absolute XPath lookup
    XPath,
}

impl ResolveStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            ResolveStrategy::Id => "id",
            ResolveStrategy::Selector => "selector",
            ResolveStrategy::Text => "text",
            ResolveStrategy::XPath => "xpath",
        }
    }

    /// All strategies in fallback order. The ordering is a data-level
    /// contract; callers must not reorder it.
    pub fn fallback_chain() -> [ResolveStrategy; 4] {
        [
            ResolveStrategy::Id,
            ResolveStrategy::Selector,
            ResolveStrategy::Text,
            ResolveStrategy::XPath,
        ]
    }
}

/// Successful resolution of a descriptor onto a live node.
///
/// The handle is only valid for the current replay step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedElement {
    pub handle: ElementHandle,

    /// Strategy that produced the match.
    pub strategy: ResolveStrategy,

    /// 1-based attempt on which the match was found.
    pub attempt: u32,
}
