#![forbid(unsafe_code)]

//! Opaque element handles.

use std::fmt;

/// Handle to an element owned by the host page.
///
/// The runtime never holds the element itself. Hosts assign handles when
/// they discover the page outline and resolve them back to live elements
/// when applying effects. Two handles are equal exactly when they refer to
/// the same element, which makes `NodeId` the identity used by the reveal
/// tracker (section `id` strings may collide or be missing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Wrap a raw host index.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw host index.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Host index as `usize`, for registry lookups.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_raw_index() {
        assert_eq!(NodeId::new(7).to_string(), "node#7");
    }

    #[test]
    fn index_round_trips_raw_value() {
        let node = NodeId::new(42);
        assert_eq!(node.get(), 42);
        assert_eq!(node.index(), 42);
    }
}
