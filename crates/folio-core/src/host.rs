#![forbid(unsafe_code)]

//! Capabilities the runtime consumes from its host.
//!
//! Only read access to layout and preference storage is modeled as a trait;
//! everything the runtime *changes* travels as an [`crate::Effect`].

use crate::geometry::SectionGeometry;
use crate::node::NodeId;

/// Live layout queries against the host page.
///
/// Every call is a fresh measurement. Implementations must not cache:
/// the reveal tracker relies on `client_top` reflecting the true current
/// position even while the runtime's own geometry cache is stale.
pub trait LayoutProbe {
    /// Current vertical scroll offset of the window.
    fn scroll_y(&self) -> f64;

    /// Current viewport height.
    fn viewport_height(&self) -> f64;

    /// Offset from the page top and rendered height of `node`.
    ///
    /// Returns `None` when the host can no longer resolve the element.
    fn measure(&self, node: NodeId) -> Option<SectionGeometry>;

    /// Distance from the viewport's top edge to the top of `node`'s bounding box.
    fn client_top(&self, node: NodeId) -> Option<f64>;
}

/// String preferences that survive page reloads.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);
}

impl<P: LayoutProbe + ?Sized> LayoutProbe for &P {
    fn scroll_y(&self) -> f64 {
        (**self).scroll_y()
    }

    fn viewport_height(&self) -> f64 {
        (**self).viewport_height()
    }

    fn measure(&self, node: NodeId) -> Option<SectionGeometry> {
        (**self).measure(node)
    }

    fn client_top(&self, node: NodeId) -> Option<f64> {
        (**self).client_top(node)
    }
}
