#![forbid(unsafe_code)]

//! Geometric snapshots.

/// Vertical placement of a page section, as last measured by the host.
///
/// Values are in CSS pixels. A snapshot is only valid at the moment it was
/// taken: any layout-affecting change (viewport resize, content reflow)
/// makes it stale until the next measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SectionGeometry {
    /// Distance from the top of the page to the section's top edge.
    pub offset_top: f64,
    /// Rendered height of the section.
    pub height: f64,
}

impl SectionGeometry {
    /// Create a new snapshot.
    #[inline]
    #[must_use]
    pub const fn new(offset_top: f64, height: f64) -> Self {
        Self { offset_top, height }
    }

    /// Whether the page-space position `y` lies on or below the section's top edge.
    #[inline]
    #[must_use]
    pub fn starts_at_or_above(&self, y: f64) -> bool {
        self.offset_top <= y
    }
}
