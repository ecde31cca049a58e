#![forbid(unsafe_code)]

//! Cached section geometry.
//!
//! The cache is built once from the live page and afterwards only refreshed
//! in place. Its entry list is fixed: index `i` always describes the `i`-th
//! section in document order. Reads between refreshes may observe stale
//! geometry; that staleness is accepted (see [`super::resize`]).

use folio_core::{LayoutProbe, NodeId, SectionGeometry, SectionOutline};

/// One cached section.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedSection {
    /// Weak handle to the section element.
    pub node: NodeId,
    /// The section's `id` attribute, if any.
    pub id: Option<String>,
    /// Geometry as of the last build or refresh.
    pub geometry: SectionGeometry,
}

/// Ordered per-section geometry snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryCache {
    entries: Vec<CachedSection>,
}

impl GeometryCache {
    /// Snapshot every section in document order.
    ///
    /// A section the host cannot measure starts with zero geometry.
    #[must_use]
    pub fn build(sections: &[SectionOutline], probe: &dyn LayoutProbe) -> Self {
        let entries = sections
            .iter()
            .map(|section| CachedSection {
                node: section.node,
                id: section.id.clone(),
                geometry: probe.measure(section.node).unwrap_or_default(),
            })
            .collect();
        Self { entries }
    }

    /// Re-measure every entry in place.
    ///
    /// Order and identity are preserved. An entry whose element can no
    /// longer be measured keeps its previous snapshot. Returns the number of
    /// entries that were re-measured.
    pub fn refresh(&mut self, probe: &dyn LayoutProbe) -> usize {
        let mut measured = 0;
        for entry in &mut self.entries {
            if let Some(geometry) = probe.measure(entry.node) {
                entry.geometry = geometry;
                measured += 1;
            }
        }
        measured
    }

    /// Index of the current section for page-space position `scroll_pos`.
    ///
    /// Scans bottom-up and returns the first section whose top edge is at or
    /// above `scroll_pos`, so when sections overlap (or have zero height) the
    /// later one wins. `None` means the position is above every section.
    #[must_use]
    pub fn current_index(&self, scroll_pos: f64) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|entry| entry.geometry.starts_at_or_above(scroll_pos))
    }

    #[must_use]
    pub fn entries(&self) -> &[CachedSection] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CachedSection> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct TableProbe {
        geometry: RefCell<HashMap<NodeId, SectionGeometry>>,
    }

    impl TableProbe {
        fn set(&self, node: u32, offset_top: f64, height: f64) {
            self.geometry
                .borrow_mut()
                .insert(NodeId::new(node), SectionGeometry::new(offset_top, height));
        }

        fn forget(&self, node: u32) {
            self.geometry.borrow_mut().remove(&NodeId::new(node));
        }
    }

    impl LayoutProbe for TableProbe {
        fn scroll_y(&self) -> f64 {
            0.0
        }

        fn viewport_height(&self) -> f64 {
            800.0
        }

        fn measure(&self, node: NodeId) -> Option<SectionGeometry> {
            self.geometry.borrow().get(&node).copied()
        }

        fn client_top(&self, node: NodeId) -> Option<f64> {
            self.measure(node).map(|g| g.offset_top)
        }
    }

    fn outline() -> Vec<SectionOutline> {
        vec![
            SectionOutline::new(NodeId::new(1), "home"),
            SectionOutline::new(NodeId::new(2), "about"),
            SectionOutline::new(NodeId::new(3), "contact"),
        ]
    }

    fn probe() -> TableProbe {
        let probe = TableProbe::default();
        probe.set(1, 0.0, 600.0);
        probe.set(2, 600.0, 800.0);
        probe.set(3, 1400.0, 500.0);
        probe
    }

    #[test]
    fn build_preserves_document_order() {
        let cache = GeometryCache::build(&outline(), &probe());
        let ids: Vec<_> = cache.entries().iter().map(|e| e.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("home"), Some("about"), Some("contact")]);
        assert_eq!(cache.get(1).map(|e| e.geometry.offset_top), Some(600.0));
    }

    #[test]
    fn empty_outline_builds_empty_cache() {
        let cache = GeometryCache::build(&[], &probe());
        assert!(cache.is_empty());
        assert_eq!(cache.current_index(10_000.0), None);
    }

    #[test]
    fn refresh_updates_in_place() {
        let probe = probe();
        let mut cache = GeometryCache::build(&outline(), &probe);
        probe.set(2, 900.0, 400.0);
        assert_eq!(cache.refresh(&probe), 3);
        assert_eq!(cache.len(), 3);
        assert_eq!(
            cache.get(1).map(|e| e.geometry),
            Some(SectionGeometry::new(900.0, 400.0))
        );
        assert_eq!(cache.get(1).map(|e| e.node), Some(NodeId::new(2)));
    }

    #[test]
    fn refresh_keeps_snapshot_of_unmeasurable_entry() {
        let probe = probe();
        let mut cache = GeometryCache::build(&outline(), &probe);
        probe.forget(3);
        assert_eq!(cache.refresh(&probe), 2);
        assert_eq!(
            cache.get(2).map(|e| e.geometry),
            Some(SectionGeometry::new(1400.0, 500.0))
        );
    }

    #[test]
    fn current_index_prefers_later_section_on_ties() {
        let probe = TableProbe::default();
        probe.set(1, 0.0, 0.0);
        probe.set(2, 0.0, 0.0);
        probe.set(3, 500.0, 100.0);
        let cache = GeometryCache::build(&outline(), &probe);
        assert_eq!(cache.current_index(100.0), Some(1));
        assert_eq!(cache.current_index(500.0), Some(2));
        assert_eq!(cache.current_index(-1.0), None);
    }
}
