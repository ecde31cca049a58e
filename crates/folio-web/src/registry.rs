#![forbid(unsafe_code)]

//! Element registry: the mapping between live elements and [`NodeId`]s.
//!
//! Generic over the element handle so the mapping logic is shared by the
//! `wasm32` host (`web_sys::Element`) and native tests.

use folio_core::NodeId;

/// Registered elements, indexed by [`NodeId`].
#[derive(Debug, Clone)]
pub struct ElementRegistry<E> {
    elements: Vec<E>,
}

impl<E> Default for ElementRegistry<E> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

impl<E: PartialEq> ElementRegistry<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `element`, returning its existing id if already known.
    pub fn register(&mut self, element: E) -> NodeId {
        if let Some(node) = self.lookup(&element) {
            return node;
        }
        let node = NodeId::new(self.elements.len() as u32);
        self.elements.push(element);
        node
    }

    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&E> {
        self.elements.get(node.index())
    }

    #[must_use]
    pub fn lookup(&self, element: &E) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|known| known == element)
            .map(|index| NodeId::new(index as u32))
    }

    /// Registered elements among `ancestors` (target first, then parents),
    /// innermost first.
    pub fn path<I>(&self, ancestors: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = E>,
    {
        ancestors
            .into_iter()
            .filter_map(|element| self.lookup(&element))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent() {
        let mut registry = ElementRegistry::new();
        let a = registry.register("body");
        let b = registry.register("nav");
        assert_eq!(registry.register("body"), a);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(b), Some(&"nav"));
    }

    #[test]
    fn path_keeps_only_registered_ancestors() {
        let mut registry = ElementRegistry::new();
        let body = registry.register("body");
        let card = registry.register("card");
        let path = registry.path(["span", "card", "div", "body", "html"]);
        assert_eq!(path, vec![card, body]);
    }

    #[test]
    fn unknown_node_resolves_to_nothing() {
        let registry: ElementRegistry<&str> = ElementRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.get(NodeId::new(3)), None);
    }
}
