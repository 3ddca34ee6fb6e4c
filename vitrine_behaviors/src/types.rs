// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core event types: kinds, phases, handler outcomes, parent lookups and dispatch steps.
//!
//! These types are shared by the [`router`](crate::router), the [`hover`](crate::hover)
//! tracker and the [`page`](crate::page) registration table.

use vitrine_dom::{Document, ElementId};

/// Browser-style events the page reacts to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// The viewport scroll offset changed. Delivered to window listeners.
    Scroll,
    /// A primary-button activation on an element. Bubbles.
    Click,
    /// The pointer entered an element's box. Does not bubble.
    PointerEnter,
    /// The pointer left an element's box. Does not bubble.
    PointerLeave,
}

impl EventKind {
    /// Whether listeners on ancestors of the target see the event.
    pub const fn bubbles(self) -> bool {
        matches!(self, Self::Click)
    }
}

/// Phases of event propagation.
///
/// Appears on each [`Dispatch`] item produced by [`Router::route`](crate::router::Router::route).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root-to-parent traversal, before the target.
    Capture,
    /// The target element.
    Target,
    /// Parent-to-root traversal, after the target.
    Bubble,
}

/// Handler outcome.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Outcome {
    /// Nothing further to report.
    #[default]
    Continue,
    /// Suppress the platform default action (for clicks: jump navigation).
    /// Propagation still continues.
    PreventDefault,
}

/// Look up the parent of a node to reconstruct a root→target path.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

impl<K, T: ParentLookup<K> + ?Sized> ParentLookup<K> for &T {
    #[inline]
    fn parent_of(&self, node: &K) -> Option<K> {
        (**self).parent_of(node)
    }
}

impl ParentLookup<ElementId> for Document {
    #[inline]
    fn parent_of(&self, node: &ElementId) -> Option<ElementId> {
        Self::parent_of(self, *node)
    }
}

/// A single dispatch step.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dispatch<K> {
    /// Propagation phase for this step.
    pub phase: Phase,
    /// Node whose listeners run in this step.
    pub node: K,
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_dom::ElementDesc;

    #[test]
    fn only_clicks_bubble() {
        assert!(EventKind::Click.bubbles());
        assert!(!EventKind::Scroll.bubbles());
        assert!(!EventKind::PointerEnter.bubbles());
        assert!(!EventKind::PointerLeave.bubbles());
    }

    #[test]
    fn document_is_a_parent_lookup() {
        let mut doc = Document::new();
        let nav = doc.insert(Some(doc.root()), ElementDesc::new("nav"));
        let lookup: &dyn ParentLookup<ElementId> = &doc;
        assert_eq!(lookup.parent_of(&nav), Some(doc.root()));
        assert_eq!(lookup.parent_of(&doc.root()), None);
    }
}
