// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Portfolio item hover overlays.

use vitrine_dom::{Document, ElementId, Selector, Transform};

/// Reveals an item's overlay on pointer-enter and hides it on pointer-leave.
///
/// The overlay is the first descendant matching the overlay selector; its heading
/// is the first descendant of the overlay matching the heading selector. Items
/// without an overlay are left alone.
#[derive(Clone, Debug)]
pub struct HoverOverlay {
    items: Vec<ElementId>,
    overlay: Selector,
    heading: Selector,
    heading_hidden_offset: f64,
}

impl HoverOverlay {
    /// Track `items`.
    pub fn new(
        items: Vec<ElementId>,
        overlay: Selector,
        heading: Selector,
        heading_hidden_offset: f64,
    ) -> Self {
        Self {
            items,
            overlay,
            heading,
            heading_hidden_offset,
        }
    }

    /// Tracked items, in document order.
    pub fn items(&self) -> &[ElementId] {
        &self.items
    }

    /// Pointer entered `item`.
    pub fn pointer_enter(&self, item: ElementId, doc: &mut Document) {
        self.apply(item, doc, true);
    }

    /// Pointer left `item`.
    pub fn pointer_leave(&self, item: ElementId, doc: &mut Document) {
        self.apply(item, doc, false);
    }

    fn apply(&self, item: ElementId, doc: &mut Document, revealed: bool) {
        let Some(overlay) = doc.query_within(item, &self.overlay) else {
            return;
        };
        doc.set_opacity(overlay, if revealed { 1.0 } else { 0.0 });
        if let Some(heading) = doc.query_within(overlay, &self.heading) {
            let dy = if revealed { 0.0 } else { self.heading_hidden_offset };
            doc.set_transform(heading, Transform::TranslateY(dy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_dom::ElementDesc;

    fn overlay_for(items: Vec<ElementId>) -> HoverOverlay {
        HoverOverlay::new(
            items,
            Selector::parse(".item-overlay").unwrap(),
            Selector::parse("h4").unwrap(),
            20.0,
        )
    }

    #[test]
    fn enter_then_leave_restores_hidden_state() {
        let mut doc = Document::new();
        let item = doc.insert(Some(doc.root()), ElementDesc::new("div").class("portfolio-item"));
        let overlay = doc.insert(Some(item), ElementDesc::new("div").class("item-overlay"));
        let heading = doc.insert(Some(overlay), ElementDesc::new("h4"));
        let hover = overlay_for(vec![item]);

        hover.pointer_enter(item, &mut doc);
        assert_eq!(doc.style(overlay).unwrap().opacity, Some(1.0));
        assert_eq!(
            doc.style(heading).unwrap().transform,
            Some(Transform::TranslateY(0.0))
        );

        hover.pointer_leave(item, &mut doc);
        assert_eq!(doc.style(overlay).unwrap().opacity, Some(0.0));
        assert_eq!(
            doc.style(heading).unwrap().transform,
            Some(Transform::TranslateY(20.0))
        );
    }

    #[test]
    fn overlay_without_heading_still_fades() {
        let mut doc = Document::new();
        let item = doc.insert(Some(doc.root()), ElementDesc::new("div"));
        let overlay = doc.insert(Some(item), ElementDesc::new("div").class("item-overlay"));
        overlay_for(vec![item]).pointer_enter(item, &mut doc);
        assert_eq!(doc.style(overlay).unwrap().opacity, Some(1.0));
    }

    #[test]
    fn item_without_overlay_is_untouched() {
        let mut doc = Document::new();
        let item = doc.insert(Some(doc.root()), ElementDesc::new("div"));
        let stray = doc.insert(Some(doc.root()), ElementDesc::new("h4"));
        let hover = overlay_for(vec![item]);
        hover.pointer_enter(item, &mut doc);
        hover.pointer_leave(item, &mut doc);
        assert!(doc.style(item).unwrap().is_empty());
        assert!(doc.style(stray).unwrap().is_empty());
    }
}
