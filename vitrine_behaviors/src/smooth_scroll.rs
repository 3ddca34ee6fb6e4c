// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated scrolling for same-page anchors.

use tracing::trace;
use vitrine_dom::{Document, ElementId};

use crate::host::{ScrollBehavior, ScrollHost, ScrollRequest};
use crate::types::Outcome;

/// Handles clicks on `href="#..."` anchors.
///
/// The anchors are collected once at install; anchors added to the document
/// later are not intercepted.
#[derive(Clone, Debug)]
pub struct SmoothScroller {
    anchors: Vec<ElementId>,
    header_offset: f64,
}

impl SmoothScroller {
    /// Intercept clicks on `anchors`, landing targets `header_offset` below the viewport top.
    pub fn new(anchors: Vec<ElementId>, header_offset: f64) -> Self {
        Self {
            anchors,
            header_offset,
        }
    }

    /// Intercepted anchors, in document order.
    pub fn anchors(&self) -> &[ElementId] {
        &self.anchors
    }

    /// Scroll offset that puts `target` just below the fixed header.
    pub fn target_offset(&self, doc: &Document, target: ElementId) -> Option<f64> {
        let rect = doc.bounding_client_rect(target)?;
        Some(rect.y0 + doc.scroll_y() - self.header_offset)
    }

    /// Resolve the fragment of `anchor`'s `href` to an element.
    ///
    /// `#` alone and unknown ids resolve to nothing.
    pub fn resolve(doc: &Document, anchor: ElementId) -> Option<ElementId> {
        let href = doc.attribute(anchor, "href")?;
        let id = href.strip_prefix('#')?;
        doc.element_by_id(id)
    }

    /// Click listener for `anchor`.
    ///
    /// Always prevents the default jump. Requests a smooth scroll when the
    /// fragment resolves; otherwise does nothing else.
    pub fn on_click(
        &self,
        anchor: ElementId,
        doc: &Document,
        host: &mut impl ScrollHost,
    ) -> Outcome {
        if let Some(target) = Self::resolve(doc, anchor)
            && let Some(top) = self.target_offset(doc, target)
        {
            trace!(top, "smooth scrolling to anchor target");
            host.scroll_to(ScrollRequest {
                top,
                behavior: ScrollBehavior::Smooth,
            });
        }
        Outcome::PreventDefault
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use kurbo::Rect;
    use vitrine_dom::ElementDesc;

    fn fixture() -> (Document, ElementId, ElementId, ElementId) {
        let mut doc = Document::new();
        let root = doc.root();
        doc.set_layout(root, Rect::new(0.0, 0.0, 1280.0, 5000.0));
        let to_contact = doc.insert(Some(root), ElementDesc::new("a").attr("href", "#contact"));
        let to_top = doc.insert(Some(root), ElementDesc::new("a").attr("href", "#"));
        let to_nowhere = doc.insert(Some(root), ElementDesc::new("a").attr("href", "#missing"));
        doc.insert(
            Some(root),
            ElementDesc::new("section")
                .id("contact")
                .layout(Rect::new(0.0, 3000.0, 1280.0, 3800.0)),
        );
        (doc, to_contact, to_top, to_nowhere)
    }

    #[test]
    fn scrolls_to_target_minus_header() {
        let (mut doc, to_contact, ..) = fixture();
        doc.set_scroll_y(400.0);
        let scroller = SmoothScroller::new(vec![to_contact], 80.0);
        let mut host = RecordingHost::new();
        assert_eq!(scroller.on_click(to_contact, &doc, &mut host), Outcome::PreventDefault);
        // Client top 2600 + scroll 400 - header 80.
        assert_eq!(
            host.requests(),
            [ScrollRequest {
                top: 2920.0,
                behavior: ScrollBehavior::Smooth
            }]
        );
    }

    #[test]
    fn offset_is_independent_of_current_scroll() {
        let (mut doc, to_contact, ..) = fixture();
        let scroller = SmoothScroller::new(vec![to_contact], 80.0);
        let contact = doc.element_by_id("contact").unwrap();
        let at_top = scroller.target_offset(&doc, contact);
        doc.set_scroll_y(1234.0);
        assert_eq!(scroller.target_offset(&doc, contact), at_top);
        assert_eq!(at_top, Some(2920.0));
    }

    #[test]
    fn bare_hash_and_missing_targets_only_prevent_default() {
        let (doc, _, to_top, to_nowhere) = fixture();
        let scroller = SmoothScroller::new(vec![to_top, to_nowhere], 80.0);
        let mut host = RecordingHost::new();
        assert_eq!(scroller.on_click(to_top, &doc, &mut host), Outcome::PreventDefault);
        assert_eq!(
            scroller.on_click(to_nowhere, &doc, &mut host),
            Outcome::PreventDefault
        );
        assert!(host.requests().is_empty());
    }

    #[test]
    fn resolve_requires_a_fragment() {
        let (mut doc, to_contact, to_top, _) = fixture();
        assert_eq!(SmoothScroller::resolve(&doc, to_top), None);
        assert_eq!(
            SmoothScroller::resolve(&doc, to_contact),
            doc.element_by_id("contact")
        );
        doc.set_attribute(to_contact, "href", "contact");
        assert_eq!(SmoothScroller::resolve(&doc, to_contact), None);
    }
}
