// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, mutation, geometry, queries.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Write as _;
use kurbo::{Point, Rect, Size};

use crate::selector::{AttrMatch, Compound, Selector};
use crate::style::{Display, InlineStyle, Transform};
use crate::types::{ElementDesc, ElementId};

/// Results of a hit test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    /// The matched element.
    pub element: ElementId,
    /// Path from the root to the element (inclusive).
    pub path: Vec<ElementId>,
}

#[derive(Clone, Debug)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    style: InlineStyle,
    layout: Rect,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(desc: ElementDesc) -> Self {
        Self {
            tag: desc.tag,
            classes: desc.classes,
            attributes: desc.attributes,
            style: InlineStyle::default(),
            layout: desc.layout,
            parent: None,
            children: Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn matches_compound(&self, c: &Compound) -> bool {
        if let Some(tag) = &c.tag
            && !self.tag.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &c.id
            && self.attribute("id") != Some(id.as_str())
        {
            return false;
        }
        c.classes
            .iter()
            .all(|class| self.classes.iter().any(|have| have == class))
            && c.attrs.iter().all(|a| self.matches_attr(a))
    }

    /// The class list stands in for the `class` attribute.
    fn matches_attr(&self, a: &AttrMatch) -> bool {
        if a.name.eq_ignore_ascii_case("class") {
            return !self.classes.is_empty() && a.op.matches(&self.classes.join(" "));
        }
        self.attribute(&a.name).is_some_and(|value| a.op.matches(value))
    }
}

/// A DOM-like document: a single rooted element tree plus a viewport.
///
/// The root is a `body` element created by [`Document::new`]. Elements made
/// with [`Document::create_element`] stay detached (invisible to queries and
/// hit tests) until appended somewhere under the root.
///
/// Layout is an input: each element carries a border box in document
/// coordinates that the caller supplies (see [`ElementDesc::layout`] and
/// [`Document::set_layout`]). The document never computes layout itself.
#[derive(Clone)]
pub struct Document {
    elements: Vec<Element>,
    root: ElementId,
    scroll_y: f64,
    viewport: Size,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.elements.len())
            .field("scroll_y", &self.scroll_y)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Default viewport size for new documents.
    pub const DEFAULT_VIEWPORT: Size = Size::new(1280.0, 800.0);

    /// Create a document holding only its `body` root.
    pub fn new() -> Self {
        Self {
            elements: alloc::vec![Element::new(ElementDesc::new("body"))],
            root: ElementId::new(0),
            scroll_y: 0.0,
            viewport: Self::DEFAULT_VIEWPORT,
        }
    }

    /// The root (`body`) element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Number of elements, attached or not.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false: a document has at least its root.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.idx())
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.idx())
    }

    /// Returns true if `id` names an element of this document.
    pub fn contains(&self, id: ElementId) -> bool {
        id.idx() < self.elements.len()
    }

    /// Insert a new element as the last child of `parent`, or detached if `None`.
    ///
    /// An unknown `parent` leaves the element detached.
    pub fn insert(&mut self, parent: Option<ElementId>, desc: ElementDesc) -> ElementId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ElementId uses 32-bit indices."
        )]
        let id = ElementId::new(self.elements.len() as u32);
        self.elements.push(Element::new(desc));
        if let Some(p) = parent {
            self.append_child(p, id);
        }
        id
    }

    /// Create a detached element with the given tag.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.insert(None, ElementDesc::new(tag))
    }

    /// Append `child` as the last child of `parent`, detaching it from any previous parent.
    ///
    /// Ignored when either id is unknown, or when `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.contains(parent) || !self.contains(child) || child == self.root {
            return;
        }
        if self.ancestors_inclusive(parent).any(|a| a == child) {
            return;
        }
        if let Some(old) = self.elements[child.idx()].parent {
            self.elements[old.idx()].children.retain(|&c| c != child);
        }
        self.elements[child.idx()].parent = Some(parent);
        self.elements[parent.idx()].children.push(child);
    }

    /// Parent of `id`, if attached below another element.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.get(id)?.parent
    }

    /// Children of `id` in document order; empty for unknown ids.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map_or(&[], |e| e.children.as_slice())
    }

    fn ancestors_inclusive(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        core::iter::successors(self.contains(id).then_some(id), |&cur| self.parent_of(cur))
    }

    /// Path from the topmost ancestor down to `id` (inclusive).
    pub fn path_to_root(&self, id: ElementId) -> Vec<ElementId> {
        let mut out: Vec<ElementId> = self.ancestors_inclusive(id).collect();
        out.reverse();
        out
    }

    /// True when `id` is the root or hangs below it.
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.ancestors_inclusive(id).any(|a| a == self.root)
    }

    /// Descendants of `scope` (excluding `scope`) in pre-order document order.
    pub fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    // --- attributes and classes -------------------------------------------

    /// Tag name of `id`.
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|e| e.tag.as_str())
    }

    /// Attribute value. `class` is not exposed here; use the class methods.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id)?.attribute(name)
    }

    /// Set an attribute; `class` replaces the class list.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        let Some(e) = self.get_mut(id) else {
            return;
        };
        if name.eq_ignore_ascii_case("class") {
            e.classes = value.split_whitespace().map(ToString::to_string).collect();
            return;
        }
        match e
            .attributes
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value.to_string(),
            None => e
                .attributes
                .push((name.to_ascii_lowercase(), value.to_string())),
        }
    }

    /// The `id` attribute of `id`.
    pub fn element_id(&self, id: ElementId) -> Option<&str> {
        self.attribute(id, "id")
    }

    /// Class list of `id`.
    pub fn classes(&self, id: ElementId) -> &[String] {
        self.get(id).map_or(&[], |e| e.classes.as_slice())
    }

    /// Returns true if `id` carries `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    /// Add `class` if missing.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(e) = self.get_mut(id)
            && !e.classes.iter().any(|c| c == class)
        {
            e.classes.push(class.to_string());
        }
    }

    /// Remove `class` if present.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(e) = self.get_mut(id) {
            e.classes.retain(|c| c != class);
        }
    }

    /// Add `class` when `force` is true, remove it otherwise.
    pub fn toggle_class(&mut self, id: ElementId, class: &str, force: bool) {
        if force {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    // --- inline styles ----------------------------------------------------

    /// Inline style of `id`.
    pub fn style(&self, id: ElementId) -> Option<&InlineStyle> {
        self.get(id).map(|e| &e.style)
    }

    /// Set `display`.
    pub fn set_display(&mut self, id: ElementId, display: Display) {
        if let Some(e) = self.get_mut(id) {
            e.style.display = Some(display);
        }
    }

    /// Set `opacity`, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, id: ElementId, opacity: f64) {
        if let Some(e) = self.get_mut(id) {
            e.style.opacity = Some(opacity.clamp(0.0, 1.0));
        }
    }

    /// Set `transform`.
    pub fn set_transform(&mut self, id: ElementId, transform: Transform) {
        if let Some(e) = self.get_mut(id) {
            e.style.transform = Some(transform);
        }
    }

    /// True if `id` or one of its ancestors has `display: none`.
    pub fn is_display_none(&self, id: ElementId) -> bool {
        self.ancestors_inclusive(id)
            .any(|a| self.elements[a.idx()].style.display == Some(Display::None))
    }

    // --- geometry and viewport --------------------------------------------

    /// Border box of `id` in document coordinates.
    pub fn layout(&self, id: ElementId) -> Option<Rect> {
        self.get(id).map(|e| e.layout)
    }

    /// Replace the border box of `id`.
    pub fn set_layout(&mut self, id: ElementId, layout: Rect) {
        if let Some(e) = self.get_mut(id) {
            e.layout = layout;
        }
    }

    /// Distance from the document top to the top of `id`.
    pub fn offset_top(&self, id: ElementId) -> Option<f64> {
        self.layout(id).map(|r| r.y0)
    }

    /// Height of the border box of `id`.
    pub fn offset_height(&self, id: ElementId) -> Option<f64> {
        self.layout(id).map(|r| r.height())
    }

    /// Border box of `id` relative to the viewport, i.e. shifted by the scroll offset.
    pub fn bounding_client_rect(&self, id: ElementId) -> Option<Rect> {
        self.layout(id).map(|r| r - kurbo::Vec2::new(0.0, self.scroll_y))
    }

    /// Viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resize the viewport; the scroll offset is re-clamped.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.set_scroll_y(self.scroll_y);
    }

    /// Bottom edge of the lowest attached element.
    pub fn scroll_height(&self) -> f64 {
        core::iter::once(self.root)
            .chain(self.descendants(self.root))
            .map(|id| self.elements[id.idx()].layout.y1)
            .fold(0.0, f64::max)
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll_y(&self) -> f64 {
        (self.scroll_height() - self.viewport.height).max(0.0)
    }

    /// Current vertical scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Set the vertical scroll offset, clamped to `[0, max_scroll_y]`.
    ///
    /// Non-finite offsets are ignored. Returns the offset actually applied.
    pub fn set_scroll_y(&mut self, y: f64) -> f64 {
        if y.is_finite() {
            self.scroll_y = y.clamp(0.0, self.max_scroll_y());
        }
        self.scroll_y
    }

    /// Hit test a point in document coordinates.
    ///
    /// Returns the topmost attached element whose border box contains the point.
    /// Without z-ordering the topmost element is the last in document order, so
    /// descendants win over ancestors and later siblings over earlier ones.
    /// Subtrees with `display: none` are skipped.
    pub fn hit_test_point(&self, pt: Point) -> Option<Hit> {
        let mut best = None;
        let mut stack = alloc::vec![self.root];
        while let Some(id) = stack.pop() {
            let e = &self.elements[id.idx()];
            if e.style.display == Some(Display::None) {
                continue;
            }
            if e.layout.contains(pt) {
                best = Some(id);
            }
            stack.extend(e.children.iter().rev().copied());
        }
        best.map(|element| Hit {
            element,
            path: self.path_to_root(element),
        })
    }

    // --- selector queries -------------------------------------------------

    /// Returns true if `id` matches `sel`. Ancestors are checked up to the topmost one.
    pub fn matches(&self, id: ElementId, sel: &Selector) -> bool {
        let Some((subject, rest)) = sel.parts.split_last() else {
            return false;
        };
        let Some(e) = self.get(id) else {
            return false;
        };
        if !e.matches_compound(subject) {
            return false;
        }
        // Descendant-only chains can be matched greedily from the nearest ancestor.
        let mut ancestors = self.ancestors_inclusive(id).skip(1);
        rest.iter().rev().all(|compound| {
            ancestors.any(|a| self.elements[a.idx()].matches_compound(compound))
        })
    }

    /// First attached element matching `sel`, in document order.
    pub fn query_selector(&self, sel: &Selector) -> Option<ElementId> {
        self.query_within(self.root, sel)
    }

    /// All attached elements matching `sel`, in document order.
    pub fn query_selector_all(&self, sel: &Selector) -> Vec<ElementId> {
        self.query_all_within(self.root, sel)
    }

    /// First descendant of `scope` matching `sel`.
    ///
    /// The selector is matched against the whole ancestry, not only the part below `scope`.
    pub fn query_within(&self, scope: ElementId, sel: &Selector) -> Option<ElementId> {
        if scope == self.root && self.matches(scope, sel) {
            return Some(scope);
        }
        self.descendants(scope)
            .into_iter()
            .find(|&id| self.matches(id, sel))
    }

    /// All descendants of `scope` matching `sel`.
    pub fn query_all_within(&self, scope: ElementId, sel: &Selector) -> Vec<ElementId> {
        let mut out: Vec<ElementId> = Vec::new();
        if scope == self.root && self.matches(scope, sel) {
            out.push(scope);
        }
        out.extend(
            self.descendants(scope)
                .into_iter()
                .filter(|&id| self.matches(id, sel)),
        );
        out
    }

    /// First attached element whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        if id.is_empty() {
            return None;
        }
        self.query_selector(&Selector::for_id(id))
    }

    // --- serialization ----------------------------------------------------

    /// Serialize `id` and its subtree as markup.
    ///
    /// Attributes come out in insertion order, followed by `class` and `style`.
    pub fn outer_html(&self, id: ElementId) -> String {
        let mut out = String::new();
        if self.contains(id) {
            self.write_html(id, &mut out);
        }
        out
    }

    fn write_html(&self, id: ElementId, out: &mut String) {
        let e = &self.elements[id.idx()];
        let _ = write!(out, "<{}", e.tag);
        for (name, value) in &e.attributes {
            let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
        }
        if !e.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_attr(&e.classes.join(" ")));
        }
        if !e.style.is_empty() {
            let _ = write!(out, " style=\"{}\"", e.style.to_css_text());
        }
        out.push('>');
        for &child in &e.children {
            self.write_html(child, out);
        }
        let _ = write!(out, "</{}>", e.tag);
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sel(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    /// `body > nav.navbar > a.nav-link`, `body > section#about > div.item`.
    fn sample() -> (Document, ElementId, ElementId, ElementId, ElementId) {
        let mut doc = Document::new();
        let root = doc.root();
        doc.set_layout(root, Rect::new(0.0, 0.0, 1000.0, 2000.0));
        let nav = doc.insert(
            Some(root),
            ElementDesc::new("nav")
                .class("navbar")
                .layout(Rect::new(0.0, 0.0, 1000.0, 80.0)),
        );
        let link = doc.insert(
            Some(nav),
            ElementDesc::new("a")
                .class("nav-link")
                .attr("href", "#about")
                .layout(Rect::new(10.0, 10.0, 90.0, 70.0)),
        );
        let about = doc.insert(
            Some(root),
            ElementDesc::new("section")
                .id("about")
                .layout(Rect::new(0.0, 600.0, 1000.0, 1400.0)),
        );
        let item = doc.insert(
            Some(about),
            ElementDesc::new("div")
                .class("item")
                .layout(Rect::new(100.0, 700.0, 400.0, 1000.0)),
        );
        (doc, nav, link, about, item)
    }

    #[test]
    fn queries_follow_document_order() {
        let (doc, nav, link, about, item) = sample();
        assert_eq!(doc.descendants(doc.root()), vec![nav, link, about, item]);
        assert_eq!(doc.query_selector(&sel(".nav-link[href*=\"about\"]")), Some(link));
        assert_eq!(doc.query_selector_all(&sel("section[id]")), vec![about]);
        assert_eq!(doc.query_selector(&sel("nav .item")), None);
        assert_eq!(doc.query_selector(&sel("body section .item")), Some(item));
        assert_eq!(doc.element_by_id("about"), Some(about));
        assert_eq!(doc.element_by_id(""), None);
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[test]
    fn scoped_query_matches_against_full_ancestry() {
        let (doc, nav, _, about, item) = sample();
        assert_eq!(doc.query_within(about, &sel("section .item")), Some(item));
        assert_eq!(doc.query_within(nav, &sel(".item")), None);
        assert_eq!(doc.query_within(about, &sel("section")), None, "scope itself is excluded");
    }

    #[test]
    fn detached_elements_are_invisible_to_queries() {
        let (mut doc, nav, ..) = sample();
        let li = doc.create_element("li");
        doc.add_class(li, "extra");
        assert_eq!(doc.query_selector(&sel(".extra")), None);
        assert!(!doc.is_attached(li));
        doc.append_child(nav, li);
        assert_eq!(doc.query_selector(&sel(".extra")), Some(li));
        assert_eq!(doc.children(nav).last(), Some(&li));
    }

    #[test]
    fn append_child_rejects_cycles_and_reparents() {
        let (mut doc, nav, link, about, _) = sample();
        doc.append_child(link, nav);
        assert_eq!(doc.parent_of(nav), Some(doc.root()), "cycle was rejected");
        doc.append_child(about, link);
        assert_eq!(doc.parent_of(link), Some(about));
        assert!(doc.children(nav).is_empty());
    }

    #[test]
    fn class_operations() {
        let (mut doc, nav, ..) = sample();
        doc.toggle_class(nav, "sticky", true);
        doc.toggle_class(nav, "sticky", true);
        assert_eq!(doc.classes(nav), ["navbar", "sticky"]);
        doc.toggle_class(nav, "sticky", false);
        assert!(!doc.has_class(nav, "sticky"));
        doc.set_attribute(nav, "class", "a b");
        assert_eq!(doc.classes(nav), ["a", "b"]);
    }

    #[test]
    fn class_attribute_selectors_see_the_class_list() {
        let (mut doc, nav, link, ..) = sample();
        let navish = Selector::parse("[class*=nav]").unwrap();
        assert_eq!(doc.query_selector_all(&navish), vec![nav, link]);
        doc.add_class(nav, "sticky");
        let exact = Selector::parse(r#"[class="navbar sticky"]"#).unwrap();
        assert_eq!(doc.query_selector(&exact), Some(nav));
        let any = Selector::parse("section[class]").unwrap();
        assert_eq!(doc.query_selector(&any), None, "no classes means no attribute");
    }

    #[test]
    fn scroll_is_clamped_and_shifts_client_rects() {
        let (mut doc, _, _, about, _) = sample();
        assert_eq!(doc.scroll_height(), 2000.0);
        assert_eq!(doc.max_scroll_y(), 1200.0);
        assert_eq!(doc.set_scroll_y(-5.0), 0.0);
        assert_eq!(doc.set_scroll_y(5000.0), 1200.0);
        assert_eq!(doc.set_scroll_y(f64::NAN), 1200.0, "NaN is ignored");
        doc.set_scroll_y(100.0);
        assert_eq!(
            doc.bounding_client_rect(about),
            Some(Rect::new(0.0, 500.0, 1000.0, 1300.0))
        );
        assert_eq!(doc.offset_top(about), Some(600.0));
        assert_eq!(doc.offset_height(about), Some(800.0));
    }

    #[test]
    fn hit_test_prefers_deepest_and_skips_hidden() {
        let (mut doc, _, _, about, item) = sample();
        let hit = doc.hit_test_point(Point::new(150.0, 800.0)).unwrap();
        assert_eq!(hit.element, item);
        assert_eq!(hit.path, vec![doc.root(), about, item]);

        doc.set_display(item, Display::None);
        let hit = doc.hit_test_point(Point::new(150.0, 800.0)).unwrap();
        assert_eq!(hit.element, about, "hidden subtree is not pickable");
        assert!(doc.is_display_none(item));

        doc.set_layout(doc.root(), Rect::ZERO);
        assert_eq!(doc.hit_test_point(Point::new(5.0, 1900.0)), None);
    }

    #[test]
    fn outer_html_serializes_subtree() {
        let mut doc = Document::new();
        let li = doc.create_element("li");
        let a = doc.insert(
            Some(li),
            ElementDesc::new("a")
                .attr("href", "https://example.com/?a=1&b=\"2\"")
                .attr("target", "_blank"),
        );
        let i = doc.insert(Some(a), ElementDesc::new("i").class("fab fa-github"));
        doc.set_opacity(i, 3.0);
        assert_eq!(
            doc.outer_html(li),
            "<li><a href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\" target=\"_blank\">\
             <i class=\"fab fa-github\" style=\"opacity: 1\"></i></a></li>"
        );
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut doc = Document::new();
        let bogus = ElementId::new(99);
        doc.add_class(bogus, "x");
        doc.set_display(bogus, Display::Block);
        assert_eq!(doc.style(bogus), None);
        assert_eq!(doc.offset_top(bogus), None);
        assert!(doc.children(bogus).is_empty());
        assert!(doc.path_to_root(bogus).is_empty());
        assert_eq!(doc.outer_html(bogus), "");
    }
}
