// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking: turn successive pointer paths into enter/leave transitions.
//!
//! ## Usage
//!
//! 1) Hit test the pointer position to get a root→target path
//!    ([`Document::hit_test_point`](vitrine_dom::Document::hit_test_point)).
//! 2) Call [`HoverState::update_path`] with that path.
//! 3) Deliver each [`HoverEvent`] as a non-bubbling pointer-enter or pointer-leave.
//!
//! ```
//! use vitrine_behaviors::hover::{HoverEvent, HoverState};
//! let mut h: HoverState<u32> = HoverState::new();
//! assert_eq!(h.update_path(&[1, 2]), vec![HoverEvent::Enter(1), HoverEvent::Enter(2)]);
//! assert_eq!(h.update_path(&[1, 3]), vec![HoverEvent::Leave(2), HoverEvent::Enter(3)]);
//! ```

/// The currently hovered root→target path.
///
/// Leaves are reported inner-most first, enters outer-most first, so an
/// element never sees its pointer-enter before its ancestors do.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq> {
    current: Vec<K>,
}

/// A hover transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The pointer entered this node.
    Enter(K),
    /// The pointer left this node.
    Leave(K),
}

impl<K> HoverEvent<K> {
    /// The node the transition concerns.
    pub fn node(&self) -> &K {
        match self {
            Self::Enter(k) | Self::Leave(k) => k,
        }
    }
}

impl<K: Copy + Eq> HoverState<K> {
    /// Nothing hovered.
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
        }
    }

    /// The hovered path, root first. Empty when nothing is hovered.
    pub fn current_path(&self) -> &[K] {
        &self.current
    }

    /// Forget the hovered path, reporting a leave for every node on it.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        self.update_path(&[])
    }

    /// Move to `new_path`, reporting the minimal set of transitions.
    ///
    /// Nodes on the shared prefix of the old and new paths see nothing.
    pub fn update_path(&mut self, new_path: &[K]) -> Vec<HoverEvent<K>> {
        let shared = self
            .current
            .iter()
            .zip(new_path)
            .take_while(|(old, new)| old == new)
            .count();
        let leaves = self.current[shared..].iter().rev().map(|&k| HoverEvent::Leave(k));
        let enters = new_path[shared..].iter().map(|&k| HoverEvent::Enter(k));
        let out = leaves.chain(enters).collect();
        self.current.clear();
        self.current.extend_from_slice(new_path);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_path_enters_outer_to_inner() {
        let mut h: HoverState<u32> = HoverState::new();
        assert_eq!(
            h.update_path(&[1, 2, 3]),
            vec![HoverEvent::Enter(1), HoverEvent::Enter(2), HoverEvent::Enter(3)]
        );
        assert_eq!(h.current_path(), [1, 2, 3]);
    }

    #[test]
    fn moving_between_sibling_items_swaps_only_the_items() {
        // body(1) > grid(2) > item(3) | item(4)
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_path(&[1, 2, 3]);
        assert_eq!(
            h.update_path(&[1, 2, 4]),
            vec![HoverEvent::Leave(3), HoverEvent::Enter(4)]
        );
        assert_eq!(h.current_path(), &[1, 2, 4]);
    }

    #[test]
    fn moving_into_a_child_only_enters_it() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_path(&[1, 3]);
        assert_eq!(h.update_path(&[1, 3, 5]), vec![HoverEvent::Enter(5)]);
        assert_eq!(h.update_path(&[1, 3]), vec![HoverEvent::Leave(5)]);
    }

    #[test]
    fn clear_leaves_inner_to_outer() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_path(&[1, 2]);
        assert_eq!(h.clear(), vec![HoverEvent::Leave(2), HoverEvent::Leave(1)]);
        assert!(h.current_path().is_empty());
        assert!(h.clear().is_empty(), "clearing twice reports nothing");
    }

    #[test]
    fn same_path_is_quiet() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_path(&[7, 8]);
        assert!(h.update_path(&[7, 8]).is_empty());
    }

    #[test]
    fn event_node_accessor() {
        assert_eq!(*HoverEvent::Enter(4).node(), 4);
        assert_eq!(*HoverEvent::Leave(9).node(), 9);
    }
}
