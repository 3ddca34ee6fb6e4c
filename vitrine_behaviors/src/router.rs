// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Propagation router.
//!
//! ## Overview
//!
//! Reconstructs the root→target path of an event target through a
//! [`ParentLookup`] and emits the capture → target → bubble sequence for it.
//! The target appears exactly once, in the [`Target`](Phase::Target) phase;
//! capture walks the strict ancestors root-first and bubble walks them back.
//!
//! ## Layering
//!
//! The router only computes the traversal order. The [`page`](crate::page)
//! dispatcher decides which phases run listeners (target and bubble for
//! bubbling events, target only otherwise).

use crate::types::{Dispatch, ParentLookup, Phase};

/// Deterministic propagation router over a parent lookup.
///
/// Construct it over a short-lived borrow of the document at dispatch time:
///
/// ```
/// use vitrine_behaviors::router::Router;
/// use vitrine_behaviors::types::Phase;
/// use vitrine_dom::{Document, ElementDesc};
///
/// let mut doc = Document::new();
/// let a = doc.insert(Some(doc.root()), ElementDesc::new("a"));
/// let i = doc.insert(Some(a), ElementDesc::new("i"));
///
/// let seq = Router::with_parent(&doc).route(i);
/// let phases: Vec<_> = seq.iter().map(|d| (d.phase, d.node)).collect();
/// assert_eq!(
///     phases,
///     [
///         (Phase::Capture, doc.root()),
///         (Phase::Capture, a),
///         (Phase::Target, i),
///         (Phase::Bubble, a),
///         (Phase::Bubble, doc.root()),
///     ]
/// );
/// ```
pub struct Router<K, P: ParentLookup<K>> {
    parent: P,
    _phantom: core::marker::PhantomData<fn() -> K>,
}

impl<K, P: ParentLookup<K>> core::fmt::Debug for Router<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K>> Router<K, P> {
    /// Create a router with an explicit parent lookup provider.
    pub fn with_parent(parent: P) -> Self {
        Self {
            parent,
            _phantom: core::marker::PhantomData,
        }
    }

    /// Root→target path for `target`, reconstructed through the parent lookup.
    pub fn path_of(&self, target: K) -> Vec<K> {
        let mut out = Vec::new();
        let mut cur = target;
        // Collect to root; caller ensures acyclic ancestry.
        loop {
            out.push(cur);
            match self.parent.parent_of(&cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    /// Produce the propagation sequence for an event targeted at `target`.
    pub fn route(&self, target: K) -> Vec<Dispatch<K>> {
        self.route_path(&self.path_of(target))
    }

    /// Produce the propagation sequence for an explicit root→target path.
    ///
    /// An empty path yields an empty sequence.
    pub fn route_path(&self, path: &[K]) -> Vec<Dispatch<K>> {
        let Some((&target, ancestors)) = path.split_last() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(path.len() * 2 - 1);
        out.extend(ancestors.iter().map(|&node| Dispatch {
            phase: Phase::Capture,
            node,
        }));
        out.push(Dispatch {
            phase: Phase::Target,
            node: target,
        });
        out.extend(ancestors.iter().rev().map(|&node| Dispatch {
            phase: Phase::Bubble,
            node,
        }));
        out
    }
}
