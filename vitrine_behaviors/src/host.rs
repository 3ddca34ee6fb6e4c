// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The platform side of scrolling.
//!
//! Animated scrolling is a platform capability: the page hands a
//! [`ScrollRequest`] to a [`ScrollHost`] and moves on. Completion is not
//! observable and an in-flight animation cannot be cancelled from here.

/// How the platform should move the viewport.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ScrollBehavior {
    /// Animate to the target offset.
    #[default]
    Smooth,
    /// Jump to the target offset.
    Instant,
}

/// A request to scroll the viewport to an absolute vertical offset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollRequest {
    /// Target scroll offset in CSS pixels. May lie outside the scrollable range;
    /// the platform clamps.
    pub top: f64,
    /// Requested animation behaviour.
    pub behavior: ScrollBehavior,
}

/// Receives scroll requests from the page.
pub trait ScrollHost {
    /// Start scrolling as requested. Must not block on the animation.
    fn scroll_to(&mut self, request: ScrollRequest);
}

impl<T: ScrollHost + ?Sized> ScrollHost for &mut T {
    fn scroll_to(&mut self, request: ScrollRequest) {
        (**self).scroll_to(request);
    }
}

/// A host that records every request and performs none of them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingHost {
    requests: Vec<ScrollRequest>,
}

impl RecordingHost {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> &[ScrollRequest] {
        &self.requests
    }

    /// The most recent request.
    pub fn last(&self) -> Option<ScrollRequest> {
        self.requests.last().copied()
    }

    /// Drain the recorded requests.
    pub fn take(&mut self) -> Vec<ScrollRequest> {
        core::mem::take(&mut self.requests)
    }
}

impl ScrollHost for RecordingHost {
    fn scroll_to(&mut self, request: ScrollRequest) {
        self.requests.push(request);
    }
}
