// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional observer for display, editing and scroll events.

use kurbo::{Point, Size, Vec2};
use understory_size_cache::IndexPath;

use crate::SupplementaryKind;

/// Snapshot of the scroll container passed with scroll callbacks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// Current content offset.
    pub offset: Point,
    /// Size of the scrollable content.
    pub content_size: Size,
    /// Current zoom scale; `1.0` when not zoomed.
    pub zoom_scale: f64,
}

impl Default for ScrollMetrics {
    fn default() -> Self {
        Self {
            offset: Point::ZERO,
            content_size: Size::ZERO,
            zoom_scale: 1.0,
        }
    }
}

/// Receives events the binding forwards without interpreting them.
///
/// Every method defaults to doing nothing, so implementors only override what
/// they observe. `V` is the host's view type.
pub trait ListDelegate<V> {
    /// An item view is about to appear.
    fn will_display_item(&mut self, view: &V, at: IndexPath) {
        let _ = (view, at);
    }

    /// An item view went off screen.
    fn did_end_displaying_item(&mut self, view: &V, at: IndexPath) {
        let _ = (view, at);
    }

    /// A header or footer is about to appear.
    fn will_display_supplementary(&mut self, view: &V, kind: SupplementaryKind, section: usize) {
        let _ = (view, kind, section);
    }

    /// A header or footer went off screen.
    fn did_end_displaying_supplementary(
        &mut self,
        view: &V,
        kind: SupplementaryKind,
        section: usize,
    ) {
        let _ = (view, kind, section);
    }

    /// The user started editing (for example swiping) the row at `at`.
    fn will_begin_editing(&mut self, at: IndexPath) {
        let _ = at;
    }

    /// Editing ended. `at` is `None` if the row no longer exists.
    fn did_end_editing(&mut self, at: Option<IndexPath>) {
        let _ = at;
    }

    /// The content offset changed.
    fn did_scroll(&mut self, metrics: ScrollMetrics) {
        let _ = metrics;
    }

    /// The zoom scale changed.
    fn did_zoom(&mut self, metrics: ScrollMetrics) {
        let _ = metrics;
    }

    /// The user started dragging.
    fn will_begin_dragging(&mut self, metrics: ScrollMetrics) {
        let _ = metrics;
    }

    /// The user lifted their finger. `target` may be adjusted to change where
    /// the scroll comes to rest.
    fn will_end_dragging(&mut self, metrics: ScrollMetrics, velocity: Vec2, target: &mut Point) {
        let _ = (metrics, velocity, target);
    }

    /// Dragging ended. `decelerate` tells whether scrolling continues.
    fn did_end_dragging(&mut self, metrics: ScrollMetrics, decelerate: bool) {
        let _ = (metrics, decelerate);
    }

    /// Scrolling started to decelerate.
    fn will_begin_decelerating(&mut self, metrics: ScrollMetrics) {
        let _ = metrics;
    }

    /// Scrolling came to rest.
    fn did_end_decelerating(&mut self, metrics: ScrollMetrics) {
        let _ = metrics;
    }

    /// A programmatic scroll animation finished.
    fn did_end_scrolling_animation(&mut self, metrics: ScrollMetrics) {
        let _ = metrics;
    }

    /// Zooming is about to start.
    fn will_begin_zooming(&mut self, metrics: ScrollMetrics) {
        let _ = metrics;
    }

    /// Zooming ended at `scale`.
    fn did_end_zooming(&mut self, metrics: ScrollMetrics, scale: f64) {
        let _ = (metrics, scale);
    }

    /// Whether a tap on the status bar may scroll to the top.
    fn should_scroll_to_top(&mut self, metrics: ScrollMetrics) -> bool {
        let _ = metrics;
        true
    }

    /// A scroll-to-top gesture finished.
    fn did_scroll_to_top(&mut self, metrics: ScrollMetrics) {
        let _ = metrics;
    }
}

/// A delegate that ignores every event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NoDelegate;

impl<V> ListDelegate<V> for NoDelegate {}

impl<V, T: ListDelegate<V> + ?Sized> ListDelegate<V> for &mut T {
    fn will_display_item(&mut self, view: &V, at: IndexPath) {
        (**self).will_display_item(view, at);
    }

    fn did_end_displaying_item(&mut self, view: &V, at: IndexPath) {
        (**self).did_end_displaying_item(view, at);
    }

    fn will_display_supplementary(&mut self, view: &V, kind: SupplementaryKind, section: usize) {
        (**self).will_display_supplementary(view, kind, section);
    }

    fn did_end_displaying_supplementary(
        &mut self,
        view: &V,
        kind: SupplementaryKind,
        section: usize,
    ) {
        (**self).did_end_displaying_supplementary(view, kind, section);
    }

    fn will_begin_editing(&mut self, at: IndexPath) {
        (**self).will_begin_editing(at);
    }

    fn did_end_editing(&mut self, at: Option<IndexPath>) {
        (**self).did_end_editing(at);
    }

    fn did_scroll(&mut self, metrics: ScrollMetrics) {
        (**self).did_scroll(metrics);
    }

    fn did_zoom(&mut self, metrics: ScrollMetrics) {
        (**self).did_zoom(metrics);
    }

    fn will_begin_dragging(&mut self, metrics: ScrollMetrics) {
        (**self).will_begin_dragging(metrics);
    }

    fn will_end_dragging(&mut self, metrics: ScrollMetrics, velocity: Vec2, target: &mut Point) {
        (**self).will_end_dragging(metrics, velocity, target);
    }

    fn did_end_dragging(&mut self, metrics: ScrollMetrics, decelerate: bool) {
        (**self).did_end_dragging(metrics, decelerate);
    }

    fn will_begin_decelerating(&mut self, metrics: ScrollMetrics) {
        (**self).will_begin_decelerating(metrics);
    }

    fn did_end_decelerating(&mut self, metrics: ScrollMetrics) {
        (**self).did_end_decelerating(metrics);
    }

    fn did_end_scrolling_animation(&mut self, metrics: ScrollMetrics) {
        (**self).did_end_scrolling_animation(metrics);
    }

    fn will_begin_zooming(&mut self, metrics: ScrollMetrics) {
        (**self).will_begin_zooming(metrics);
    }

    fn did_end_zooming(&mut self, metrics: ScrollMetrics, scale: f64) {
        (**self).did_end_zooming(metrics, scale);
    }

    fn should_scroll_to_top(&mut self, metrics: ScrollMetrics) -> bool {
        (**self).should_scroll_to_top(metrics)
    }

    fn did_scroll_to_top(&mut self, metrics: ScrollMetrics) {
        (**self).did_scroll_to_top(metrics);
    }
}
