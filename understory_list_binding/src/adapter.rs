// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data-source and delegate side of a binding.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Point, Size, Vec2};
use understory_size_cache::{IndexPath, SizeCache};

use crate::{
    BindingConfig, BindingError, FitConstraints, LayoutContext, ListDelegate, ListHost,
    ListPresenter, NoDelegate, ReusableView, ScrollMetrics, SectionMetrics, SupplementaryHeight,
    SupplementaryKind, SwipeActionsConfiguration, ViewKind, resolve_item_size,
    resolve_supplementary_size,
};

/// Views dequeued only to measure content, kept for the rest of a layout pass.
struct ScratchViews<V> {
    items: HashMap<String, V>,
    headers: HashMap<String, V>,
    footers: HashMap<String, V>,
}

impl<V> Default for ScratchViews<V> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            headers: HashMap::new(),
            footers: HashMap::new(),
        }
    }
}

impl<V> ScratchViews<V> {
    fn map_mut(&mut self, kind: ViewKind) -> &mut HashMap<String, V> {
        match kind {
            ViewKind::Item => &mut self.items,
            ViewKind::Header => &mut self.headers,
            ViewKind::Footer => &mut self.footers,
        }
    }

    fn get_or_dequeue<H: ListHost<View = V>>(
        &mut self,
        host: &mut H,
        kind: ViewKind,
        identifier: &str,
        at: IndexPath,
    ) -> Option<&mut V> {
        let map = self.map_mut(kind);
        if !map.contains_key(identifier) {
            let view = host.dequeue(kind, identifier, at)?;
            map.insert(String::from(identifier), view);
        }
        map.get_mut(identifier)
    }

    fn len(&self) -> usize {
        self.items.len() + self.headers.len() + self.footers.len()
    }

    fn clear(&mut self) {
        self.items.clear();
        self.headers.clear();
        self.footers.clear();
    }
}

/// Answers a host's data-source and delegate questions from a presenter.
///
/// The adapter owns the presenter `P`, the host `H`, an optional delegate `D`,
/// and one [`SizeCache`] of item, header and footer sizes. Hosts call into it
/// the way a list view calls its data source:
///
/// - [`section_count`](Self::section_count) and
///   [`item_count`](Self::item_count) read the presenter and resize the cache to
///   match on every call.
/// - [`provide_item_view`](Self::provide_item_view) and friends dequeue a view
///   by the presenter's identifier and configure it with the presenter's model.
/// - [`size_for_item`](Self::size_for_item) and friends check the container
///   size, return a cached size when there is one, and otherwise resolve the
///   presenter's size spec, measuring content on a scratch view if needed.
/// - [`will_display_item`](Self::will_display_item) and
///   [`did_end_displaying_item`](Self::did_end_displaying_item) feed the sizes
///   the host actually laid out back into the cache.
///
/// Scratch views used for measurement are kept per identifier until
/// [`finish_layout_pass`](Self::finish_layout_pass).
///
/// Any of `P`, `H` and `D` may be a `&mut` borrow; the traits are implemented
/// for mutable references.
pub struct BindingAdapter<P, H: ListHost, D = NoDelegate> {
    presenter: P,
    host: H,
    delegate: D,
    config: BindingConfig,
    cache: SizeCache<Size>,
    scratch: ScratchViews<H::View>,
}

impl<P, H: ListHost, D> fmt::Debug for BindingAdapter<P, H, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingAdapter")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .field("scratch_views", &self.scratch.len())
            .finish_non_exhaustive()
    }
}

impl<P, H: ListHost> BindingAdapter<P, H> {
    /// Creates an adapter without a delegate.
    pub fn new(presenter: P, host: H) -> Self {
        Self::with_delegate(presenter, host, NoDelegate)
    }
}

impl<P, H: ListHost, D> BindingAdapter<P, H, D> {
    /// Creates an adapter that forwards display, editing and scroll events to `delegate`.
    pub fn with_delegate(presenter: P, host: H, delegate: D) -> Self {
        Self {
            presenter,
            host,
            delegate,
            config: BindingConfig::default(),
            cache: SizeCache::new(),
            scratch: ScratchViews::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: BindingConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// The presenter.
    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The delegate, mutably.
    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// The size cache.
    #[must_use]
    pub fn cache(&self) -> &SizeCache<Size> {
        &self.cache
    }

    /// Number of scratch views held for the current layout pass.
    #[must_use]
    pub fn scratch_view_count(&self) -> usize {
        self.scratch.len()
    }

    /// Drops the scratch views dequeued for measurement.
    ///
    /// Call once the host has finished asking for sizes.
    pub fn finish_layout_pass(&mut self) {
        self.scratch.clear();
    }

    /// Consumes the adapter and returns its collaborators.
    pub fn into_parts(self) -> (P, H, D) {
        (self.presenter, self.host, self.delegate)
    }

    // --- Size cache mirroring ----------------------------------------------------
    //
    // These only touch the cache. `BatchUpdate` pairs each of them with the
    // matching host edit.

    /// Forgets every cached size.
    pub fn reload_all(&mut self) {
        self.cache.clear();
        self.scratch.clear();
    }

    /// Forgets cached sizes for `sections`.
    pub fn reload_sections(&mut self, sections: &[usize]) {
        self.cache.reload_sections(sections);
    }

    /// Removes cached sizes for `sections`.
    pub fn remove_sections(&mut self, sections: &[usize]) {
        self.cache.remove_sections(sections);
    }

    /// Makes room for new `sections`.
    pub fn insert_sections(&mut self, sections: &[usize]) {
        self.cache.insert_sections(sections);
    }

    /// Mirrors a section move. The moved section is remeasured.
    pub fn move_section(&mut self, from: usize, to: usize) {
        self.cache.move_section(from, to);
    }

    /// Forgets cached sizes for `paths`.
    pub fn reload_items(&mut self, paths: &[IndexPath]) {
        self.cache.reload_items(paths);
    }

    /// Removes cached sizes for `paths`.
    pub fn remove_items(&mut self, paths: &[IndexPath]) {
        self.cache.remove_items(paths);
    }

    /// Makes room for new items at `paths`.
    pub fn insert_items(&mut self, paths: &[IndexPath]) {
        self.cache.insert_items(paths);
    }

    /// Mirrors an item move. The item keeps its cached size.
    pub fn move_item(&mut self, from: IndexPath, to: IndexPath) {
        self.cache.move_item(from, to);
    }

    fn report(&self, error: &BindingError) {
        self.config.error_policy.report(error);
    }
}

impl<P, H, D> BindingAdapter<P, H, D>
where
    P: ListPresenter,
    H: ListHost,
    H::View: ReusableView<P::Model>,
    D: ListDelegate<H::View>,
{
    // --- Counts --------------------------------------------------------------------

    /// Number of sections. Resizes the cache to match.
    pub fn section_count(&mut self) -> usize {
        let count = self.presenter.section_count();
        self.cache.set_section_count(count);
        count
    }

    /// Number of items in `section`. Resizes the cache to match.
    pub fn item_count(&mut self, section: usize) -> usize {
        let count = self.presenter.item_count(section);
        self.cache.set_item_count(section, count);
        count
    }

    // --- Views ---------------------------------------------------------------------

    /// Dequeues and configures the view for the item at `at`.
    ///
    /// Returns `None` (after reporting [`BindingError::MissingView`]) if the host
    /// has nothing registered under the presenter's identifier.
    pub fn provide_item_view(&mut self, at: IndexPath) -> Option<H::View> {
        let identifier = self.presenter.item_identifier(at);
        let Some(mut view) = self.host.dequeue(ViewKind::Item, identifier, at) else {
            let error = BindingError::MissingView {
                kind: ViewKind::Item,
                identifier: identifier.into(),
            };
            self.report(&error);
            return None;
        };
        if let Some(model) = self.presenter.item_model(at) {
            view.configure(model);
        }
        Some(view)
    }

    /// Dequeues and configures the header of `section`, if the presenter has one.
    pub fn provide_header_view(&mut self, section: usize) -> Option<H::View> {
        self.provide_supplementary_view(SupplementaryKind::Header, section)
    }

    /// Dequeues and configures the footer of `section`, if the presenter has one.
    pub fn provide_footer_view(&mut self, section: usize) -> Option<H::View> {
        self.provide_supplementary_view(SupplementaryKind::Footer, section)
    }

    fn provide_supplementary_view(
        &mut self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<H::View> {
        let identifier = supplementary_identifier(&self.presenter, kind, section)?;
        let at = IndexPath::new(section, 0);
        let Some(mut view) = self.host.dequeue(kind.into(), identifier, at) else {
            let error = BindingError::MissingView {
                kind: kind.into(),
                identifier: identifier.into(),
            };
            self.report(&error);
            return None;
        };
        if let Some(model) = supplementary_model(&self.presenter, kind, section) {
            view.configure(model);
        }
        Some(view)
    }

    // --- Sizes ---------------------------------------------------------------------

    /// Size of the item at `at`.
    ///
    /// Served from the cache when the container is unchanged since the size was
    /// recorded. Otherwise the presenter's spec is resolved and the result cached.
    /// Resolution failures are reported and yield [`Size::ZERO`], which is not cached.
    pub fn size_for_item(&mut self, at: IndexPath) -> Size {
        let container = self.validate_container();
        if let Some(size) = self.cache.item(at) {
            return size;
        }

        let spec = self.presenter.item_size(at);
        let ctx = LayoutContext {
            container,
            metrics: self.section_metrics(at.section),
            direction: self.config.scroll_direction,
        };
        match resolve_item_size(spec, &ctx, |constraints| self.measure_item(at, constraints)) {
            Ok(size) => {
                self.cache.record_item(at, size);
                size
            }
            Err(source) => {
                self.report(&BindingError::Layout {
                    kind: ViewKind::Item,
                    at,
                    source,
                });
                Size::ZERO
            }
        }
    }

    /// Size of the header of `section`.
    pub fn size_for_header(&mut self, section: usize) -> Size {
        self.size_for_supplementary(SupplementaryKind::Header, section)
    }

    /// Size of the footer of `section`.
    pub fn size_for_footer(&mut self, section: usize) -> Size {
        self.size_for_supplementary(SupplementaryKind::Footer, section)
    }

    fn size_for_supplementary(&mut self, kind: SupplementaryKind, section: usize) -> Size {
        let container = self.validate_container();
        let height = supplementary_height(&self.presenter, kind, section);
        let flexible = height == SupplementaryHeight::Flexible;
        if flexible && supplementary_identifier(&self.presenter, kind, section).is_none() {
            // Nothing to measure with: the section shows no view of this kind.
            return Size::ZERO;
        }
        if flexible {
            if let Some(size) = self.cached_supplementary(kind, section) {
                return size;
            }
        }

        let direction = self.config.scroll_direction;
        let resolved = resolve_supplementary_size(height, container, direction, |constraints| {
            self.measure_supplementary(kind, section, constraints)
        });
        match resolved {
            Ok(size) => {
                if flexible {
                    self.record_supplementary(kind, section, size);
                }
                size
            }
            Err(source) => {
                self.report(&BindingError::Layout {
                    kind: kind.into(),
                    at: IndexPath::new(section, 0),
                    source,
                });
                Size::ZERO
            }
        }
    }

    fn validate_container(&mut self) -> Size {
        let container = self.host.container_size();
        if !self.cache.validate_container(container) {
            log::debug!(
                "container resized to {container:?}, cached sizes invalidated (epoch {})",
                self.cache.epoch()
            );
        }
        container
    }

    fn section_metrics(&self, section: usize) -> SectionMetrics {
        SectionMetrics {
            insets: self.presenter.section_insets(section),
            line_spacing: self.presenter.line_spacing(section),
            interitem_spacing: self.presenter.interitem_spacing(section),
        }
    }

    fn measure_item(&mut self, at: IndexPath, constraints: FitConstraints) -> Option<Size> {
        let identifier = self.presenter.item_identifier(at);
        let view = self
            .scratch
            .get_or_dequeue(&mut self.host, ViewKind::Item, identifier, at)?;
        if let Some(model) = self.presenter.item_model(at) {
            view.configure(model);
        }
        let size = view.fitting_size(constraints);
        log::trace!("measured item {at} with {constraints:?}: {size:?}");
        Some(size)
    }

    fn measure_supplementary(
        &mut self,
        kind: SupplementaryKind,
        section: usize,
        constraints: FitConstraints,
    ) -> Option<Size> {
        let identifier = supplementary_identifier(&self.presenter, kind, section)?;
        let at = IndexPath::new(section, 0);
        let view = self
            .scratch
            .get_or_dequeue(&mut self.host, kind.into(), identifier, at)?;
        if let Some(model) = supplementary_model(&self.presenter, kind, section) {
            view.configure(model);
        }
        let size = view.fitting_size(constraints);
        log::trace!(
            "measured {} of section {section} with {constraints:?}: {size:?}",
            ViewKind::from(kind)
        );
        Some(size)
    }

    fn cached_supplementary(&self, kind: SupplementaryKind, section: usize) -> Option<Size> {
        match kind {
            SupplementaryKind::Header => self.cache.header(section),
            SupplementaryKind::Footer => self.cache.footer(section),
        }
    }

    fn record_supplementary(&mut self, kind: SupplementaryKind, section: usize, size: Size) -> bool {
        match kind {
            SupplementaryKind::Header => self.cache.record_header(section, size),
            SupplementaryKind::Footer => self.cache.record_footer(section, size),
        }
    }

    // --- Display lifecycle -------------------------------------------------------------

    /// Records the laid-out size of an item view that is about to appear.
    pub fn will_display_item(&mut self, view: &H::View, at: IndexPath) {
        self.validate_container();
        if !self.cache.record_item(at, view.frame_size()) {
            self.report(&BindingError::IndexOutOfRange {
                kind: ViewKind::Item,
                at,
            });
        }
        self.delegate.will_display_item(view, at);
    }

    /// Corrects the cached size of an item view that went off screen, if its
    /// final size differs. Indices that no longer exist are ignored.
    pub fn did_end_displaying_item(&mut self, view: &H::View, at: IndexPath) {
        self.cache.correct_item(at, view.frame_size());
        self.delegate.did_end_displaying_item(view, at);
    }

    /// Records the laid-out size of a header or footer that is about to appear.
    pub fn will_display_supplementary(
        &mut self,
        view: &H::View,
        kind: SupplementaryKind,
        section: usize,
    ) {
        self.validate_container();
        if !self.record_supplementary(kind, section, view.frame_size()) {
            self.report(&BindingError::IndexOutOfRange {
                kind: kind.into(),
                at: IndexPath::new(section, 0),
            });
        }
        self.delegate.will_display_supplementary(view, kind, section);
    }

    /// Corrects the cached size of a header or footer that went off screen.
    pub fn did_end_displaying_supplementary(
        &mut self,
        view: &H::View,
        kind: SupplementaryKind,
        section: usize,
    ) {
        let size = view.frame_size();
        match kind {
            SupplementaryKind::Header => self.cache.correct_header(section, size),
            SupplementaryKind::Footer => self.cache.correct_footer(section, size),
        };
        self.delegate
            .did_end_displaying_supplementary(view, kind, section);
    }

    /// Re-runs configuration on the visible view for `at`.
    ///
    /// Returns `false` if the item is not visible or has no model.
    pub fn reconfigure_item(&mut self, at: IndexPath) -> bool {
        let Some(view) = self.host.visible_view_mut(at) else {
            return false;
        };
        match self.presenter.item_model(at) {
            Some(model) => {
                view.configure(model);
                true
            }
            None => false,
        }
    }

    // --- Highlight and selection -------------------------------------------------------
    //
    // The visible view changes state before the presenter hears about it.

    /// Whether the item at `at` may be highlighted.
    #[must_use]
    pub fn should_highlight(&self, at: IndexPath) -> bool {
        self.presenter.should_highlight(at)
    }

    /// Highlights the visible view, then notifies the presenter.
    pub fn did_highlight(&mut self, at: IndexPath) {
        self.set_visible_state(at, |view, animated| view.set_highlighted(true, animated));
        self.presenter.did_highlight(at);
    }

    /// Clears the highlight on the visible view, then notifies the presenter.
    pub fn did_unhighlight(&mut self, at: IndexPath) {
        self.set_visible_state(at, |view, animated| view.set_highlighted(false, animated));
        self.presenter.did_unhighlight(at);
    }

    /// Whether the item at `at` may be selected.
    #[must_use]
    pub fn should_select(&self, at: IndexPath) -> bool {
        self.presenter.should_select(at)
    }

    /// `Some(at)` if the item may be selected, `None` to veto the selection.
    #[must_use]
    pub fn will_select(&self, at: IndexPath) -> Option<IndexPath> {
        self.presenter.should_select(at).then_some(at)
    }

    /// Marks the visible view selected, then notifies the presenter.
    pub fn did_select(&mut self, at: IndexPath) {
        self.set_visible_state(at, |view, animated| view.set_selected(true, animated));
        self.presenter.did_select(at);
    }

    /// Marks the visible view deselected, then notifies the presenter.
    pub fn did_deselect(&mut self, at: IndexPath) {
        self.set_visible_state(at, |view, animated| view.set_selected(false, animated));
        self.presenter.did_deselect(at);
    }

    fn set_visible_state(&mut self, at: IndexPath, apply: impl FnOnce(&mut H::View, bool)) {
        let animated = self.host.animations_enabled();
        if let Some(view) = self.host.visible_view_mut(at) {
            apply(view, animated);
        }
    }

    /// First-responder handoff to the visible view at `at`. `false` if not visible.
    pub fn become_first_responder(&mut self, at: IndexPath) -> bool {
        self.host
            .visible_view_mut(at)
            .is_some_and(|view| view.become_first_responder())
    }

    /// Resigns first responder on the visible view at `at`. `false` if not visible.
    pub fn resign_first_responder(&mut self, at: IndexPath) -> bool {
        self.host
            .visible_view_mut(at)
            .is_some_and(|view| view.resign_first_responder())
    }

    // --- Editing -------------------------------------------------------------------

    /// Leading swipe actions for the row at `at`.
    #[must_use]
    pub fn leading_swipe_actions(&self, at: IndexPath) -> Option<SwipeActionsConfiguration> {
        self.presenter.leading_swipe_actions(at)
    }

    /// Trailing swipe actions for the row at `at`.
    #[must_use]
    pub fn trailing_swipe_actions(&self, at: IndexPath) -> Option<SwipeActionsConfiguration> {
        self.presenter.trailing_swipe_actions(at)
    }

    /// A row is editable when it has swipe actions on either edge.
    #[must_use]
    pub fn can_edit(&self, at: IndexPath) -> bool {
        self.presenter.leading_swipe_actions(at).is_some()
            || self.presenter.trailing_swipe_actions(at).is_some()
    }

    /// Titles for the section index.
    #[must_use]
    pub fn section_index_titles(&self) -> Option<Vec<String>> {
        self.presenter.section_index_titles()
    }

    /// Forwards the start of row editing to the delegate.
    pub fn will_begin_editing(&mut self, at: IndexPath) {
        self.delegate.will_begin_editing(at);
    }

    /// Forwards the end of row editing to the delegate.
    pub fn did_end_editing(&mut self, at: Option<IndexPath>) {
        self.delegate.did_end_editing(at);
    }

    // --- Scrolling -----------------------------------------------------------------

    /// Forwards a content offset change.
    pub fn did_scroll(&mut self, metrics: ScrollMetrics) {
        self.delegate.did_scroll(metrics);
    }

    /// Forwards a zoom scale change.
    pub fn did_zoom(&mut self, metrics: ScrollMetrics) {
        self.delegate.did_zoom(metrics);
    }

    /// Forwards the start of a drag.
    pub fn will_begin_dragging(&mut self, metrics: ScrollMetrics) {
        self.delegate.will_begin_dragging(metrics);
    }

    /// Forwards the end of a drag; the delegate may adjust `target`.
    pub fn will_end_dragging(&mut self, metrics: ScrollMetrics, velocity: Vec2, target: &mut Point) {
        self.delegate.will_end_dragging(metrics, velocity, target);
    }

    /// Forwards that dragging ended.
    pub fn did_end_dragging(&mut self, metrics: ScrollMetrics, decelerate: bool) {
        self.delegate.did_end_dragging(metrics, decelerate);
    }

    /// Forwards the start of deceleration.
    pub fn will_begin_decelerating(&mut self, metrics: ScrollMetrics) {
        self.delegate.will_begin_decelerating(metrics);
    }

    /// Forwards the end of deceleration.
    pub fn did_end_decelerating(&mut self, metrics: ScrollMetrics) {
        self.delegate.did_end_decelerating(metrics);
    }

    /// Forwards the end of a programmatic scroll animation.
    pub fn did_end_scrolling_animation(&mut self, metrics: ScrollMetrics) {
        self.delegate.did_end_scrolling_animation(metrics);
    }

    /// Forwards the start of zooming.
    pub fn will_begin_zooming(&mut self, metrics: ScrollMetrics) {
        self.delegate.will_begin_zooming(metrics);
    }

    /// Forwards the end of zooming.
    pub fn did_end_zooming(&mut self, metrics: ScrollMetrics, scale: f64) {
        self.delegate.did_end_zooming(metrics, scale);
    }

    /// Asks the delegate whether scroll-to-top is allowed.
    pub fn should_scroll_to_top(&mut self, metrics: ScrollMetrics) -> bool {
        self.delegate.should_scroll_to_top(metrics)
    }

    /// Forwards the end of a scroll-to-top.
    pub fn did_scroll_to_top(&mut self, metrics: ScrollMetrics) {
        self.delegate.did_scroll_to_top(metrics);
    }
}

fn supplementary_identifier<P: ListPresenter>(
    presenter: &P,
    kind: SupplementaryKind,
    section: usize,
) -> Option<&str> {
    match kind {
        SupplementaryKind::Header => presenter.header_identifier(section),
        SupplementaryKind::Footer => presenter.footer_identifier(section),
    }
}

fn supplementary_model<P: ListPresenter>(
    presenter: &P,
    kind: SupplementaryKind,
    section: usize,
) -> Option<&P::Model> {
    match kind {
        SupplementaryKind::Header => presenter.header_model(section),
        SupplementaryKind::Footer => presenter.footer_model(section),
    }
}

fn supplementary_height<P: ListPresenter>(
    presenter: &P,
    kind: SupplementaryKind,
    section: usize,
) -> SupplementaryHeight {
    match kind {
        SupplementaryKind::Header => presenter.header_height(section),
        SupplementaryKind::Footer => presenter.footer_height(section),
    }
}
