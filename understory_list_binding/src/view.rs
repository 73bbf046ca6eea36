// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host side: reusable views and the list view that owns them.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Size;
use understory_size_cache::IndexPath;

use crate::FitConstraints;

/// The three kinds of views a sectioned list shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// A cell for one item.
    Item,
    /// A section header.
    Header,
    /// A section footer.
    Footer,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Item => "item",
            Self::Header => "header",
            Self::Footer => "footer",
        })
    }
}

/// Section header or footer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SupplementaryKind {
    /// A section header.
    Header,
    /// A section footer.
    Footer,
}

impl From<SupplementaryKind> for ViewKind {
    fn from(kind: SupplementaryKind) -> Self {
        match kind {
            SupplementaryKind::Header => Self::Header,
            SupplementaryKind::Footer => Self::Footer,
        }
    }
}

/// Where a scrolled-to item should end up in the viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollPosition {
    /// Scroll as little as possible.
    #[default]
    None,
    /// Align with the top (or leading) edge.
    Top,
    /// Center in the viewport.
    Middle,
    /// Align with the bottom (or trailing) edge.
    Bottom,
}

/// A view the host can reuse for different items.
///
/// `M` is the presenter's model type. Only [`configure`](Self::configure),
/// [`frame_size`](Self::frame_size) and [`fitting_size`](Self::fitting_size)
/// are required; the rest are optional capabilities that default to doing
/// nothing.
pub trait ReusableView<M: ?Sized> {
    /// Fills the view with `model`.
    fn configure(&mut self, model: &M);

    /// Size of the view as currently laid out.
    fn frame_size(&self) -> Size;

    /// Preferred size of the view's content under `constraints`.
    fn fitting_size(&mut self, constraints: FitConstraints) -> Size;

    /// Shows or hides the highlighted state.
    fn set_highlighted(&mut self, highlighted: bool, animated: bool) {
        let _ = (highlighted, animated);
    }

    /// Shows or hides the selected state.
    fn set_selected(&mut self, selected: bool, animated: bool) {
        let _ = (selected, animated);
    }

    /// Moves input focus into the view. Returns whether it accepted.
    fn become_first_responder(&mut self) -> bool {
        false
    }

    /// Gives up input focus. Returns whether it did.
    fn resign_first_responder(&mut self) -> bool {
        false
    }
}

/// Completion callback for a batch of host updates. Receives whether the
/// update animations finished.
pub type UpdateCompletion = Box<dyn FnOnce(bool)>;

/// The list or grid view a binding drives.
///
/// Structural edit methods are called inside a
/// [`begin_updates`](Self::begin_updates) /
/// [`end_updates`](Self::end_updates) pair, after the binding has updated its
/// own cache.
pub trait ListHost {
    /// The host's reusable view type.
    type View;

    /// Current size of the scrolling container.
    fn container_size(&self) -> Size;

    /// Dequeues a reusable view registered under `identifier`.
    fn dequeue(&mut self, kind: ViewKind, identifier: &str, at: IndexPath) -> Option<Self::View>;

    /// The on-screen view for the item at `at`, if it is visible.
    fn visible_view_mut(&mut self, at: IndexPath) -> Option<&mut Self::View>;

    /// Whether view state changes should animate.
    fn animations_enabled(&self) -> bool {
        true
    }

    /// Discards all views and asks for everything again.
    fn reload_data(&mut self);

    /// Opens a batch of structural edits.
    fn begin_updates(&mut self);

    /// Closes the batch. `completion` runs once the host has applied it.
    fn end_updates(&mut self, completion: UpdateCompletion);

    /// Inserts items at `paths`.
    fn insert_items(&mut self, paths: &[IndexPath]);

    /// Deletes items at `paths`.
    fn delete_items(&mut self, paths: &[IndexPath]);

    /// Reloads items at `paths`.
    fn reload_items(&mut self, paths: &[IndexPath]);

    /// Moves one item.
    fn move_item(&mut self, from: IndexPath, to: IndexPath);

    /// Inserts sections.
    fn insert_sections(&mut self, sections: &[usize]);

    /// Deletes sections.
    fn delete_sections(&mut self, sections: &[usize]);

    /// Reloads sections.
    fn reload_sections(&mut self, sections: &[usize]);

    /// Moves one section.
    fn move_section(&mut self, from: usize, to: usize);

    /// Selects an item, optionally scrolling it into view.
    fn select_item(&mut self, at: IndexPath, animated: bool, position: ScrollPosition) {
        let _ = (at, animated, position);
    }

    /// Deselects an item.
    fn deselect_item(&mut self, at: IndexPath, animated: bool) {
        let _ = (at, animated);
    }

    /// Scrolls an item into view.
    fn scroll_to_item(&mut self, at: IndexPath, position: ScrollPosition, animated: bool) {
        let _ = (at, position, animated);
    }

    /// Scrolls the selected item nearest to `position` into that position.
    fn scroll_to_nearest_selected(&mut self, position: ScrollPosition, animated: bool) {
        let _ = (position, animated);
    }
}

impl<T: ListHost + ?Sized> ListHost for &mut T {
    type View = T::View;

    fn container_size(&self) -> Size {
        (**self).container_size()
    }

    fn dequeue(&mut self, kind: ViewKind, identifier: &str, at: IndexPath) -> Option<Self::View> {
        (**self).dequeue(kind, identifier, at)
    }

    fn visible_view_mut(&mut self, at: IndexPath) -> Option<&mut Self::View> {
        (**self).visible_view_mut(at)
    }

    fn animations_enabled(&self) -> bool {
        (**self).animations_enabled()
    }

    fn reload_data(&mut self) {
        (**self).reload_data();
    }

    fn begin_updates(&mut self) {
        (**self).begin_updates();
    }

    fn end_updates(&mut self, completion: UpdateCompletion) {
        (**self).end_updates(completion);
    }

    fn insert_items(&mut self, paths: &[IndexPath]) {
        (**self).insert_items(paths);
    }

    fn delete_items(&mut self, paths: &[IndexPath]) {
        (**self).delete_items(paths);
    }

    fn reload_items(&mut self, paths: &[IndexPath]) {
        (**self).reload_items(paths);
    }

    fn move_item(&mut self, from: IndexPath, to: IndexPath) {
        (**self).move_item(from, to);
    }

    fn insert_sections(&mut self, sections: &[usize]) {
        (**self).insert_sections(sections);
    }

    fn delete_sections(&mut self, sections: &[usize]) {
        (**self).delete_sections(sections);
    }

    fn reload_sections(&mut self, sections: &[usize]) {
        (**self).reload_sections(sections);
    }

    fn move_section(&mut self, from: usize, to: usize) {
        (**self).move_section(from, to);
    }

    fn select_item(&mut self, at: IndexPath, animated: bool, position: ScrollPosition) {
        (**self).select_item(at, animated, position);
    }

    fn deselect_item(&mut self, at: IndexPath, animated: bool) {
        (**self).deselect_item(at, animated);
    }

    fn scroll_to_item(&mut self, at: IndexPath, position: ScrollPosition, animated: bool) {
        (**self).scroll_to_item(at, position, animated);
    }

    fn scroll_to_nearest_selected(&mut self, position: ScrollPosition, animated: bool) {
        (**self).scroll_to_nearest_selected(position, animated);
    }
}
