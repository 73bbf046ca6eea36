// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The presenter: the domain side of a binding.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Insets;
use understory_size_cache::IndexPath;

use crate::{ItemSizeSpec, SupplementaryHeight};

/// One contextual action revealed by swiping a row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SwipeAction {
    /// Identifier the presenter uses to recognize the action.
    pub identifier: String,
    /// Title shown on the action button.
    pub title: String,
    /// Whether the action removes the row.
    pub destructive: bool,
}

/// The set of swipe actions on one edge of a row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SwipeActionsConfiguration {
    /// Actions, in display order from the swiped edge.
    pub actions: Vec<SwipeAction>,
    /// Whether a full swipe triggers the first action.
    pub performs_first_action_with_full_swipe: bool,
}

/// Supplies everything a binding needs to know about the data it shows.
///
/// The binding only reads from the presenter, except for the highlight and
/// selection callbacks. Counts, identifiers and item size specs are required;
/// everything else has a default.
///
/// Header and footer heights default to [`SupplementaryHeight::Flexible`] when an
/// identifier is supplied and [`SupplementaryHeight::None`] otherwise.
pub trait ListPresenter {
    /// Model type handed to views for configuration.
    type Model: ?Sized;

    /// Number of sections.
    fn section_count(&self) -> usize;

    /// Number of items in `section`.
    fn item_count(&self, section: usize) -> usize;

    /// Reuse identifier of the view for the item at `at`.
    fn item_identifier(&self, at: IndexPath) -> &str;

    /// Model for the item at `at`. Views are left unconfigured when `None`.
    fn item_model(&self, at: IndexPath) -> Option<&Self::Model>;

    /// How the item at `at` is sized.
    fn item_size(&self, at: IndexPath) -> ItemSizeSpec;

    /// Insets around the items of `section`.
    fn section_insets(&self, section: usize) -> Insets {
        let _ = section;
        Insets::ZERO
    }

    /// Spacing between lines of items in `section`.
    fn line_spacing(&self, section: usize) -> f64 {
        let _ = section;
        0.0
    }

    /// Spacing between items within a line in `section`.
    fn interitem_spacing(&self, section: usize) -> f64 {
        let _ = section;
        0.0
    }

    /// Reuse identifier of the header of `section`, if it has one.
    fn header_identifier(&self, section: usize) -> Option<&str> {
        let _ = section;
        None
    }

    /// Model for the header of `section`.
    fn header_model(&self, section: usize) -> Option<&Self::Model> {
        let _ = section;
        None
    }

    /// How the header of `section` is sized.
    fn header_height(&self, section: usize) -> SupplementaryHeight {
        match self.header_identifier(section) {
            Some(_) => SupplementaryHeight::Flexible,
            None => SupplementaryHeight::None,
        }
    }

    /// Reuse identifier of the footer of `section`, if it has one.
    fn footer_identifier(&self, section: usize) -> Option<&str> {
        let _ = section;
        None
    }

    /// Model for the footer of `section`.
    fn footer_model(&self, section: usize) -> Option<&Self::Model> {
        let _ = section;
        None
    }

    /// How the footer of `section` is sized.
    fn footer_height(&self, section: usize) -> SupplementaryHeight {
        match self.footer_identifier(section) {
            Some(_) => SupplementaryHeight::Flexible,
            None => SupplementaryHeight::None,
        }
    }

    /// Whether the item at `at` may be highlighted.
    fn should_highlight(&self, at: IndexPath) -> bool {
        let _ = at;
        true
    }

    /// The item at `at` was highlighted.
    fn did_highlight(&mut self, at: IndexPath) {
        let _ = at;
    }

    /// The item at `at` lost its highlight.
    fn did_unhighlight(&mut self, at: IndexPath) {
        let _ = at;
    }

    /// Whether the item at `at` may be selected.
    fn should_select(&self, at: IndexPath) -> bool {
        let _ = at;
        true
    }

    /// The item at `at` was selected.
    fn did_select(&mut self, at: IndexPath) {
        let _ = at;
    }

    /// The item at `at` was deselected.
    fn did_deselect(&mut self, at: IndexPath) {
        let _ = at;
    }

    /// Actions revealed by swiping from the leading edge.
    fn leading_swipe_actions(&self, at: IndexPath) -> Option<SwipeActionsConfiguration> {
        let _ = at;
        None
    }

    /// Actions revealed by swiping from the trailing edge.
    fn trailing_swipe_actions(&self, at: IndexPath) -> Option<SwipeActionsConfiguration> {
        let _ = at;
        None
    }

    /// Titles for a section index, if the list shows one.
    fn section_index_titles(&self) -> Option<Vec<String>> {
        None
    }
}

impl<T: ListPresenter + ?Sized> ListPresenter for &mut T {
    type Model = T::Model;

    fn section_count(&self) -> usize {
        (**self).section_count()
    }

    fn item_count(&self, section: usize) -> usize {
        (**self).item_count(section)
    }

    fn item_identifier(&self, at: IndexPath) -> &str {
        (**self).item_identifier(at)
    }

    fn item_model(&self, at: IndexPath) -> Option<&Self::Model> {
        (**self).item_model(at)
    }

    fn item_size(&self, at: IndexPath) -> ItemSizeSpec {
        (**self).item_size(at)
    }

    fn section_insets(&self, section: usize) -> Insets {
        (**self).section_insets(section)
    }

    fn line_spacing(&self, section: usize) -> f64 {
        (**self).line_spacing(section)
    }

    fn interitem_spacing(&self, section: usize) -> f64 {
        (**self).interitem_spacing(section)
    }

    fn header_identifier(&self, section: usize) -> Option<&str> {
        (**self).header_identifier(section)
    }

    fn header_model(&self, section: usize) -> Option<&Self::Model> {
        (**self).header_model(section)
    }

    fn header_height(&self, section: usize) -> SupplementaryHeight {
        (**self).header_height(section)
    }

    fn footer_identifier(&self, section: usize) -> Option<&str> {
        (**self).footer_identifier(section)
    }

    fn footer_model(&self, section: usize) -> Option<&Self::Model> {
        (**self).footer_model(section)
    }

    fn footer_height(&self, section: usize) -> SupplementaryHeight {
        (**self).footer_height(section)
    }

    fn should_highlight(&self, at: IndexPath) -> bool {
        (**self).should_highlight(at)
    }

    fn did_highlight(&mut self, at: IndexPath) {
        (**self).did_highlight(at);
    }

    fn did_unhighlight(&mut self, at: IndexPath) {
        (**self).did_unhighlight(at);
    }

    fn should_select(&self, at: IndexPath) -> bool {
        (**self).should_select(at)
    }

    fn did_select(&mut self, at: IndexPath) {
        (**self).did_select(at);
    }

    fn did_deselect(&mut self, at: IndexPath) {
        (**self).did_deselect(at);
    }

    fn leading_swipe_actions(&self, at: IndexPath) -> Option<SwipeActionsConfiguration> {
        (**self).leading_swipe_actions(at)
    }

    fn trailing_swipe_actions(&self, at: IndexPath) -> Option<SwipeActionsConfiguration> {
        (**self).trailing_swipe_actions(at)
    }

    fn section_index_titles(&self) -> Option<Vec<String>> {
        (**self).section_index_titles()
    }
}
