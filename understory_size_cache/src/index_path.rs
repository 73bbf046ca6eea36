// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-level addressing for sectioned lists.

use core::fmt;

/// Position of an item within a sectioned list.
///
/// Ordering is section-major: all items of section `0` sort before any item of
/// section `1`. Batched edits rely on this to process removals from the back
/// and insertions from the front.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexPath {
    /// Section index.
    pub section: usize,
    /// Item (row) index within the section.
    pub item: usize,
}

impl IndexPath {
    /// Creates an index path for `item` in `section`.
    #[must_use]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}
