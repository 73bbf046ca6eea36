// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sectioned [`SizeCache`].

use alloc::vec::Vec;

use crate::IndexPath;

/// A single cached measurement.
///
/// `Measured` entries remember the container epoch they were recorded under so
/// that a container change can invalidate them lazily.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Slot<T> {
    Unknown,
    Measured { value: T, epoch: u32 },
}

impl<T: Copy> Slot<T> {
    fn read(self, epoch: u32) -> Option<T> {
        match self {
            Self::Measured { value, epoch: e } if e == epoch => Some(value),
            _ => None,
        }
    }
}

/// Per-section, per-item store of previously measured sizes.
///
/// The cache mirrors the structure of a sectioned list: each section owns a
/// vector of item slots plus one header slot and one footer slot. A slot is
/// either unknown (never measured, or explicitly invalidated) or holds the last
/// value recorded for it.
///
/// Structural edits (insert, remove, move, reload) must be applied to the
/// cache in lockstep with the list they describe, otherwise cached values end
/// up attached to the wrong items. Batch operations sort their inputs so that
/// removals run back to front and insertions front to back, matching how list
/// views interpret index sets inside a single update.
///
/// The cache also tracks the container size its values were measured against.
/// [`SizeCache::validate_container`] starts a new epoch whenever the container
/// changes; entries from older epochs then read as unknown until they are
/// recorded again. Nothing is cleared eagerly.
///
/// `T` is whatever the host measures: a full `Size` for grids, a height for
/// plain tables, and so on. The container stamp uses the same type.
#[derive(Clone, Debug)]
pub struct SizeCache<T> {
    items: Vec<Vec<Slot<T>>>,
    headers: Vec<Slot<T>>,
    footers: Vec<Slot<T>>,
    container: Option<T>,
    epoch: u32,
}

impl<T> Default for SizeCache<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            headers: Vec::new(),
            footers: Vec::new(),
            container: None,
            epoch: 0,
        }
    }
}

impl<T: Copy + PartialEq> SizeCache<T> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every cached value and the container stamp.
    pub fn clear(&mut self) {
        self.items.clear();
        self.headers.clear();
        self.footers.clear();
        self.container = None;
    }

    /// Number of sections the cache currently has slots for.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.items.len()
    }

    /// Number of item slots in `section`, or `0` if the section does not exist.
    #[must_use]
    pub fn item_count(&self, section: usize) -> usize {
        self.items.get(section).map_or(0, Vec::len)
    }

    /// Returns the container size the current epoch was stamped with.
    #[must_use]
    pub fn container(&self) -> Option<T> {
        self.container
    }

    /// Returns the current container epoch.
    ///
    /// The epoch advances each time [`SizeCache::validate_container`] sees a
    /// different container size.
    #[must_use]
    pub const fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Checks `container` against the stamp recorded by earlier calls.
    ///
    /// Returns `true` if previously cached values are still valid for this
    /// container. On a mismatch the epoch advances, `container` becomes the new
    /// stamp, and `false` is returned. The first stamp is adopted without
    /// invalidating anything.
    pub fn validate_container(&mut self, container: T) -> bool {
        match self.container {
            Some(previous) if previous == container => true,
            Some(_) => {
                self.epoch = self.epoch.wrapping_add(1);
                self.container = Some(container);
                false
            }
            None => {
                self.container = Some(container);
                true
            }
        }
    }

    // --- Shape ---------------------------------------------------------------

    /// Resizes the section list to `count`.
    ///
    /// New sections start with no item slots and unknown header and footer.
    /// Existing sections keep their values; sections past `count` are dropped.
    pub fn set_section_count(&mut self, count: usize) {
        self.items.resize_with(count, Vec::new);
        self.headers.resize(count, Slot::Unknown);
        self.footers.resize(count, Slot::Unknown);
    }

    /// Resizes the item slots of `section` to `count`.
    ///
    /// New slots are unknown. If `section` does not exist yet, the section list
    /// grows to include it.
    pub fn set_item_count(&mut self, section: usize, count: usize) {
        if section >= self.items.len() {
            self.set_section_count(section + 1);
        }
        self.items[section].resize(count, Slot::Unknown);
    }

    // --- Sections --------------------------------------------------------------

    /// Forgets everything cached for `section` without changing the section count.
    ///
    /// Item slots are dropped entirely (the next item-count sync recreates them)
    /// and the header and footer become unknown. Out-of-range sections are ignored.
    pub fn reload_section(&mut self, section: usize) {
        if section >= self.items.len() {
            return;
        }
        self.items[section].clear();
        self.headers[section] = Slot::Unknown;
        self.footers[section] = Slot::Unknown;
    }

    /// Applies [`SizeCache::reload_section`] to each of `sections`.
    pub fn reload_sections(&mut self, sections: &[usize]) {
        for &section in sections {
            self.reload_section(section);
        }
    }

    /// Removes the slots of `sections`.
    ///
    /// Indices refer to the layout before the call. They are processed from the
    /// highest down so earlier removals do not shift later ones. Duplicates and
    /// out-of-range indices are ignored.
    pub fn remove_sections(&mut self, sections: &[usize]) {
        let mut sorted = sections.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        for section in sorted {
            if section < self.items.len() {
                self.items.remove(section);
                self.headers.remove(section);
                self.footers.remove(section);
            }
        }
    }

    /// Inserts empty sections at `sections`.
    ///
    /// Indices refer to the layout after the call and are processed from the
    /// lowest up. An index past the end pads with empty sections first.
    pub fn insert_sections(&mut self, sections: &[usize]) {
        let mut sorted = sections.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for section in sorted {
            if section > self.items.len() {
                self.set_section_count(section);
            }
            self.items.insert(section, Vec::new());
            self.headers.insert(section, Slot::Unknown);
            self.footers.insert(section, Slot::Unknown);
        }
    }

    /// Moves section `from` to `to`, discarding its cached slots.
    ///
    /// The sections in between shift by one and keep their values. The moved
    /// section arrives empty and is remeasured on demand. Out-of-range `from`
    /// is ignored.
    pub fn move_section(&mut self, from: usize, to: usize) {
        if from >= self.items.len() {
            return;
        }
        self.remove_sections(&[from]);
        self.insert_sections(&[to]);
    }

    // --- Items -------------------------------------------------------------------

    /// Returns the cached value for the item at `at`.
    ///
    /// `None` means "must measure": the index is out of range, the item was never
    /// measured, or it was measured against a different container.
    #[must_use]
    pub fn item(&self, at: IndexPath) -> Option<T> {
        self.item_slot(at).and_then(|slot| slot.read(self.epoch))
    }

    /// Overwrites the value for the item at `at`.
    ///
    /// Returns `false` (and stores nothing) if `at` is out of range.
    pub fn record_item(&mut self, at: IndexPath, value: T) -> bool {
        let epoch = self.epoch;
        match self.item_slot_mut(at) {
            Some(slot) => {
                *slot = Slot::Measured { value, epoch };
                true
            }
            None => false,
        }
    }

    /// Overwrites the value for the item at `at` if it differs from the cached one.
    ///
    /// Returns `true` if a correction was stored. Out-of-range indices are ignored.
    pub fn correct_item(&mut self, at: IndexPath, value: T) -> bool {
        if self.item_slot(at).is_none() || self.item(at) == Some(value) {
            return false;
        }
        self.record_item(at, value)
    }

    /// Marks the item at `at` as unknown.
    pub fn reload_item(&mut self, at: IndexPath) {
        if let Some(slot) = self.item_slot_mut(at) {
            *slot = Slot::Unknown;
        }
    }

    /// Applies [`SizeCache::reload_item`] to each of `paths`.
    pub fn reload_items(&mut self, paths: &[IndexPath]) {
        for &at in paths {
            self.reload_item(at);
        }
    }

    /// Removes the slot at `at`, shifting later items of the section down.
    ///
    /// Returns `None` if `at` is out of range, otherwise the value the slot
    /// held (itself `None` if it was unknown).
    pub fn remove_item(&mut self, at: IndexPath) -> Option<Option<T>> {
        let epoch = self.epoch;
        self.take_slot(at).map(|slot| slot.read(epoch))
    }

    /// Removes the slots at `paths`, processed from the highest index path down.
    pub fn remove_items(&mut self, paths: &[IndexPath]) {
        let mut sorted = paths.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        for at in sorted {
            self.take_slot(at);
        }
    }

    /// Inserts a slot at `at`, optionally pre-filled with `value`.
    ///
    /// Returns `false` if the section does not exist. An item index past the end
    /// of the section pads with unknown slots first.
    pub fn insert_item(&mut self, at: IndexPath, value: Option<T>) -> bool {
        let slot = match value {
            Some(value) => Slot::Measured {
                value,
                epoch: self.epoch,
            },
            None => Slot::Unknown,
        };
        self.insert_slot(at, slot)
    }

    /// Inserts unknown slots at `paths`, processed from the lowest index path up.
    pub fn insert_items(&mut self, paths: &[IndexPath]) {
        let mut sorted = paths.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for at in sorted {
            self.insert_slot(at, Slot::Unknown);
        }
    }

    /// Moves the slot at `from` to `to`, keeping whatever it had cached.
    ///
    /// `to` is interpreted after the removal of `from`. Nothing happens if
    /// `from` is out of range.
    pub fn move_item(&mut self, from: IndexPath, to: IndexPath) {
        if let Some(slot) = self.take_slot(from) {
            self.insert_slot(to, slot);
        }
    }

    // --- Headers and footers ---------------------------------------------------

    /// Returns the cached header value for `section`.
    #[must_use]
    pub fn header(&self, section: usize) -> Option<T> {
        self.headers
            .get(section)
            .and_then(|slot| slot.read(self.epoch))
    }

    /// Returns the cached footer value for `section`.
    #[must_use]
    pub fn footer(&self, section: usize) -> Option<T> {
        self.footers
            .get(section)
            .and_then(|slot| slot.read(self.epoch))
    }

    /// Overwrites the header value for `section`. Returns `false` if out of range.
    pub fn record_header(&mut self, section: usize, value: T) -> bool {
        record(&mut self.headers, section, value, self.epoch)
    }

    /// Overwrites the footer value for `section`. Returns `false` if out of range.
    pub fn record_footer(&mut self, section: usize, value: T) -> bool {
        record(&mut self.footers, section, value, self.epoch)
    }

    /// Overwrites the header value for `section` if it differs from the cached one.
    pub fn correct_header(&mut self, section: usize, value: T) -> bool {
        correct(&mut self.headers, section, value, self.epoch)
    }

    /// Overwrites the footer value for `section` if it differs from the cached one.
    pub fn correct_footer(&mut self, section: usize, value: T) -> bool {
        correct(&mut self.footers, section, value, self.epoch)
    }

    // --- Internals -----------------------------------------------------------------

    fn item_slot(&self, at: IndexPath) -> Option<Slot<T>> {
        self.items
            .get(at.section)
            .and_then(|section| section.get(at.item))
            .copied()
    }

    fn item_slot_mut(&mut self, at: IndexPath) -> Option<&mut Slot<T>> {
        self.items
            .get_mut(at.section)
            .and_then(|section| section.get_mut(at.item))
    }

    fn take_slot(&mut self, at: IndexPath) -> Option<Slot<T>> {
        let section = self.items.get_mut(at.section)?;
        (at.item < section.len()).then(|| section.remove(at.item))
    }

    fn insert_slot(&mut self, at: IndexPath, slot: Slot<T>) -> bool {
        let Some(section) = self.items.get_mut(at.section) else {
            return false;
        };
        if at.item > section.len() {
            section.resize(at.item, Slot::Unknown);
        }
        section.insert(at.item, slot);
        true
    }
}

fn record<T>(slots: &mut [Slot<T>], index: usize, value: T, epoch: u32) -> bool {
    match slots.get_mut(index) {
        Some(slot) => {
            *slot = Slot::Measured { value, epoch };
            true
        }
        None => false,
    }
}

fn correct<T: Copy + PartialEq>(slots: &mut [Slot<T>], index: usize, value: T, epoch: u32) -> bool {
    match slots.get_mut(index) {
        Some(slot) if slot.read(epoch) != Some(value) => {
            *slot = Slot::Measured { value, epoch };
            true
        }
        _ => false,
    }
}
