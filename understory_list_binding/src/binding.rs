// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller-facing commands: reloads, batched structural edits, selection.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use smallvec::SmallVec;
use understory_size_cache::IndexPath;

use crate::{
    BindingAdapter, BindingError, ListDelegate, ListHost, ListPresenter, NoDelegate,
    ReusableView, ScrollPosition, UpdateCompletion,
};

/// Item-level changes to one section, applied by [`BatchUpdate::apply_item_changes`].
///
/// `deleted` holds indices before the update. `inserted` and `modified` hold
/// indices after it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemChanges {
    /// Items removed from the section.
    pub deleted: SmallVec<[usize; 8]>,
    /// Items added to the section.
    pub inserted: SmallVec<[usize; 8]>,
    /// Items whose content changed in place.
    pub modified: SmallVec<[usize; 8]>,
}

impl ItemChanges {
    /// Whether there is nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.inserted.is_empty() && self.modified.is_empty()
    }
}

/// Binds a presenter to a host on behalf of a controller.
///
/// `ListBinding` owns the [`BindingAdapter`] the host talks to and adds the
/// commands a controller issues: whole reloads, batched structural edits that
/// keep the size cache aligned with the host, selection and scrolling.
///
/// Structural edits are only available on a [`BatchUpdate`], which
/// [`begin_batch_update`](Self::begin_batch_update) hands out. A batch stays in
/// progress until the host runs the completion passed to
/// [`ListHost::end_updates`]; starting another one before that fails with
/// [`BindingError::BatchUpdateInProgress`].
pub struct ListBinding<P, H: ListHost, D = NoDelegate> {
    adapter: BindingAdapter<P, H, D>,
    batch_in_progress: Rc<Cell<bool>>,
}

impl<P, H: ListHost, D> fmt::Debug for ListBinding<P, H, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListBinding")
            .field("adapter", &self.adapter)
            .field("batch_in_progress", &self.batch_in_progress.get())
            .finish()
    }
}

impl<P, H: ListHost, D> From<BindingAdapter<P, H, D>> for ListBinding<P, H, D> {
    fn from(adapter: BindingAdapter<P, H, D>) -> Self {
        Self::new(adapter)
    }
}

impl<P, H: ListHost, D> ListBinding<P, H, D> {
    /// Wraps `adapter`.
    pub fn new(adapter: BindingAdapter<P, H, D>) -> Self {
        Self {
            adapter,
            batch_in_progress: Rc::new(Cell::new(false)),
        }
    }

    /// The adapter hosts forward their data-source calls to.
    #[must_use]
    pub fn adapter(&self) -> &BindingAdapter<P, H, D> {
        &self.adapter
    }

    /// The adapter, mutably.
    pub fn adapter_mut(&mut self) -> &mut BindingAdapter<P, H, D> {
        &mut self.adapter
    }

    /// Unwraps the adapter.
    pub fn into_adapter(self) -> BindingAdapter<P, H, D> {
        self.adapter
    }

    /// Runs `configurator` on the host, typically to register view types.
    pub fn configure(&mut self, configurator: impl FnOnce(&mut H)) {
        configurator(self.adapter.host_mut());
    }

    /// Drops every cached size and asks the host to reload everything.
    pub fn reload(&mut self) {
        self.adapter.reload_all();
        self.adapter.host_mut().reload_data();
    }

    /// Whether a batch update is waiting for its completion.
    #[must_use]
    pub fn is_batch_in_progress(&self) -> bool {
        self.batch_in_progress.get()
    }

    /// Opens a batch of structural edits.
    ///
    /// # Errors
    ///
    /// [`BindingError::BatchUpdateInProgress`] if the previous batch's
    /// completion has not run yet.
    pub fn begin_batch_update(&mut self) -> Result<BatchUpdate<'_, P, H, D>, BindingError> {
        if self.batch_in_progress.get() {
            return Err(BindingError::BatchUpdateInProgress);
        }
        self.batch_in_progress.set(true);
        self.adapter.host_mut().begin_updates();
        Ok(BatchUpdate {
            binding: self,
            closed: false,
        })
    }

    /// Runs `updates` inside a batch and closes it with `completion`.
    ///
    /// # Errors
    ///
    /// [`BindingError::BatchUpdateInProgress`], as for
    /// [`begin_batch_update`](Self::begin_batch_update). `updates` does not run.
    pub fn update(
        &mut self,
        updates: impl FnOnce(&mut BatchUpdate<'_, P, H, D>),
        completion: impl FnOnce(bool) + 'static,
    ) -> Result<(), BindingError> {
        let mut batch = self.begin_batch_update()?;
        updates(&mut batch);
        batch.end(completion);
        Ok(())
    }

    /// Asks the host to select an item.
    pub fn select_item(&mut self, at: IndexPath, animated: bool, position: ScrollPosition) {
        self.adapter.host_mut().select_item(at, animated, position);
    }

    /// Asks the host to deselect an item.
    pub fn deselect_item(&mut self, at: IndexPath, animated: bool) {
        self.adapter.host_mut().deselect_item(at, animated);
    }

    /// Asks the host to scroll an item into view.
    pub fn scroll_to_item(&mut self, at: IndexPath, position: ScrollPosition, animated: bool) {
        self.adapter.host_mut().scroll_to_item(at, position, animated);
    }

    /// Asks the host to scroll the nearest selected item to `position`.
    pub fn scroll_to_nearest_selected(&mut self, position: ScrollPosition, animated: bool) {
        self.adapter
            .host_mut()
            .scroll_to_nearest_selected(position, animated);
    }
}

impl<P, H, D> ListBinding<P, H, D>
where
    P: ListPresenter,
    H: ListHost,
    H::View: ReusableView<P::Model>,
    D: ListDelegate<H::View>,
{
    /// Re-runs configuration on the visible view for `at`.
    pub fn reconfigure_item(&mut self, at: IndexPath) -> bool {
        self.adapter.reconfigure_item(at)
    }

    /// Gives input focus to the visible view for `at`. `false` if it is not visible.
    pub fn become_first_responder(&mut self, at: IndexPath) -> bool {
        self.adapter.become_first_responder(at)
    }

    /// Takes input focus from the visible view for `at`. `false` if it is not visible.
    pub fn resign_first_responder(&mut self, at: IndexPath) -> bool {
        self.adapter.resign_first_responder(at)
    }
}

/// An open batch of structural edits.
///
/// Each edit updates the size cache first and then forwards to the host, so the
/// host never asks for a size the cache has not been aligned for. Close the
/// batch with [`end`](Self::end); dropping it closes the batch without a
/// completion callback.
pub struct BatchUpdate<'a, P, H: ListHost, D = NoDelegate> {
    binding: &'a mut ListBinding<P, H, D>,
    closed: bool,
}

impl<P, H: ListHost, D> fmt::Debug for BatchUpdate<'_, P, H, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchUpdate")
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl<P, H: ListHost, D> BatchUpdate<'_, P, H, D> {
    /// Reloads items in place.
    pub fn reload_items(&mut self, paths: &[IndexPath]) {
        let adapter = &mut self.binding.adapter;
        adapter.reload_items(paths);
        adapter.host_mut().reload_items(paths);
    }

    /// Deletes items.
    pub fn delete_items(&mut self, paths: &[IndexPath]) {
        let adapter = &mut self.binding.adapter;
        adapter.remove_items(paths);
        adapter.host_mut().delete_items(paths);
    }

    /// Inserts items.
    pub fn insert_items(&mut self, paths: &[IndexPath]) {
        let adapter = &mut self.binding.adapter;
        adapter.insert_items(paths);
        adapter.host_mut().insert_items(paths);
    }

    /// Moves an item, keeping its cached size.
    pub fn move_item(&mut self, from: IndexPath, to: IndexPath) {
        let adapter = &mut self.binding.adapter;
        adapter.move_item(from, to);
        adapter.host_mut().move_item(from, to);
    }

    /// Reloads whole sections.
    pub fn reload_sections(&mut self, sections: &[usize]) {
        let adapter = &mut self.binding.adapter;
        adapter.reload_sections(sections);
        adapter.host_mut().reload_sections(sections);
    }

    /// Deletes sections.
    pub fn delete_sections(&mut self, sections: &[usize]) {
        let adapter = &mut self.binding.adapter;
        adapter.remove_sections(sections);
        adapter.host_mut().delete_sections(sections);
    }

    /// Inserts sections.
    pub fn insert_sections(&mut self, sections: &[usize]) {
        let adapter = &mut self.binding.adapter;
        adapter.insert_sections(sections);
        adapter.host_mut().insert_sections(sections);
    }

    /// Moves a section. Its items are remeasured at the destination.
    pub fn move_section(&mut self, from: usize, to: usize) {
        let adapter = &mut self.binding.adapter;
        adapter.move_section(from, to);
        adapter.host_mut().move_section(from, to);
    }

    /// Applies deletions, then insertions, then reloads within `section`.
    pub fn apply_item_changes(&mut self, section: usize, changes: &ItemChanges) {
        let paths = |items: &[usize]| -> SmallVec<[IndexPath; 8]> {
            items
                .iter()
                .map(|&item| IndexPath::new(section, item))
                .collect()
        };
        if !changes.deleted.is_empty() {
            self.delete_items(&paths(&changes.deleted[..]));
        }
        if !changes.inserted.is_empty() {
            self.insert_items(&paths(&changes.inserted[..]));
        }
        if !changes.modified.is_empty() {
            self.reload_items(&paths(&changes.modified[..]));
        }
    }

    /// Closes the batch. `completion` runs when the host has applied it.
    pub fn end(mut self, completion: impl FnOnce(bool) + 'static) {
        self.close(Some(Box::new(completion)));
    }

    fn close(&mut self, completion: Option<UpdateCompletion>) {
        if self.closed {
            return;
        }
        self.closed = true;
        let in_progress = Rc::clone(&self.binding.batch_in_progress);
        self.binding
            .adapter
            .host_mut()
            .end_updates(Box::new(move |finished| {
                in_progress.set(false);
                if let Some(completion) = completion {
                    completion(finished);
                }
            }));
    }
}

impl<P, H: ListHost, D> Drop for BatchUpdate<'_, P, H, D> {
    fn drop(&mut self) {
        self.close(None);
    }
}
