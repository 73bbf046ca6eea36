// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::string::String;
use core::fmt;

use understory_size_cache::IndexPath;

use crate::ViewKind;

/// Error returned when a size specification cannot be resolved.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LayoutError {
    /// Width and height are both derived from each other.
    CircularAspectRatio,
    /// A fill-equally slot count that is zero, negative, or not finite.
    InvalidSlotCount(f64),
    /// A flexible axis needed a measurement and no view was available.
    MeasurementUnavailable,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CircularAspectRatio => {
                f.write_str("width and height cannot both be sized by aspect ratio")
            }
            Self::InvalidSlotCount(count) => write!(
                f,
                "fill-equally slot count must be positive and finite, got {count}"
            ),
            Self::MeasurementUnavailable => {
                f.write_str("no view available to measure flexible content")
            }
        }
    }
}

impl core::error::Error for LayoutError {}

/// Configuration errors detected while binding a presenter to a host.
///
/// These indicate wiring mistakes rather than data-driven failures. How they are
/// surfaced is decided by [`ErrorPolicy`](crate::ErrorPolicy), except for
/// [`BindingError::BatchUpdateInProgress`], which is returned to the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum BindingError {
    /// A size specification could not be resolved.
    Layout {
        /// Which kind of view was being sized.
        kind: ViewKind,
        /// Index of the item, or `(section, 0)` for headers and footers.
        at: IndexPath,
        /// The underlying layout failure.
        source: LayoutError,
    },
    /// The host could not dequeue a view for a presenter identifier.
    MissingView {
        /// Which kind of view was requested.
        kind: ViewKind,
        /// The identifier the presenter returned.
        identifier: String,
    },
    /// An index fell outside the cached layout, usually because a structural
    /// edit was not mirrored.
    IndexOutOfRange {
        /// Which kind of view was addressed.
        kind: ViewKind,
        /// The offending index.
        at: IndexPath,
    },
    /// A batch update was started while another one has not completed.
    BatchUpdateInProgress,
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout { kind, at, source } => write!(f, "cannot size {kind} at {at}: {source}"),
            Self::MissingView { kind, identifier } => write!(
                f,
                "host has no {kind} view registered for identifier {identifier:?}"
            ),
            Self::IndexOutOfRange { kind, at } => {
                write!(f, "{kind} index {at} is outside the cached layout")
            }
            Self::BatchUpdateInProgress => f.write_str(
                "a batch update is already in progress; wait for its completion before starting another",
            ),
        }
    }
}

impl core::error::Error for BindingError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Layout { source, .. } => Some(source),
            _ => None,
        }
    }
}
