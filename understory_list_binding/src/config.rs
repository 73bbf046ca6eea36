// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding configuration.

use crate::{BindingError, ScrollDirection};

/// How configuration errors detected during binding are surfaced.
///
/// The affected operation always continues with a safe default (a zero size, no
/// view) and never writes a value derived from the failure into the size cache.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ErrorPolicy {
    /// Panic in debug builds, log at `error` level in release builds.
    #[default]
    DebugAssert,
    /// Always panic.
    Panic,
    /// Log at `error` level and continue.
    Log,
}

impl ErrorPolicy {
    /// Surfaces `error` according to this policy.
    pub fn report(self, error: &BindingError) {
        match self {
            Self::DebugAssert => {
                debug_assert!(false, "{error}");
                log::error!("{error}");
            }
            Self::Panic => panic!("{error}"),
            Self::Log => log::error!("{error}"),
        }
    }
}

/// Settings for a [`BindingAdapter`](crate::BindingAdapter).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BindingConfig {
    /// Flow direction used for spacing and header/footer geometry.
    pub scroll_direction: ScrollDirection,
    /// What to do about configuration errors.
    pub error_policy: ErrorPolicy,
}

impl BindingConfig {
    /// Returns this configuration with a different scroll direction.
    #[must_use]
    pub const fn with_scroll_direction(mut self, direction: ScrollDirection) -> Self {
        self.scroll_direction = direction;
        self
    }

    /// Returns this configuration with a different error policy.
    #[must_use]
    pub const fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }
}
