// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::source::SourceId;

/// Errors reported by [`Lightbox`](crate::Lightbox) operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxError {
    /// Navigation was requested on a lightbox without any sources.
    NoSources,
    /// The source id does not belong to this lightbox.
    UnknownSource(SourceId),
    /// A trigger element did not provide a full-resolution image URL.
    MissingUrl {
        /// Document-order index of the offending trigger.
        index: usize,
    },
}

impl fmt::Display for LightboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSources => f.write_str("lightbox has no sources to navigate"),
            Self::UnknownSource(id) => {
                write!(f, "source {} does not belong to this lightbox", id.index())
            }
            Self::MissingUrl { index } => {
                write!(f, "lightbox source #{index} has no full-size image url")
            }
        }
    }
}

impl core::error::Error for LightboxError {}
