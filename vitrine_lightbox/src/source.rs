// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::fit::aspect_ratio;
use kurbo::Size;

/// Position of a [`Source`] in its lightbox, in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(usize);

impl SourceId {
    /// Wraps a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What an integrator reads off a trigger element before the lightbox exists.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceSpec {
    /// Full-resolution image URL, if the trigger declared one.
    pub url: Option<String>,
    /// Declared width/height ratio, if any.
    pub ratio: Option<f64>,
}

impl SourceSpec {
    /// A trigger with a URL and no declared ratio.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ratio: None,
        }
    }

    /// Sets the declared ratio.
    #[must_use]
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }
}

/// One trigger bound to a full-resolution image.
///
/// The URL never changes after construction. The ratio is either declared up
/// front or learned once from the first load of the image.
#[derive(Clone, Debug, PartialEq)]
pub struct Source {
    id: SourceId,
    url: String,
    ratio: Option<f64>,
}

impl Source {
    pub(crate) fn new(id: SourceId, url: String, ratio: Option<f64>) -> Self {
        let ratio = ratio.filter(|r| r.is_finite() && *r > 0.0);
        Self { id, url, ratio }
    }

    /// This source's position in its lightbox.
    #[must_use]
    pub fn id(&self) -> SourceId {
        self.id
    }

    /// Full-resolution image URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Width/height ratio, if known.
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    /// Records the ratio from a loaded image's natural size.
    ///
    /// Only the first valid measurement sticks. Returns `true` if the ratio
    /// was learned by this call.
    pub(crate) fn learn_ratio(&mut self, natural: Size) -> bool {
        if self.ratio.is_some() {
            return false;
        }
        aspect_ratio(natural).is_some_and(|ratio| self.adopt_ratio(ratio))
    }

    /// Takes `ratio` if none is known yet, e.g. from a source sharing this URL.
    pub(crate) fn adopt_ratio(&mut self, ratio: f64) -> bool {
        if self.ratio.is_some() || !ratio.is_finite() || ratio <= 0.0 {
            return false;
        }
        self.ratio = Some(ratio);
        true
    }
}
