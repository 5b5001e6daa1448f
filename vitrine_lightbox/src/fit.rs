// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contain fitting of an image inside the lightbox sizing container.
//!
//! The fit is expressed in percentages of the sizing container, but it is
//! derived from the aspect ratio of the *viewport*. The sizing container is
//! expected to track the viewport in CSS, so reading its own box here would
//! lag behind layout.

use kurbo::Size;

/// Image dimensions as percentages of the sizing container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainFit {
    /// Width in percent (`0.0..=100.0`).
    pub width_percent: f64,
    /// Height in percent (`0.0..=100.0`).
    pub height_percent: f64,
}

/// Returns the width/height ratio of `size`, or `None` if it is degenerate.
#[must_use]
pub(crate) fn aspect_ratio(size: Size) -> Option<f64> {
    if !(size.width.is_finite() && size.height.is_finite()) {
        return None;
    }
    if size.width <= 0.0 || size.height <= 0.0 {
        return None;
    }
    Some(size.width / size.height)
}

/// Fits an image with the given width/height `ratio` into `viewport`.
///
/// When the image is relatively wider than the viewport, width is pinned to
/// 100% and height is scaled by `viewport_ratio / ratio`. Otherwise height is
/// pinned and width is scaled by `ratio / viewport_ratio`.
///
/// Returns `None` for a non-positive or non-finite `ratio`, or a degenerate
/// viewport.
#[must_use]
pub fn contain_fit(ratio: f64, viewport: Size) -> Option<ContainFit> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return None;
    }
    let viewport_ratio = aspect_ratio(viewport)?;
    let fit = if ratio > viewport_ratio {
        ContainFit {
            width_percent: 100.0,
            height_percent: viewport_ratio / ratio * 100.0,
        }
    } else {
        ContainFit {
            width_percent: ratio / viewport_ratio * 100.0,
            height_percent: 100.0,
        }
    };
    Some(fit)
}
