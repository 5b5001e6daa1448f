// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup conventions shared with the stylesheet.

use vitrine_lightbox::SourceSpec;

/// Class of the overlay created when no wrap is configured.
pub const WRAP_CLASS: &str = "lightbox-wrap";
/// Class of the sizing container inside the wrap.
pub const SIZER_CLASS: &str = "lightbox-sizer";
/// Class of the image element inside the sizing container.
pub const IMAGE_CLASS: &str = "lightbox-image";
/// Applied to the wrap while the lightbox is open.
pub const SHOWN_CLASS: &str = "shown";
/// Applied to the wrap while an image transition runs.
pub const TRANSITION_CLASS: &str = "transition";
/// Applied to prev/next controls when there is nothing to navigate.
pub const DISABLED_CLASS: &str = "disabled";

/// Trigger attribute holding the full-resolution image URL.
pub const FULL_SRC_ATTR: &str = "data-full-src";
/// Trigger attribute holding the optional width/height ratio.
pub const RATIO_ATTR: &str = "data-ratio";

/// Default selector for trigger elements.
pub const DEFAULT_SOURCE_SELECTOR: &str = ".lightbox-source";

/// Builds a [`SourceSpec`] from a trigger's raw data attributes.
///
/// Blank URLs count as missing. A ratio that does not parse as a positive
/// number is treated as unknown, so it gets learned on load instead.
#[must_use]
pub fn source_spec_from_attrs(full_src: Option<&str>, ratio: Option<&str>) -> SourceSpec {
    let url = full_src
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_owned);
    let ratio = ratio
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|r| r.is_finite() && *r > 0.0);
    SourceSpec { url, ratio }
}

/// Formats a percentage for an inline style.
#[cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "only the DOM surface writes inline styles")
)]
#[must_use]
pub(crate) fn percent(value: f64) -> String {
    format!("{value}%")
}
