// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use vitrine_lightbox::LightboxOptions;

use crate::attrs::DEFAULT_SOURCE_SELECTOR;

/// Where to find an element (or elements) in the page.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementTarget {
    /// A CSS selector, queried against the document once at construction.
    Selector(String),
    /// Elements the caller already holds.
    #[cfg(target_arch = "wasm32")]
    Elements(Vec<web_sys::Element>),
}

impl From<&str> for ElementTarget {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_owned())
    }
}

impl From<String> for ElementTarget {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<web_sys::Element> for ElementTarget {
    fn from(element: web_sys::Element) -> Self {
        Self::Elements(vec![element])
    }
}

/// Everything needed to build a lightbox over page markup.
#[derive(Debug)]
pub struct WebLightboxOptions {
    /// Overlay container. A fresh `div.lightbox-wrap` is appended to `body` if unset.
    pub wrap: Option<ElementTarget>,
    /// Trigger elements, in document order.
    pub source: ElementTarget,
    /// Dismiss control.
    pub close: Option<ElementTarget>,
    /// Previous-image control.
    pub prev: Option<ElementTarget>,
    /// Next-image control.
    pub next: Option<ElementTarget>,
    /// Behavior shared with every host.
    pub lightbox: LightboxOptions,
}

impl WebLightboxOptions {
    /// Options with the default trigger selector and nothing else bound.
    #[must_use]
    pub fn new() -> Self {
        Self {
            wrap: None,
            source: ElementTarget::from(DEFAULT_SOURCE_SELECTOR),
            close: None,
            prev: None,
            next: None,
            lightbox: LightboxOptions::default(),
        }
    }

    /// Sets the overlay container.
    #[must_use]
    pub fn with_wrap(mut self, wrap: impl Into<ElementTarget>) -> Self {
        self.wrap = Some(wrap.into());
        self
    }

    /// Sets the trigger elements.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<ElementTarget>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the dismiss control.
    #[must_use]
    pub fn with_close(mut self, close: impl Into<ElementTarget>) -> Self {
        self.close = Some(close.into());
        self
    }

    /// Sets the previous-image control.
    #[must_use]
    pub fn with_prev(mut self, prev: impl Into<ElementTarget>) -> Self {
        self.prev = Some(prev.into());
        self
    }

    /// Sets the next-image control.
    #[must_use]
    pub fn with_next(mut self, next: impl Into<ElementTarget>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Replaces the behavior options.
    #[must_use]
    pub fn with_lightbox(mut self, lightbox: LightboxOptions) -> Self {
        self.lightbox = lightbox;
        self
    }
}

impl Default for WebLightboxOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain-data form of [`WebLightboxOptions`], e.g. parsed from page JSON.
///
/// Field names follow the widget's JavaScript option names (`addTabIndex`,
/// `transition`) when deserialized.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct WebLightboxConfig {
    /// Overlay selector.
    pub wrap: Option<String>,
    /// Trigger selector.
    pub source: String,
    /// Dismiss control selector.
    pub close: Option<String>,
    /// Previous-image control selector.
    pub prev: Option<String>,
    /// Next-image control selector.
    pub next: Option<String>,
    /// Transition delay in milliseconds.
    pub transition: u32,
    /// Keyboard-focus affordances.
    pub add_tab_index: bool,
}

impl Default for WebLightboxConfig {
    fn default() -> Self {
        Self {
            wrap: None,
            source: DEFAULT_SOURCE_SELECTOR.to_owned(),
            close: None,
            prev: None,
            next: None,
            transition: 0,
            add_tab_index: true,
        }
    }
}

impl From<WebLightboxConfig> for WebLightboxOptions {
    fn from(config: WebLightboxConfig) -> Self {
        Self {
            wrap: config.wrap.map(ElementTarget::Selector),
            source: ElementTarget::Selector(config.source),
            close: config.close.map(ElementTarget::Selector),
            prev: config.prev.map(ElementTarget::Selector),
            next: config.next.map(ElementTarget::Selector),
            lightbox: LightboxOptions::default()
                .with_transition_ms(config.transition)
                .with_tab_index(config.add_tab_index),
        }
    }
}
