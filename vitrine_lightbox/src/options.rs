// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use crate::source::Source;

/// Passed to the change callback when a lightbox opens.
#[derive(Clone, Copy, Debug)]
pub struct ChangeEvent<'a> {
    /// The source being shown.
    pub activated: &'a Source,
    /// The source shown before, if any.
    pub previous: Option<&'a Source>,
    /// Every source of the lightbox, in document order.
    pub sources: &'a [Source],
}

/// Callback invoked on each transition into the shown state.
pub type ChangeCallback = Box<dyn FnMut(&ChangeEvent<'_>)>;

/// Behavior knobs for a [`Lightbox`](crate::Lightbox).
///
/// Which elements act as overlay and controls is a host concern; see
/// [`Surface::has_control`](crate::Surface::has_control).
pub struct LightboxOptions {
    /// Delay in milliseconds before the displayed image is swapped.
    ///
    /// Must match the CSS transition length the host uses for the
    /// `transition` presentation state. `0` swaps on the next turn and never
    /// applies that state.
    pub transition_ms: u32,
    /// Makes triggers and prev/next controls keyboard-focusable.
    pub add_tab_index: bool,
    /// Called with the activated and previous source whenever the lightbox opens.
    pub on_change: Option<ChangeCallback>,
}

impl LightboxOptions {
    /// Default options: no transition, keyboard affordances on, no callback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transition_ms: 0,
            add_tab_index: true,
            on_change: None,
        }
    }

    /// Sets the transition delay.
    #[must_use]
    pub fn with_transition_ms(mut self, transition_ms: u32) -> Self {
        self.transition_ms = transition_ms;
        self
    }

    /// Enables or disables keyboard-focus affordances.
    #[must_use]
    pub fn with_tab_index(mut self, add_tab_index: bool) -> Self {
        self.add_tab_index = add_tab_index;
        self
    }

    /// Installs the change callback.
    #[must_use]
    pub fn with_on_change(mut self, on_change: impl FnMut(&ChangeEvent<'_>) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Whether a transition is configured.
    #[must_use]
    pub fn has_transition(&self) -> bool {
        self.transition_ms > 0
    }
}

impl Default for LightboxOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LightboxOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightboxOptions")
            .field("transition_ms", &self.transition_ms)
            .field("add_tab_index", &self.add_tab_index)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
