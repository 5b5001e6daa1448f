// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::Size;
use tracing::{debug, trace};

use crate::error::LightboxError;
use crate::fit::contain_fit;
use crate::key::Key;
use crate::options::{ChangeEvent, LightboxOptions};
use crate::source::{Source, SourceId, SourceSpec};
use crate::surface::{Control, Presentation, Surface, Viewport};

/// Identifies one scheduled image swap.
///
/// Every [`Lightbox::show`] issues a new ticket; only the most recent one is
/// honored by [`Lightbox::complete_swap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwapTicket {
    generation: u64,
    source: SourceId,
}

impl SwapTicket {
    /// The source this swap will display.
    #[must_use]
    pub fn source(self) -> SourceId {
        self.source
    }

    /// Monotonic request number within the issuing lightbox.
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// A lightbox over a fixed list of sources.
///
/// The lightbox owns its [`Surface`] and [`Viewport`] and is driven by the
/// host: user input arrives through [`show`](Self::show),
/// [`activate_control`](Self::activate_control) and friends, timers through
/// [`complete_swap`](Self::complete_swap), and image loads through
/// [`image_loaded`](Self::image_loaded).
#[derive(Debug)]
pub struct Lightbox<S, V> {
    surface: S,
    viewport: V,
    options: LightboxOptions,
    sources: Vec<Source>,
    current: Option<SourceId>,
    shown: bool,
    generation: u64,
    pending: Option<SwapTicket>,
    awaiting_load: bool,
}

impl<S: Surface, V: Viewport> Lightbox<S, V> {
    /// Builds a lightbox over `sources`, numbered in iteration order.
    ///
    /// Prev/next controls are disabled when fewer than two sources exist and
    /// enabled otherwise. With [`LightboxOptions::add_tab_index`], every
    /// trigger is made keyboard-focusable.
    ///
    /// Fails with [`LightboxError::MissingUrl`] if a source has no URL.
    pub fn new(
        surface: S,
        viewport: V,
        sources: impl IntoIterator<Item = SourceSpec>,
        options: LightboxOptions,
    ) -> Result<Self, LightboxError> {
        let sources = sources
            .into_iter()
            .enumerate()
            .map(|(index, spec)| {
                let url = spec.url.ok_or(LightboxError::MissingUrl { index })?;
                Ok(Source::new(SourceId::new(index), url, spec.ratio))
            })
            .collect::<Result<Vec<_>, LightboxError>>()?;

        let mut lightbox = Self {
            surface,
            viewport,
            options,
            sources,
            current: None,
            shown: false,
            generation: 0,
            pending: None,
            awaiting_load: false,
        };
        lightbox.sync_navigation_controls();
        if lightbox.options.add_tab_index {
            for index in 0..lightbox.sources.len() {
                lightbox.surface.set_source_focusable(SourceId::new(index));
            }
        }
        debug!(sources = lightbox.sources.len(), "lightbox created");
        Ok(lightbox)
    }

    /// Whether the overlay is visible.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// The source currently displayed in the image element.
    #[must_use]
    pub fn current(&self) -> Option<SourceId> {
        self.current
    }

    /// The source the lightbox is showing or about to show.
    ///
    /// This is the pending swap target while a transition runs, otherwise
    /// [`current`](Self::current).
    #[must_use]
    pub fn target(&self) -> Option<SourceId> {
        self.pending.map(SwapTicket::source).or(self.current)
    }

    /// The source currently displayed.
    #[must_use]
    pub fn current_source(&self) -> Option<&Source> {
        self.current.and_then(|id| self.sources.get(id.index()))
    }

    /// All sources in document order.
    #[must_use]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Looks up a source.
    #[must_use]
    pub fn source(&self, id: SourceId) -> Option<&Source> {
        self.sources.get(id.index())
    }

    /// Number of sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the lightbox has no sources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// The options this lightbox was built with.
    #[must_use]
    pub fn options(&self) -> &LightboxOptions {
        &self.options
    }

    /// The driven surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the driven surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The viewport size source.
    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// The swap waiting for its timer, if any.
    #[must_use]
    pub fn pending_swap(&self) -> Option<SwapTicket> {
        self.pending
    }

    /// Opens the lightbox (if needed) and schedules `id` to be displayed.
    ///
    /// The first call of each show/hide cycle applies the shown state,
    /// attaches the scoped key listener, and runs the change callback. Every
    /// call arms a new swap; older swaps still in flight become stale.
    pub fn show(&mut self, id: SourceId) -> Result<(), LightboxError> {
        if id.index() >= self.sources.len() {
            return Err(LightboxError::UnknownSource(id));
        }

        if !self.shown {
            self.shown = true;
            self.surface.set_presentation(Presentation::Shown, true);
            self.surface.set_key_listener(true);
            debug!(source = id.index(), "lightbox opened");
            self.notify_change(id);
        }

        if self.options.has_transition() {
            self.surface.set_presentation(Presentation::Transitioning, true);
        }

        self.generation += 1;
        let ticket = SwapTicket {
            generation: self.generation,
            source: id,
        };
        self.pending = Some(ticket);
        self.surface.schedule_swap(self.options.transition_ms, ticket);

        self.set_navigation_focusable(true);
        Ok(())
    }

    /// Finishes a swap armed by [`show`](Self::show).
    ///
    /// Points the image at the ticket's source, makes it current, and
    /// re-fits. Returns `false` and does nothing if a newer swap was armed
    /// since `ticket` was issued.
    pub fn complete_swap(&mut self, ticket: SwapTicket) -> bool {
        if self.pending != Some(ticket) {
            trace!(
                generation = ticket.generation,
                source = ticket.source.index(),
                "ignoring stale swap"
            );
            return false;
        }
        self.pending = None;

        let Some(source) = self.sources.get(ticket.source.index()) else {
            return false;
        };
        // Hosts only see a fresh load when the URL changes, even across sources.
        let same_url_ratio = self
            .current_source()
            .filter(|shown| shown.url() == source.url())
            .map(Source::ratio);
        self.surface.set_image_source(source.url());
        self.current = Some(ticket.source);
        debug!(source = ticket.source.index(), url = source.url(), "image swapped");

        if let Some(Some(ratio)) = same_url_ratio {
            if let Some(target) = self.sources.get_mut(ticket.source.index()) {
                target.adopt_ratio(ratio);
            }
        }
        if self.options.has_transition() {
            if same_url_ratio.is_some() {
                self.surface.set_presentation(Presentation::Transitioning, false);
                self.awaiting_load = false;
            } else {
                self.awaiting_load = true;
            }
        }
        self.resize();
        true
    }

    /// Reports that the image element finished loading.
    ///
    /// Clears the transitioning state if a swap was waiting for this load.
    /// If the current source had no known ratio, it is learned from
    /// `natural_size` and the image is re-fitted.
    pub fn image_loaded(&mut self, natural_size: Option<Size>) {
        if self.awaiting_load {
            self.awaiting_load = false;
            self.surface.set_presentation(Presentation::Transitioning, false);
        }

        let Some(current) = self.current else {
            return;
        };
        let Some(natural_size) = natural_size else {
            return;
        };
        if let Some(source) = self.sources.get_mut(current.index()) {
            if source.learn_ratio(natural_size) {
                debug!(
                    source = current.index(),
                    ratio = source.ratio(),
                    "ratio learned"
                );
                self.resize();
            }
        }
    }

    /// Closes the lightbox. Does nothing if it is already hidden.
    pub fn hide(&mut self) {
        if !self.shown {
            return;
        }
        self.shown = false;
        self.surface.set_presentation(Presentation::Shown, false);
        self.set_navigation_focusable(false);
        self.surface.set_key_listener(false);
        debug!("lightbox closed");
    }

    /// Shows the following source, wrapping to the first.
    ///
    /// Before anything was shown, this opens the first source.
    pub fn next(&mut self) -> Result<(), LightboxError> {
        let id = self.neighbor(true)?;
        self.show(id)
    }

    /// Shows the preceding source, wrapping to the last.
    ///
    /// Before anything was shown, this opens the last source.
    pub fn prev(&mut self) -> Result<(), LightboxError> {
        let id = self.neighbor(false)?;
        self.show(id)
    }

    /// Re-fits the displayed image to the current viewport.
    ///
    /// Does nothing while hidden, and defers until the image loads when the
    /// current source's ratio is not known yet.
    pub fn resize(&mut self) {
        if !self.shown {
            return;
        }
        let Some(ratio) = self.current_source().and_then(Source::ratio) else {
            trace!("ratio unknown; fit deferred until load");
            return;
        };
        let viewport = self.viewport.size();
        match contain_fit(ratio, viewport) {
            Some(fit) => self.surface.set_image_fit(fit),
            None => trace!(
                ratio,
                width = viewport.width,
                height = viewport.height,
                "no fit for viewport"
            ),
        }
    }

    /// Keyboard activation of a trigger.
    ///
    /// Shows the source, then hands focus to the next control so keyboard
    /// users can keep navigating.
    pub fn activate_source(&mut self, id: SourceId) -> Result<(), LightboxError> {
        self.show(id)?;
        if self.options.add_tab_index
            && self.sources.len() > 1
            && self.surface.has_control(Control::Next)
        {
            self.surface.focus_control(Control::Next);
        }
        Ok(())
    }

    /// Click or Enter on one of the overlay controls.
    pub fn activate_control(&mut self, control: Control) -> Result<(), LightboxError> {
        match control {
            Control::Close => {
                self.hide();
                Ok(())
            }
            Control::Prev => self.prev(),
            Control::Next => self.next(),
        }
    }

    /// Handles a key seen by the scoped key listener.
    ///
    /// Only Escape is handled here; arrows reach shown lightboxes through
    /// [`Registry::arrow_key`](crate::Registry::arrow_key). Returns whether
    /// the key was consumed.
    pub fn handle_scoped_key(&mut self, key: Key) -> bool {
        if key == Key::Escape && self.shown {
            self.hide();
            true
        } else {
            false
        }
    }

    fn neighbor(&self, forward: bool) -> Result<SourceId, LightboxError> {
        let len = self.sources.len();
        if len == 0 {
            return Err(LightboxError::NoSources);
        }
        let index = match (self.target(), forward) {
            (Some(at), true) => (at.index() + 1) % len,
            (Some(at), false) => (at.index() + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        Ok(SourceId::new(index))
    }

    fn notify_change(&mut self, activated: SourceId) {
        let Some(mut on_change) = self.options.on_change.take() else {
            return;
        };
        let event = ChangeEvent {
            activated: &self.sources[activated.index()],
            previous: self.current.and_then(|id| self.sources.get(id.index())),
            sources: &self.sources,
        };
        on_change(&event);
        self.options.on_change = Some(on_change);
    }

    fn sync_navigation_controls(&mut self) {
        let disabled = self.sources.len() <= 1;
        for control in [Control::Prev, Control::Next] {
            if self.surface.has_control(control) {
                self.surface.set_control_disabled(control, disabled);
            }
        }
    }

    fn set_navigation_focusable(&mut self, focusable: bool) {
        if !self.options.add_tab_index || self.sources.len() <= 1 {
            return;
        }
        for control in [Control::Prev, Control::Next] {
            if self.surface.has_control(control) {
                self.surface.set_control_focusable(control, focusable);
            }
        }
    }
}
