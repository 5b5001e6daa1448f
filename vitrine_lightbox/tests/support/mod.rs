// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording implementations of the lightbox capabilities.

#![allow(dead_code, reason = "not every test file uses every helper")]

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use kurbo::Size;
use vitrine_lightbox::{
    ContainFit, Control, Lightbox, LightboxOptions, Presentation, SourceId, SourceSpec, Surface,
    SwapTicket, Viewport,
};

/// A surface that remembers everything the lightbox asked of it.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub controls: HashSet<Control>,
    pub shown: bool,
    pub transitioning: bool,
    pub disabled: HashSet<Control>,
    pub focusable: HashSet<Control>,
    pub focused: Option<Control>,
    pub focusable_sources: Vec<SourceId>,
    pub key_listener: bool,
    pub key_listener_attaches: usize,
    pub key_listener_detaches: usize,
    pub scheduled: Vec<(u32, SwapTicket)>,
    pub image_src: Option<String>,
    pub image_fit: Option<ContainFit>,
    pub fits_applied: usize,
}

impl RecordingSurface {
    pub fn with_controls(controls: &[Control]) -> Self {
        Self {
            controls: controls.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn navigation() -> Self {
        Self::with_controls(&[Control::Close, Control::Prev, Control::Next])
    }

    /// The most recently armed swap, i.e. the timer that would fire last.
    pub fn latest_swap(&self) -> Option<SwapTicket> {
        self.scheduled.last().map(|(_, ticket)| *ticket)
    }
}

impl Surface for RecordingSurface {
    fn set_presentation(&mut self, state: Presentation, on: bool) {
        match state {
            Presentation::Shown => self.shown = on,
            Presentation::Transitioning => self.transitioning = on,
        }
    }

    fn has_control(&self, control: Control) -> bool {
        self.controls.contains(&control)
    }

    fn set_control_disabled(&mut self, control: Control, disabled: bool) {
        if disabled {
            self.disabled.insert(control);
        } else {
            self.disabled.remove(&control);
        }
    }

    fn set_control_focusable(&mut self, control: Control, focusable: bool) {
        if focusable {
            self.focusable.insert(control);
        } else {
            self.focusable.remove(&control);
        }
    }

    fn focus_control(&mut self, control: Control) {
        self.focused = Some(control);
    }

    fn set_source_focusable(&mut self, source: SourceId) {
        self.focusable_sources.push(source);
    }

    fn set_key_listener(&mut self, attached: bool) {
        if attached {
            self.key_listener_attaches += 1;
        } else {
            self.key_listener_detaches += 1;
        }
        self.key_listener = attached;
    }

    fn schedule_swap(&mut self, delay_ms: u32, ticket: SwapTicket) {
        self.scheduled.push((delay_ms, ticket));
    }

    fn set_image_source(&mut self, url: &str) {
        self.image_src = Some(url.to_owned());
    }

    fn set_image_fit(&mut self, fit: ContainFit) {
        self.image_fit = Some(fit);
        self.fits_applied += 1;
    }
}

/// A viewport whose size tests can change after construction.
#[derive(Clone, Debug)]
pub struct SharedViewport {
    size: Rc<Cell<Size>>,
    reads: Rc<Cell<usize>>,
}

impl SharedViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Rc::new(Cell::new(Size::new(width, height))),
            reads: Rc::new(Cell::new(0)),
        }
    }

    pub fn set(&self, width: f64, height: f64) {
        self.size.set(Size::new(width, height));
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl Viewport for SharedViewport {
    fn size(&self) -> Size {
        self.reads.set(self.reads.get() + 1);
        self.size.get()
    }
}

pub type TestLightbox = Lightbox<RecordingSurface, SharedViewport>;

/// `count` sources named `0.jpg`, `1.jpg`, ... with a square ratio.
pub fn square_sources(count: usize) -> Vec<SourceSpec> {
    (0..count)
        .map(|i| SourceSpec::new(format!("{i}.jpg")).with_ratio(1.0))
        .collect()
}

pub fn lightbox(count: usize, options: LightboxOptions) -> TestLightbox {
    Lightbox::new(
        RecordingSurface::navigation(),
        SharedViewport::new(1000.0, 1000.0),
        square_sources(count),
        options,
    )
    .unwrap()
}

/// Shows `index` and fires its timer.
pub fn show_now(lightbox: &mut TestLightbox, index: usize) {
    lightbox.show(SourceId::new(index)).unwrap();
    let ticket = lightbox.surface().latest_swap().unwrap();
    assert!(lightbox.complete_swap(ticket), "fresh swap must apply");
}

/// Current index, after firing any pending swap.
pub fn settle(lightbox: &mut TestLightbox) -> Option<usize> {
    if let Some(ticket) = lightbox.pending_swap() {
        lightbox.complete_swap(ticket);
    }
    lightbox.current().map(SourceId::index)
}
