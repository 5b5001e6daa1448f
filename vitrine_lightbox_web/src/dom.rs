// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `web-sys` implementations of the lightbox capabilities.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use kurbo::Size;
use smallvec::SmallVec;
use tracing::warn;
use vitrine_lightbox::{
    ContainFit, Control, Key, Lightbox, LightboxId, Presentation, Registry, SourceId, Surface,
    SwapTicket, Viewport,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlImageElement, KeyboardEvent};

use crate::attrs::{DISABLED_CLASS, SHOWN_CLASS, TRANSITION_CLASS, percent};

/// Elements bound to one control; selectors may match several.
pub(crate) type ControlElements = SmallVec<[Element; 1]>;

/// The registry type driven by the DOM adapter.
pub type DomRegistry = Registry<DomSurface, DomViewport>;

/// A registry shared between the page and every event listener.
pub type SharedRegistry = Rc<RefCell<DomRegistry>>;

pub(crate) type WeakRegistry = Weak<RefCell<DomRegistry>>;

/// Runs `f` on lightbox `id` if the registry is alive and not already borrowed.
///
/// Listeners fire from the browser's event loop, so a busy registry means a
/// callback (for example `on_change`) dispatched a DOM event synchronously.
/// Such nested events are dropped.
pub(crate) fn with_lightbox(
    registry: &WeakRegistry,
    id: LightboxId,
    f: impl FnOnce(&mut Lightbox<DomSurface, DomViewport>),
) {
    let Some(registry) = registry.upgrade() else {
        return;
    };
    let Ok(mut registry) = registry.try_borrow_mut() else {
        warn!(lightbox = id.index(), "registry busy; nested event dropped");
        return;
    };
    if let Some(lightbox) = registry.get_mut(id) {
        f(lightbox);
    }
}

pub(crate) fn log_js_error(context: &'static str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!(?err, "{context}");
    }
}

/// Overlay, controls, and image of one lightbox.
#[derive(Debug)]
pub struct DomSurface {
    pub(crate) id: LightboxId,
    pub(crate) registry: WeakRegistry,
    pub(crate) wrap: Element,
    pub(crate) image: HtmlImageElement,
    pub(crate) close: ControlElements,
    pub(crate) prev: ControlElements,
    pub(crate) next: ControlElements,
    pub(crate) sources: Vec<Element>,
    pub(crate) key_listener: Option<EventListener>,
    pub(crate) swap_timer: Option<Timeout>,
    /// Element listeners; they live as long as the surface.
    pub(crate) listeners: Vec<EventListener>,
}

impl DomSurface {
    /// The overlay container.
    #[must_use]
    pub fn wrap(&self) -> &Element {
        &self.wrap
    }

    /// The image element inside the sizing container.
    #[must_use]
    pub fn image(&self) -> &HtmlImageElement {
        &self.image
    }

    /// The trigger elements, in document order.
    #[must_use]
    pub fn sources(&self) -> &[Element] {
        &self.sources
    }

    fn control(&self, control: Control) -> &[Element] {
        match control {
            Control::Close => &self.close,
            Control::Prev => &self.prev,
            Control::Next => &self.next,
        }
    }
}

impl Surface for DomSurface {
    fn set_presentation(&mut self, state: Presentation, on: bool) {
        let class = match state {
            Presentation::Shown => SHOWN_CLASS,
            Presentation::Transitioning => TRANSITION_CLASS,
        };
        log_js_error(
            "toggling presentation class failed",
            self.wrap
                .class_list()
                .toggle_with_force(class, on)
                .map(drop),
        );
    }

    fn has_control(&self, control: Control) -> bool {
        !self.control(control).is_empty()
    }

    fn set_control_disabled(&mut self, control: Control, disabled: bool) {
        for element in self.control(control) {
            log_js_error(
                "toggling disabled class failed",
                element
                    .class_list()
                    .toggle_with_force(DISABLED_CLASS, disabled)
                    .map(drop),
            );
        }
    }

    fn set_control_focusable(&mut self, control: Control, focusable: bool) {
        let tabindex = if focusable { "0" } else { "-1" };
        for element in self.control(control) {
            log_js_error(
                "setting control tabindex failed",
                element.set_attribute("tabindex", tabindex),
            );
        }
    }

    fn focus_control(&mut self, control: Control) {
        let Some(element) = self.control(control).first() else {
            return;
        };
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            log_js_error("focusing control failed", element.focus());
        }
    }

    fn set_source_focusable(&mut self, source: SourceId) {
        if let Some(element) = self.sources.get(source.index()) {
            log_js_error(
                "setting trigger tabindex failed",
                element.set_attribute("tabindex", "0"),
            );
        }
    }

    fn set_key_listener(&mut self, attached: bool) {
        if !attached {
            // Dropping the listener removes it from the window.
            self.key_listener = None;
            return;
        }
        if self.key_listener.is_some() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let registry = self.registry.clone();
        let id = self.id;
        self.key_listener = Some(EventListener::new(&window, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if Key::from_dom(&event.key()) == Some(Key::Escape) {
                with_lightbox(&registry, id, |lightbox| {
                    lightbox.handle_scoped_key(Key::Escape);
                });
            }
        }));
    }

    fn schedule_swap(&mut self, delay_ms: u32, ticket: SwapTicket) {
        let registry = self.registry.clone();
        let id = self.id;
        // Replacing the timer drops, and so cancels, the previous one.
        self.swap_timer = Some(Timeout::new(delay_ms, move || {
            with_lightbox(&registry, id, |lightbox| {
                lightbox.complete_swap(ticket);
            });
        }));
    }

    fn set_image_source(&mut self, url: &str) {
        self.image.set_src(url);
    }

    fn set_image_fit(&mut self, fit: ContainFit) {
        let style = self.image.style();
        log_js_error(
            "setting image width failed",
            style.set_property("width", &percent(fit.width_percent)),
        );
        log_js_error(
            "setting image height failed",
            style.set_property("height", &percent(fit.height_percent)),
        );
    }
}

/// The browser window's inner size.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomViewport;

impl Viewport for DomViewport {
    fn size(&self) -> Size {
        let Some(window) = web_sys::window() else {
            return Size::ZERO;
        };
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Size::new(
            dimension(window.inner_width()),
            dimension(window.inner_height()),
        )
    }
}
