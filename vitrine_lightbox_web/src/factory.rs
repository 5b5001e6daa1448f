// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use kurbo::Size;
use tracing::debug;
use vitrine_lightbox::{Control, Key, Lightbox, LightboxError, LightboxId, Registry, SourceId};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlImageElement, KeyboardEvent};

use crate::attrs::{
    FULL_SRC_ATTR, IMAGE_CLASS, RATIO_ATTR, SIZER_CLASS, WRAP_CLASS, source_spec_from_attrs,
};
use crate::dom::{
    ControlElements, DomSurface, DomViewport, SharedRegistry, WeakRegistry, with_lightbox,
};
use crate::options::{ElementTarget, WebLightboxOptions};

/// Custom window event announcing that page layout changed.
pub const LAYOUT_CHANGE_EVENT: &str = "afterLayoutChange";

fn js_error(err: LightboxError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn busy_registry() -> JsValue {
    JsValue::from_str("lightbox registry is busy")
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("lightbox requires a window with a document"))
}

fn resolve(document: &Document, target: &ElementTarget) -> Result<Vec<Element>, JsValue> {
    match target {
        ElementTarget::Selector(selector) => {
            let nodes = document.query_selector_all(selector)?;
            let mut elements = Vec::with_capacity(nodes.length() as usize);
            for index in 0..nodes.length() {
                if let Some(element) = nodes
                    .item(index)
                    .and_then(|node| node.dyn_into::<Element>().ok())
                {
                    elements.push(element);
                }
            }
            Ok(elements)
        }
        ElementTarget::Elements(elements) => Ok(elements.clone()),
    }
}

fn resolve_control(
    document: &Document,
    target: Option<&ElementTarget>,
) -> Result<ControlElements, JsValue> {
    match target {
        Some(target) => Ok(resolve(document, target)?.into_iter().collect()),
        None => Ok(ControlElements::new()),
    }
}

fn create_wrap(document: &Document) -> Result<Element, JsValue> {
    let wrap = document.create_element("div")?;
    wrap.set_class_name(WRAP_CLASS);
    document
        .body()
        .ok_or_else(|| JsValue::from_str("lightbox requires a document body"))?
        .append_child(&wrap)?;
    Ok(wrap)
}

fn is_enter(event: &Event) -> bool {
    event
        .dyn_ref::<KeyboardEvent>()
        .is_some_and(|event| Key::from_dom(&event.key()) == Some(Key::Enter))
}

/// Builds a lightbox over page markup and registers it.
///
/// Triggers are read once, in document order; each must carry a
/// `data-full-src` attribute and may carry `data-ratio`. A sizing container
/// and image element are appended to the wrap, and all element listeners are
/// bound here. Page-wide listeners are installed separately with
/// [`install_global_listeners`].
///
/// Fails without touching the page if a trigger lacks its URL or if
/// `registry` is borrowed, e.g. when called from inside a change callback.
pub fn create_lightbox(
    registry: &SharedRegistry,
    options: WebLightboxOptions,
) -> Result<LightboxId, JsValue> {
    let document = document()?;

    let sources = resolve(&document, &options.source)?;
    let specs: Vec<_> = sources
        .iter()
        .map(|element| {
            source_spec_from_attrs(
                element.get_attribute(FULL_SRC_ATTR).as_deref(),
                element.get_attribute(RATIO_ATTR).as_deref(),
            )
        })
        .collect();
    // Validate before touching the page.
    if let Some(index) = specs.iter().position(|spec| spec.url.is_none()) {
        return Err(js_error(LightboxError::MissingUrl { index }));
    }
    let id = registry.try_borrow().map_err(|_| busy_registry())?.next_id();

    let wrap = match &options.wrap {
        Some(target) => resolve(&document, target)?
            .into_iter()
            .next()
            .ok_or_else(|| JsValue::from_str("lightbox wrap matched no element"))?,
        None => create_wrap(&document)?,
    };
    let sizer = document.create_element("div")?;
    sizer.set_class_name(SIZER_CLASS);
    wrap.append_child(&sizer)?;
    let image: HtmlImageElement = document.create_element("img")?.dyn_into()?;
    image.set_class_name(IMAGE_CLASS);
    sizer.append_child(&image)?;

    let close = resolve_control(&document, options.close.as_ref())?;
    let prev = resolve_control(&document, options.prev.as_ref())?;
    let next = resolve_control(&document, options.next.as_ref())?;

    let weak = Rc::downgrade(registry);
    let add_tab_index = options.lightbox.add_tab_index;

    let mut listeners = Vec::new();
    bind_overlay(&mut listeners, &weak, id, &wrap, &image);
    for (control, elements) in [
        (Control::Close, &close),
        (Control::Prev, &prev),
        (Control::Next, &next),
    ] {
        for element in elements {
            bind_control(&mut listeners, &weak, id, control, element);
        }
    }
    for (index, element) in sources.iter().enumerate() {
        bind_trigger(
            &mut listeners,
            &weak,
            id,
            SourceId::new(index),
            element,
            add_tab_index,
        );
    }

    let surface = DomSurface {
        id,
        registry: weak,
        wrap,
        image,
        close,
        prev,
        next,
        sources,
        key_listener: None,
        swap_timer: None,
        listeners,
    };
    let lightbox = Lightbox::new(surface, DomViewport, specs, options.lightbox).map_err(js_error)?;
    let registered = registry
        .try_borrow_mut()
        .map_err(|_| busy_registry())?
        .register(lightbox);
    debug_assert_eq!(registered, id, "registry handed out another id meanwhile");
    debug!(lightbox = id.index(), "lightbox bound to page");
    Ok(registered)
}

fn bind_overlay(
    listeners: &mut Vec<EventListener>,
    registry: &WeakRegistry,
    id: LightboxId,
    wrap: &Element,
    image: &HtmlImageElement,
) {
    let weak = registry.clone();
    listeners.push(EventListener::new(wrap, "click", move |_| {
        with_lightbox(&weak, id, Lightbox::hide);
    }));

    listeners.push(EventListener::new(image, "click", |event| {
        event.stop_propagation();
    }));

    let weak = registry.clone();
    let loaded = image.clone();
    listeners.push(EventListener::new(image, "load", move |_| {
        let natural = Size::new(
            f64::from(loaded.natural_width()),
            f64::from(loaded.natural_height()),
        );
        with_lightbox(&weak, id, |lightbox| lightbox.image_loaded(Some(natural)));
    }));
}

fn bind_control(
    listeners: &mut Vec<EventListener>,
    registry: &WeakRegistry,
    id: LightboxId,
    control: Control,
    element: &Element,
) {
    let weak = registry.clone();
    listeners.push(EventListener::new(element, "click", move |event| {
        event.stop_propagation();
        with_lightbox(&weak, id, |lightbox| {
            if let Err(err) = lightbox.activate_control(control) {
                debug!(%err, ?control, "control ignored");
            }
        });
    }));

    if control == Control::Close {
        return;
    }
    let weak = registry.clone();
    listeners.push(EventListener::new(element, "keydown", move |event| {
        if !is_enter(event) {
            return;
        }
        // Buttons would also synthesize a click.
        event.prevent_default();
        with_lightbox(&weak, id, |lightbox| {
            if let Err(err) = lightbox.activate_control(control) {
                debug!(%err, ?control, "control ignored");
            }
        });
    }));
}

fn bind_trigger(
    listeners: &mut Vec<EventListener>,
    registry: &WeakRegistry,
    id: LightboxId,
    source: SourceId,
    element: &Element,
    keyboard: bool,
) {
    let weak = registry.clone();
    listeners.push(EventListener::new(element, "click", move |event| {
        event.prevent_default();
        with_lightbox(&weak, id, |lightbox| {
            if let Err(err) = lightbox.show(source) {
                debug!(%err, "trigger ignored");
            }
        });
    }));

    if !keyboard {
        return;
    }
    let weak = registry.clone();
    listeners.push(EventListener::new(element, "keydown", move |event| {
        if !is_enter(event) {
            return;
        }
        event.prevent_default();
        with_lightbox(&weak, id, |lightbox| {
            if let Err(err) = lightbox.activate_source(source) {
                debug!(%err, "trigger ignored");
            }
        });
    }));
}

/// Creates an empty registry for a page.
#[must_use]
pub fn new_registry() -> SharedRegistry {
    Rc::new(RefCell::new(Registry::new()))
}

/// Page-wide listeners feeding a registry. Dropping this detaches them.
#[derive(Debug)]
pub struct GlobalListeners {
    _listeners: [EventListener; 3],
}

/// Routes layout changes and arrow keys to every lightbox in `registry`.
///
/// Both the custom `afterLayoutChange` event and window `resize` re-fit
/// every lightbox; left/right arrow `keyup` navigates the shown ones.
pub fn install_global_listeners(registry: &SharedRegistry) -> Result<GlobalListeners, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let relayout = |registry: &SharedRegistry| {
        let weak = Rc::downgrade(registry);
        move |_: &Event| {
            if let Some(registry) = weak.upgrade() {
                if let Ok(mut registry) = registry.try_borrow_mut() {
                    registry.layout_changed();
                }
            }
        }
    };

    let weak = Rc::downgrade(registry);
    let keys = EventListener::new(&window, "keyup", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let Some(key @ Key::Arrow(_)) = Key::from_dom(&event.code()) else {
            return;
        };
        if let Some(registry) = weak.upgrade() {
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.key_released(key);
            }
        }
    });

    Ok(GlobalListeners {
        _listeners: [
            EventListener::new(&window, LAYOUT_CHANGE_EVENT, relayout(registry)),
            EventListener::new(&window, "resize", relayout(registry)),
            keys,
        ],
    })
}
