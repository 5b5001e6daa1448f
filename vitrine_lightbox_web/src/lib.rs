// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vitrine_lightbox_web --heading-base-level=0

//! DOM integration for the Vitrine lightbox.
//!
//! This crate binds a [`vitrine_lightbox::Lightbox`] to page markup when
//! targeting `wasm32`: `DomSurface` implements the surface capability over
//! `web_sys` elements and `DomViewport` reads the window's inner size.
//!
//! # Usage
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn bind() -> Result<(), wasm_bindgen::JsValue> {
//!     use vitrine_lightbox::LightboxOptions;
//!     use vitrine_lightbox_web::{
//!         WebLightboxOptions, create_lightbox, install_global_listeners, new_registry,
//!     };
//!
//!     let registry = new_registry();
//!     // Keep this alive for the page session.
//!     let globals = install_global_listeners(&registry)?;
//!     create_lightbox(
//!         &registry,
//!         WebLightboxOptions::new()
//!             .with_wrap("#lightbox")
//!             .with_close("#lightbox .lightbox-close")
//!             .with_prev("#lightbox .lightbox-prev")
//!             .with_next("#lightbox .lightbox-next")
//!             .with_source(".source")
//!             .with_lightbox(LightboxOptions::default().with_transition_ms(300)),
//!     )?;
//!     std::mem::forget(globals);
//!     Ok(())
//! }
//! ```
//!
//! Markup:
//! - Triggers carry `data-full-src` (required) and `data-ratio` (optional).
//! - The wrap receives `shown` while open and `transition` while an image
//!   transition runs; prev/next receive `disabled` when there is at most one
//!   image. Stylesheet transitions must last as long as `transition_ms`.
//!
//! Notes:
//! - Left/right arrows navigate through the page-wide `keyup` listener; the
//!   per-lightbox `keydown` listener attached while open only handles Escape.
//! - Re-entrant events (a DOM event dispatched synchronously from inside
//!   `on_change`) are dropped with a `tracing` warning rather than
//!   double-borrowing the registry.

mod attrs;
mod options;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod factory;

pub use attrs::{
    DEFAULT_SOURCE_SELECTOR, DISABLED_CLASS, FULL_SRC_ATTR, IMAGE_CLASS, RATIO_ATTR, SHOWN_CLASS,
    SIZER_CLASS, TRANSITION_CLASS, WRAP_CLASS, source_spec_from_attrs,
};
pub use options::{ElementTarget, WebLightboxConfig, WebLightboxOptions};

#[cfg(target_arch = "wasm32")]
pub use dom::{DomRegistry, DomSurface, DomViewport, SharedRegistry};
#[cfg(target_arch = "wasm32")]
pub use factory::{
    GlobalListeners, LAYOUT_CHANGE_EVENT, create_lightbox, install_global_listeners, new_registry,
};
