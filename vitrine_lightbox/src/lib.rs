// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vitrine_lightbox --heading-base-level=0

//! Vitrine Lightbox: a headless lightbox state machine.
//!
//! A lightbox shows one full-size image from a fixed list of sources in an
//! overlay, with circular previous/next navigation, keyboard affordances,
//! and a delayed image swap so CSS can animate the old image out.
//!
//! This crate owns the _behavior_ only. It does **not** touch a DOM, a
//! window, or a timer. Hosts implement two capabilities:
//! - [`Surface`]: the overlay, its optional close/prev/next controls, the
//!   image element, a scoped key listener, and a one-shot timer.
//! - [`Viewport`]: the current viewport size, used for contain fitting.
//!
//! and feed events back in: clicks and keys through [`Lightbox`] methods,
//! fired timers through [`Lightbox::complete_swap`], image loads through
//! [`Lightbox::image_loaded`]. Page-wide notifications (layout changes,
//! arrow keys) go through a [`Registry`] that owns every lightbox on the page.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use vitrine_lightbox::{
//!     ContainFit, Control, LightboxOptions, Presentation, Registry, SourceId, SourceSpec,
//!     Surface, SwapTicket,
//! };
//!
//! #[derive(Default)]
//! struct Overlay {
//!     shown: bool,
//!     src: Option<String>,
//!     fit: Option<ContainFit>,
//!     timer: Option<SwapTicket>,
//! }
//!
//! impl Surface for Overlay {
//!     fn set_presentation(&mut self, state: Presentation, on: bool) {
//!         if state == Presentation::Shown {
//!             self.shown = on;
//!         }
//!     }
//!     fn has_control(&self, _: Control) -> bool { false }
//!     fn set_control_disabled(&mut self, _: Control, _: bool) {}
//!     fn set_control_focusable(&mut self, _: Control, _: bool) {}
//!     fn focus_control(&mut self, _: Control) {}
//!     fn set_source_focusable(&mut self, _: SourceId) {}
//!     fn set_key_listener(&mut self, _: bool) {}
//!     fn schedule_swap(&mut self, _delay_ms: u32, ticket: SwapTicket) {
//!         self.timer = Some(ticket);
//!     }
//!     fn set_image_source(&mut self, url: &str) { self.src = Some(url.into()); }
//!     fn set_image_fit(&mut self, fit: ContainFit) { self.fit = Some(fit); }
//! }
//!
//! let mut page = Registry::new();
//! let id = page
//!     .create(
//!         Overlay::default(),
//!         Size::new(1000.0, 1000.0),
//!         [
//!             SourceSpec::new("wide.jpg").with_ratio(2.0),
//!             SourceSpec::new("tall.jpg"),
//!         ],
//!         LightboxOptions::default(),
//!     )
//!     .unwrap();
//!
//! let lightbox = page.get_mut(id).unwrap();
//! lightbox.show(SourceId::new(0)).unwrap();
//! assert!(lightbox.surface().shown);
//!
//! // The host's timer fires.
//! let ticket = lightbox.surface_mut().timer.take().unwrap();
//! assert!(lightbox.complete_swap(ticket));
//! assert_eq!(lightbox.surface().src.as_deref(), Some("wide.jpg"));
//!
//! let fit = lightbox.surface().fit.unwrap();
//! assert_eq!((fit.width_percent, fit.height_percent), (100.0, 50.0));
//! ```
//!
//! ## Transitions and overlapping requests
//!
//! With [`LightboxOptions::transition_ms`] set, [`Lightbox::show`] applies
//! [`Presentation::Transitioning`] right away, the swap happens when the
//! timer fires, and the state is cleared only once the new image has loaded.
//! Each `show` issues a fresh [`SwapTicket`]; if the user navigates again
//! before the timer fires, the earlier ticket is stale and
//! [`Lightbox::complete_swap`] ignores it. The last request wins.
//!
//! ## Fitting
//!
//! [`contain_fit`] scales the image against the viewport's aspect ratio. When
//! a source declares no ratio, the fit is deferred until the image loads and
//! its natural size is reported through [`Lightbox::image_loaded`].
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod error;
mod fit;
mod key;
mod lightbox;
mod options;
mod registry;
mod source;
mod surface;

pub use error::LightboxError;
pub use fit::{ContainFit, contain_fit};
pub use key::{Arrow, Key};
pub use lightbox::{Lightbox, SwapTicket};
pub use options::{ChangeCallback, ChangeEvent, LightboxOptions};
pub use registry::{LightboxId, Registry};
pub use source::{Source, SourceId, SourceSpec};
pub use surface::{Control, Presentation, Surface, Viewport};
