// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities the lightbox needs from its host.
//!
//! The state machine in [`Lightbox`](crate::Lightbox) never touches a DOM or
//! a window directly. It drives a [`Surface`] (the overlay, its controls, and
//! the image element) and reads a [`Viewport`]. A browser integration
//! implements these over `web-sys`; tests implement them with plain fields.

use kurbo::Size;

use crate::fit::ContainFit;
use crate::lightbox::SwapTicket;
use crate::source::SourceId;

/// Presentation flags toggled on the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Presentation {
    /// The overlay is visible.
    Shown,
    /// A transition is running; the old image is animating out.
    Transitioning,
}

/// Optional controls attached to the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// Dismisses the overlay.
    Close,
    /// Shows the previous source.
    Prev,
    /// Shows the next source.
    Next,
}

/// The interactive surface a lightbox drives.
///
/// Methods are called from the lightbox state machine only; hosts route
/// their own input back through [`Lightbox`](crate::Lightbox) methods.
pub trait Surface {
    /// Applies or clears a presentation flag on the overlay.
    fn set_presentation(&mut self, state: Presentation, on: bool);

    /// Whether the host configured this control.
    fn has_control(&self, control: Control) -> bool;

    /// Marks a control as disabled (a styling hint only).
    fn set_control_disabled(&mut self, control: Control, disabled: bool);

    /// Adds a control to, or removes it from, the keyboard tab order.
    fn set_control_focusable(&mut self, control: Control, focusable: bool);

    /// Moves keyboard focus to a control.
    fn focus_control(&mut self, control: Control);

    /// Adds a trigger to the keyboard tab order.
    fn set_source_focusable(&mut self, source: SourceId);

    /// Attaches (`true`) or detaches (`false`) the key listener scoped to this lightbox.
    fn set_key_listener(&mut self, attached: bool);

    /// Arms the transition timer.
    ///
    /// After `delay_ms` (or on the next turn for `0`), the host must call
    /// [`Lightbox::complete_swap`](crate::Lightbox::complete_swap) with
    /// `ticket`. Hosts may cancel a previously armed timer.
    fn schedule_swap(&mut self, delay_ms: u32, ticket: SwapTicket);

    /// Points the image element at a new URL.
    fn set_image_source(&mut self, url: &str);

    /// Sizes the image element inside the sizing container.
    fn set_image_fit(&mut self, fit: ContainFit);
}

/// Reports the current viewport size.
pub trait Viewport {
    /// Current viewport size in CSS pixels.
    fn size(&self) -> Size;
}

impl<V: Viewport + ?Sized> Viewport for &V {
    fn size(&self) -> Size {
        (**self).size()
    }
}

impl Viewport for Size {
    fn size(&self) -> Size {
        *self
    }
}
