// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use tracing::warn;

use crate::error::LightboxError;
use crate::key::{Arrow, Key};
use crate::lightbox::Lightbox;
use crate::options::LightboxOptions;
use crate::source::SourceSpec;
use crate::surface::{Surface, Viewport};

/// Handle to a lightbox inside a [`Registry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LightboxId(usize);

impl LightboxId {
    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Every lightbox on a page, for page-wide broadcasts.
///
/// The integrator creates one registry, registers each lightbox with it, and
/// routes the page-wide layout-change and arrow-key notifications here.
/// Lightboxes are never removed; handles stay valid for the registry's
/// lifetime.
#[derive(Debug)]
pub struct Registry<S, V> {
    lightboxes: Vec<Lightbox<S, V>>,
}

impl<S, V> Default for Registry<S, V> {
    fn default() -> Self {
        Self {
            lightboxes: Vec::new(),
        }
    }
}

impl<S: Surface, V: Viewport> Registry<S, V> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The handle the next [`register`](Self::register) call will return.
    ///
    /// Hosts whose surfaces need to route callbacks back to their own
    /// lightbox can capture this before building the surface.
    #[must_use]
    pub fn next_id(&self) -> LightboxId {
        LightboxId(self.lightboxes.len())
    }

    /// Adds a lightbox.
    pub fn register(&mut self, lightbox: Lightbox<S, V>) -> LightboxId {
        let id = self.next_id();
        self.lightboxes.push(lightbox);
        id
    }

    /// Builds a lightbox and registers it.
    pub fn create(
        &mut self,
        surface: S,
        viewport: V,
        sources: impl IntoIterator<Item = SourceSpec>,
        options: LightboxOptions,
    ) -> Result<LightboxId, LightboxError> {
        let lightbox = Lightbox::new(surface, viewport, sources, options)?;
        Ok(self.register(lightbox))
    }

    /// Looks up a lightbox.
    #[must_use]
    pub fn get(&self, id: LightboxId) -> Option<&Lightbox<S, V>> {
        self.lightboxes.get(id.0)
    }

    /// Looks up a lightbox mutably.
    pub fn get_mut(&mut self, id: LightboxId) -> Option<&mut Lightbox<S, V>> {
        self.lightboxes.get_mut(id.0)
    }

    /// Iterates over all lightboxes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (LightboxId, &Lightbox<S, V>)> {
        self.lightboxes
            .iter()
            .enumerate()
            .map(|(index, lightbox)| (LightboxId(index), lightbox))
    }

    /// Number of registered lightboxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lightboxes.len()
    }

    /// Whether nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lightboxes.is_empty()
    }

    /// Re-fits every lightbox after a layout or viewport change.
    ///
    /// Hidden lightboxes are asked too; they ignore it. Returns the number
    /// of lightboxes asked.
    pub fn layout_changed(&mut self) -> usize {
        for lightbox in &mut self.lightboxes {
            lightbox.resize();
        }
        self.lightboxes.len()
    }

    /// Navigates every shown lightbox one step.
    ///
    /// Returns how many lightboxes moved.
    pub fn arrow_key(&mut self, arrow: Arrow) -> usize {
        let mut moved = 0;
        for lightbox in self.lightboxes.iter_mut().filter(|lb| lb.is_shown()) {
            let result = match arrow {
                Arrow::Left => lightbox.prev(),
                Arrow::Right => lightbox.next(),
            };
            match result {
                Ok(()) => moved += 1,
                Err(err) => warn!(%err, "arrow navigation failed"),
            }
        }
        moved
    }

    /// Routes a page-wide key release; only arrows are handled.
    pub fn key_released(&mut self, key: Key) -> usize {
        match key {
            Key::Arrow(arrow) => self.arrow_key(arrow),
            Key::Escape | Key::Enter => 0,
        }
    }
}
