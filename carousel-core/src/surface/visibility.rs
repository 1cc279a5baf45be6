//! Per-item visibility lifecycle
//!
//! `Offscreen -> Appearing -> Visible -> Disappearing -> Offscreen`, driven
//! by viewport intersection checks once per layout pass. Appearing starts
//! the deferred image load; Disappearing cancels it.

use url::Url;

use crate::image::{ImageProvider, ImageState, LoadHandle};
use crate::item::ItemId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VisibilityPhase {
    #[default]
    Offscreen,
    Appearing,
    Visible,
    Disappearing,
}

impl VisibilityPhase {
    /// Next phase for one layout pass. `intersects` is whether the item's
    /// frame overlaps the viewport during this pass.
    pub fn next(self, intersects: bool) -> Self {
        use VisibilityPhase::*;
        match (self, intersects) {
            (Offscreen, true) | (Disappearing, true) => Appearing,
            (Appearing, true) | (Visible, true) => Visible,
            (Appearing, false) | (Visible, false) => Disappearing,
            (Disappearing, false) | (Offscreen, false) => Offscreen,
        }
    }

    pub fn is_on_screen(self) -> bool {
        matches!(self, Self::Appearing | Self::Visible)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityTransition {
    pub id: ItemId,
    pub from: VisibilityPhase,
    pub to: VisibilityPhase,
}

/// Surface-side state kept for each displayed item across updates.
#[derive(Debug, Clone, Default)]
pub struct ItemSlot {
    phase: VisibilityPhase,
    load: Option<LoadHandle>,
}

impl ItemSlot {
    pub fn phase(&self) -> VisibilityPhase {
        self.phase
    }

    pub fn image(&self) -> ImageState {
        self.load
            .as_ref()
            .map_or(ImageState::Pending, LoadHandle::state)
    }

    pub fn load(&self) -> Option<&LoadHandle> {
        self.load.as_ref()
    }

    /// Advance one pass and run the side effects of the new phase.
    pub fn advance<P: ImageProvider>(
        &mut self,
        intersects: bool,
        image_url: Option<&Url>,
        images: &mut P,
    ) -> Option<(VisibilityPhase, VisibilityPhase)> {
        let from = self.phase;
        let to = from.next(intersects);
        if from == to {
            return None;
        }
        self.phase = to;

        match to {
            VisibilityPhase::Appearing => self.start_load(image_url, images),
            VisibilityPhase::Disappearing => self.cancel_load(),
            VisibilityPhase::Visible | VisibilityPhase::Offscreen => {}
        }
        Some((from, to))
    }

    fn start_load<P: ImageProvider>(
        &mut self,
        image_url: Option<&Url>,
        images: &mut P,
    ) {
        let Some(url) = image_url else {
            return;
        };
        let reusable = self.load.as_ref().is_some_and(|load| {
            matches!(load.state(), ImageState::Pending | ImageState::Ready(_))
        });
        if !reusable {
            log::trace!("ItemSlot: requesting image {url}");
            self.load = Some(images.request(url));
        }
    }

    /// Best-effort, idempotent cancellation of a pending load.
    pub fn cancel_load(&mut self) {
        if let Some(load) = &self.load
            && load.cancel()
        {
            log::trace!("ItemSlot: cancelled pending image load");
        }
    }
}
