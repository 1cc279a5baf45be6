//! Scrollable item surface
//!
//! Lays the items out as a single horizontal row where every item is a
//! fixed fraction of the viewport wide and the full viewport tall. Leading
//! and trailing insets of half the leftover viewport width let the first
//! and last item be centered, so centering item `i` always means
//! `scroll_x == i * stride`.
//!
//! Frames are reported in the configured [`CoordinateSpace`], whose origin
//! is the top-left corner of the viewport. They are recomputed on every
//! [`CarouselSurface::layout`] pass.

pub mod animator;
pub mod diff;
pub mod visibility;

use std::collections::HashMap;
use std::ops::Range;
use std::time::Instant;

use crate::geometry::{CoordinateSpace, Frame, Size, SpacedFrame};
use crate::image::{ImageProvider, ImageState, NoImages};
use crate::infra::config::{CarouselConfig, SizeClass};
use crate::infra::constants::snap::OFFSET_EPSILON;
use crate::item::{CarouselItem, ItemId};

pub use animator::SnapAnimator;
pub use diff::ItemDiff;
pub use visibility::{ItemSlot, VisibilityPhase, VisibilityTransition};

/// Host list renderer contract: apply a keyed item list, find an item,
/// report its frame and scroll it to the center.
pub trait ItemSurface {
    fn set_items(&mut self, items: Vec<CarouselItem>) -> ItemDiff;

    fn position_of(&self, id: ItemId) -> Option<usize>;

    fn frame_of(&self, id: ItemId) -> Option<SpacedFrame>;

    fn scroll_to_center(&mut self, item: Option<&CarouselItem>) -> ScrollOutcome;
}

/// What a scroll-to-center request did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollOutcome {
    /// An animation toward `to` was started (or retargeted).
    Started { from: f32, to: f32 },
    /// The offset already is, or is already heading to, the target.
    AlreadyCentered,
    /// No item given, or the item is not displayed.
    NotFound,
}

impl ScrollOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// One item placed by a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutItem {
    pub index: usize,
    pub item: CarouselItem,
    pub frame: SpacedFrame,
    pub phase: VisibilityPhase,
    pub image: ImageState,
}

/// Result of [`CarouselSurface::layout`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPass {
    pub items: Vec<LaidOutItem>,
    pub transitions: Vec<VisibilityTransition>,
    pub scroll_x: f32,
    /// True while a snap animation is still running after this pass.
    pub animating: bool,
}

/// Row geometry derived from the viewport and the config.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RowMetrics {
    pub viewport: Size,
    pub item_width: f32,
    pub stride: f32,
    pub leading_inset: f32,
    pub max_scroll: f32,
}

impl RowMetrics {
    fn compute(viewport: Size, config: &CarouselConfig, total: usize) -> Self {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Self {
                viewport,
                ..Self::default()
            };
        }
        let item_width = viewport.width * config.item_width_fraction;
        let stride = item_width + config.item_spacing.max(0.0);
        Self {
            viewport,
            item_width,
            stride,
            leading_inset: (viewport.width - item_width) / 2.0,
            max_scroll: total.saturating_sub(1) as f32 * stride,
        }
    }

    pub fn is_laid_out(&self) -> bool {
        self.stride > 0.0
    }

    /// Scroll offset that centers item `index`.
    #[inline]
    pub fn center_offset(&self, index: usize) -> f32 {
        index as f32 * self.stride
    }

    pub fn viewport_frame(&self) -> Frame {
        Frame::from_size(self.viewport)
    }
}

/// Single-row carousel surface.
#[derive(Debug)]
pub struct CarouselSurface<P: ImageProvider = NoImages> {
    config: CarouselConfig,
    items: Vec<CarouselItem>,
    index: HashMap<ItemId, usize>,
    slots: HashMap<ItemId, ItemSlot>,
    metrics: RowMetrics,
    scroll_x: f32,
    animator: SnapAnimator,
    dragging: bool,
    images: P,
}

impl CarouselSurface<NoImages> {
    pub fn without_images(config: CarouselConfig) -> Self {
        Self::new(config, NoImages)
    }
}

impl<P: ImageProvider> CarouselSurface<P> {
    pub fn new(config: CarouselConfig, images: P) -> Self {
        Self {
            config,
            items: Vec::new(),
            index: HashMap::new(),
            slots: HashMap::new(),
            metrics: RowMetrics::default(),
            scroll_x: 0.0,
            animator: SnapAnimator::new(),
            dragging: false,
            images,
        }
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn space(&self) -> CoordinateSpace {
        self.config.space
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    pub fn metrics(&self) -> RowMetrics {
        self.metrics
    }

    pub fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn images(&self) -> &P {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut P {
        &mut self.images
    }

    pub fn slot(&self, id: ItemId) -> Option<&ItemSlot> {
        self.slots.get(&id)
    }

    /// Apply a new item list and run `completion` once frames reflect it.
    ///
    /// Anything that depends on the new geometry, such as a pending
    /// scroll-to-center, belongs in `completion`.
    pub fn set_items_then<F>(&mut self, items: Vec<CarouselItem>, completion: F) -> ItemDiff
    where
        F: FnOnce(&mut Self),
    {
        let diff = self.apply_items(items);
        completion(self);
        diff
    }

    fn apply_items(&mut self, items: Vec<CarouselItem>) -> ItemDiff {
        let diff = ItemDiff::compute(&self.items, &items);
        if diff::has_duplicate_ids(&items) {
            log::warn!(
                "CarouselSurface: item list contains duplicate ids; duplicates share one slot"
            );
        }

        for id in &diff.removed {
            if let Some(mut slot) = self.slots.remove(id) {
                slot.cancel_load();
            }
        }

        self.index.clear();
        for (pos, item) in items.iter().enumerate() {
            self.index.entry(item.id()).or_insert(pos);
            self.slots.entry(item.id()).or_default();
        }
        self.items = items;

        // A shorter row clamps the offset to its new end.
        self.recompute_metrics();
        if let Some(target) = self.animator.target()
            && target > self.metrics.max_scroll
        {
            self.animator.cancel();
        }

        log::debug!(
            "CarouselSurface: applied {} items (+{} -{} ~{})",
            self.items.len(),
            diff.inserted.len(),
            diff.removed.len(),
            diff.moved.len()
        );
        diff
    }

    /// Update the viewport size. The item under the center stays there.
    pub fn resize(&mut self, width: f32, height: f32) {
        let viewport = Size::new(width.max(0.0), height.max(0.0));
        if viewport == self.metrics.viewport {
            return;
        }
        let index_position = self.index_position();
        let target_index = self
            .animator
            .target()
            .filter(|_| self.metrics.is_laid_out())
            .map(|target| target / self.metrics.stride);

        self.metrics = RowMetrics::compute(viewport, &self.config, self.items.len());
        self.set_scroll_clamped(index_position * self.metrics.stride);

        if let Some(index) = target_index {
            let target = index * self.metrics.stride;
            self.animator.start(
                self.scroll_x,
                target,
                self.config.center_duration_ms,
                self.config.snap_easing,
            );
        }
        log::debug!(
            "CarouselSurface: viewport {}x{}, item width {}",
            viewport.width,
            viewport.height,
            self.metrics.item_width
        );
    }

    /// Switch between the compact and regular item width.
    pub fn set_size_class(&mut self, size_class: SizeClass) {
        if self.config.size_class == size_class {
            return;
        }
        let index_position = self.index_position();
        self.config = self.config.with_size_class(size_class);
        self.recompute_metrics();
        self.set_scroll_clamped(index_position * self.metrics.stride);
    }

    fn recompute_metrics(&mut self) {
        self.metrics = RowMetrics::compute(self.metrics.viewport, &self.config, self.items.len());
        self.set_scroll_clamped(self.scroll_x);
    }

    fn set_scroll_clamped(&mut self, x: f32) {
        self.scroll_x = x.clamp(0.0, self.metrics.max_scroll);
    }

    /// Fractional index of the item under the viewport center.
    pub fn index_position(&self) -> f32 {
        if !self.metrics.is_laid_out() {
            return 0.0;
        }
        self.scroll_x / self.metrics.stride
    }

    /// Index of the item closest to the viewport center.
    pub fn centered_index(&self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        let nearest = self.index_position().round().max(0.0) as usize;
        Some(nearest.min(self.items.len() - 1))
    }

    pub fn centered_item(&self) -> Option<&CarouselItem> {
        self.centered_index().map(|i| &self.items[i])
    }

    /// Frame of the item at `index` for the current scroll offset.
    pub fn frame_at(&self, index: usize) -> Frame {
        let m = &self.metrics;
        if !m.is_laid_out() {
            return Frame::ZERO;
        }
        Frame::new(
            m.leading_inset + (m.center_offset(index) - self.scroll_x),
            0.0,
            m.item_width,
            m.viewport.height,
        )
    }

    /// Items worth laying out: everything intersecting the viewport plus
    /// the configured overscan on both sides.
    pub fn window(&self) -> Range<usize> {
        let total = self.items.len();
        let m = &self.metrics;
        if total == 0 || !m.is_laid_out() {
            return 0..0;
        }
        let first = ((self.scroll_x - m.leading_inset - m.item_width) / m.stride).floor() + 1.0;
        let end = ((self.scroll_x + m.viewport.width - m.leading_inset) / m.stride).ceil();
        let first = (first.max(0.0) as usize).min(total);
        let end = (end.max(0.0) as usize).min(total);

        let start = first.saturating_sub(self.config.overscan_before);
        let end = end.saturating_add(self.config.overscan_after).min(total);
        start..end.max(start)
    }

    /// Start an animated scroll to `target`, unless the offset already is
    /// (or is already animating to) that target.
    fn animate_to(&mut self, target: f32, duration_ms: u64) -> ScrollOutcome {
        let target = target.clamp(0.0, self.metrics.max_scroll);
        let heading_there = self
            .animator
            .target()
            .is_some_and(|current| (current - target).abs() <= OFFSET_EPSILON);
        let already_there =
            !self.animator.is_active() && (self.scroll_x - target).abs() <= OFFSET_EPSILON;
        if already_there {
            self.scroll_x = target;
        }
        if heading_there || already_there {
            return ScrollOutcome::AlreadyCentered;
        }

        let from = self.scroll_x;
        self.animator
            .start(from, target, duration_ms, self.config.snap_easing);
        ScrollOutcome::Started { from, to: target }
    }

    fn center_target(&self, item: Option<&CarouselItem>) -> Option<(usize, f32)> {
        let item = item?;
        let index = self.position_of(item.id())?;
        Some((index, self.metrics.center_offset(index)))
    }

    /// Jump straight to the centered position of `item`.
    pub fn scroll_to_center_immediate(&mut self, item: Option<&CarouselItem>) -> ScrollOutcome {
        let Some((_, target)) = self.center_target(item) else {
            return ScrollOutcome::NotFound;
        };
        self.animator.cancel();
        if (self.scroll_x - target).abs() <= OFFSET_EPSILON {
            self.scroll_x = target;
            return ScrollOutcome::AlreadyCentered;
        }
        let from = self.scroll_x;
        self.set_scroll_clamped(target);
        ScrollOutcome::Started {
            from,
            to: self.scroll_x,
        }
    }

    // ===== user-driven scrolling =====

    pub fn begin_drag(&mut self) {
        self.animator.cancel();
        self.dragging = true;
    }

    /// Move the content by `dx` (positive drags content to the right, which
    /// reveals earlier items).
    pub fn drag_by(&mut self, dx: f32) {
        if !self.dragging {
            self.begin_drag();
        }
        self.set_scroll_clamped(self.scroll_x - dx);
    }

    /// Release the drag and snap to the nearest item.
    pub fn end_drag(&mut self) -> ScrollOutcome {
        self.dragging = false;
        let Some(index) = self.centered_index() else {
            return ScrollOutcome::NotFound;
        };
        let target = self.metrics.center_offset(index);
        self.animate_to(target, self.config.drag_settle_duration_ms)
    }

    /// Record an offset reported by a host scroll container. Returns false
    /// when the offset did not actually change.
    pub fn on_offset_changed(&mut self, x: f32) -> bool {
        let previous = self.scroll_x;
        self.set_scroll_clamped(x);
        (self.scroll_x - previous).abs() > OFFSET_EPSILON
    }

    // ===== layout =====

    /// Advance any running animation, then recompute every frame in the
    /// window and drive the visibility lifecycle.
    pub fn layout(&mut self, now: Instant) -> LayoutPass {
        if let Some(x) = self.animator.tick(now) {
            self.set_scroll_clamped(x);
        }
        self.images.poll();

        let space = self.config.space;
        if !self.metrics.is_laid_out() {
            // No geometry yet: report every item unplaced.
            let items = self
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| LaidOutItem {
                    index,
                    item: item.clone(),
                    frame: SpacedFrame::new(space, Frame::ZERO),
                    phase: VisibilityPhase::Offscreen,
                    image: ImageState::Pending,
                })
                .collect();
            return LayoutPass {
                items,
                transitions: Vec::new(),
                scroll_x: self.scroll_x,
                animating: self.animator.is_active(),
            };
        }

        let viewport = self.metrics.viewport_frame();
        let window = self.window();
        let mut transitions = Vec::new();
        let mut laid_out = Vec::with_capacity(window.len());

        for index in window.clone() {
            let item = &self.items[index];
            let id = item.id();
            // Later duplicates are drawn but only the first drives the slot.
            let owns_slot = self.index.get(&id) == Some(&index);
            let frame = self.frame_at(index);
            let slot = self.slots.entry(id).or_default();
            if owns_slot
                && let Some((from, to)) =
                    slot.advance(frame.intersects(&viewport), item.image_url(), &mut self.images)
            {
                transitions.push(VisibilityTransition { id, from, to });
            }
            laid_out.push(LaidOutItem {
                index,
                item: item.clone(),
                frame: SpacedFrame::new(space, frame),
                phase: slot.phase(),
                image: slot.image(),
            });
        }

        // Items that left the window entirely still need to finish their
        // lifecycle.
        for (pos, item) in self.items.iter().enumerate() {
            if window.contains(&pos) || self.index.get(&item.id()) != Some(&pos) {
                continue;
            }
            let Some(slot) = self.slots.get_mut(&item.id()) else {
                continue;
            };
            if slot.phase() == VisibilityPhase::Offscreen {
                continue;
            }
            if let Some((from, to)) = slot.advance(false, None, &mut self.images) {
                transitions.push(VisibilityTransition {
                    id: item.id(),
                    from,
                    to,
                });
            }
        }

        for t in &transitions {
            log::trace!("CarouselSurface: {} {:?} -> {:?}", t.id, t.from, t.to);
        }

        LayoutPass {
            items: laid_out,
            transitions,
            scroll_x: self.scroll_x,
            animating: self.animator.is_active(),
        }
    }

    /// Item whose slot contains the point, using the current frames.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<(usize, &CarouselItem, SpacedFrame)> {
        self.window().find_map(|index| {
            let frame = self.frame_at(index);
            frame
                .contains(x, y)
                .then(|| (index, &self.items[index], SpacedFrame::new(self.config.space, frame)))
        })
    }
}

impl<P: ImageProvider> ItemSurface for CarouselSurface<P> {
    fn set_items(&mut self, items: Vec<CarouselItem>) -> ItemDiff {
        self.apply_items(items)
    }

    fn position_of(&self, id: ItemId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    fn frame_of(&self, id: ItemId) -> Option<SpacedFrame> {
        let index = self.position_of(id)?;
        Some(SpacedFrame::new(self.config.space, self.frame_at(index)))
    }

    fn scroll_to_center(&mut self, item: Option<&CarouselItem>) -> ScrollOutcome {
        let Some((index, target)) = self.center_target(item) else {
            log::debug!("CarouselSurface: scroll_to_center on an item that is not displayed");
            return ScrollOutcome::NotFound;
        };
        let outcome = self.animate_to(target, self.config.center_duration_ms);
        log::debug!("CarouselSurface: scroll_to_center({index}) -> {outcome:?}");
        outcome
    }
}
