//! Presentation composition
//!
//! Wires the store, the surface and the centering model together:
//!
//! - on layout, every laid-out item's frame goes through the centering
//!   model and comes back out as a [`TileView`] carrying its live scale and
//!   opacity;
//! - on tap, the centered item triggers the primary action and any other
//!   item is selected, which scrolls it to the center.

use std::fmt;
use std::time::Instant;

use crate::centering::{CenteringModel, CenteringResult};
use crate::error::Result;
use crate::geometry::{Frame, SpacedFrame};
use crate::image::{ImageProvider, ImageState, NoImages};
use crate::infra::config::{CarouselConfig, SizeClass};
use crate::item::CarouselItem;
use crate::store::CarouselStore;
use crate::surface::{
    CarouselSurface, ItemDiff, ItemSurface, ScrollOutcome, VisibilityPhase,
};

/// Everything a host needs to draw one item for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TileView {
    pub item: CarouselItem,
    pub index: usize,
    /// Unscaled slot frame in the carousel coordinate space.
    pub frame: Frame,
    pub distance_from_center: f32,
    pub scale: f32,
    pub opacity: f32,
    pub is_centered: bool,
    pub is_selected: bool,
    pub phase: VisibilityPhase,
    pub image: ImageState,
    /// Thumbnail height before scaling: slot width over the video aspect
    /// ratio.
    pub tile_height: f32,
}

impl TileView {
    /// Thumbnail rectangle after scaling, centered in the slot.
    pub fn visual_frame(&self) -> Frame {
        let height = self.tile_height.min(self.frame.height);
        Frame::new(
            self.frame.x,
            self.frame.mid_y() - height / 2.0,
            self.frame.width,
            height,
        )
        .scaled_about_center(self.scale)
    }
}

/// Result of routing a tap.
#[derive(Debug, Clone, PartialEq)]
pub enum TapOutcome {
    /// The centered item was tapped.
    PrimaryAction(CarouselItem),
    /// An off-center item was selected and is being scrolled to the center.
    Recentering {
        item: CarouselItem,
        scroll: ScrollOutcome,
    },
}

/// Input to [`Carousel::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselMessage {
    Tap { item: CarouselItem, frame: SpacedFrame },
    TapAt { x: f32, y: f32 },
    Select(CarouselItem),
    SelectNext,
    SelectPrevious,
    DragStarted,
    DraggedBy(f32),
    DragEnded,
    Resized { width: f32, height: f32 },
    SizeClassChanged(SizeClass),
    ItemsReplaced(Vec<CarouselItem>),
    Tick(Instant),
}

type PrimaryAction = Box<dyn FnMut(&CarouselItem)>;

/// A carousel: store, surface and centering model driven as one.
pub struct Carousel<P: ImageProvider = NoImages> {
    store: CarouselStore,
    surface: CarouselSurface<P>,
    model: CenteringModel,
    config: CarouselConfig,
    primary_action: Option<PrimaryAction>,
}

impl<P: ImageProvider + fmt::Debug> fmt::Debug for Carousel<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("store", &self.store)
            .field("surface", &self.surface)
            .field("model", &self.model)
            .field("primary_action", &self.primary_action.is_some())
            .finish()
    }
}

impl Carousel<NoImages> {
    pub fn without_images(
        config: CarouselConfig,
        seed: Vec<CarouselItem>,
    ) -> Result<Self> {
        Self::new(config, seed, NoImages)
    }
}

impl<P: ImageProvider> Carousel<P> {
    pub fn new(
        config: CarouselConfig,
        seed: Vec<CarouselItem>,
        images: P,
    ) -> Result<Self> {
        config.validate()?;
        let mut surface = CarouselSurface::new(config, images);
        surface.set_items(seed.clone());
        Ok(Self {
            store: CarouselStore::new(seed),
            surface,
            model: CenteringModel::from_config(&config),
            config,
            primary_action: None,
        })
    }

    /// Hook for taps on the centered item.
    pub fn on_primary_action(
        &mut self,
        action: impl FnMut(&CarouselItem) + 'static,
    ) {
        self.primary_action = Some(Box::new(action));
    }

    pub fn store(&self) -> &CarouselStore {
        &self.store
    }

    pub fn surface(&self) -> &CarouselSurface<P> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut CarouselSurface<P> {
        &mut self.surface
    }

    pub fn model(&self) -> &CenteringModel {
        &self.model
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn selected(&self) -> Option<&CarouselItem> {
        self.store.selected()
    }

    pub fn centered_item(&self) -> Option<&CarouselItem> {
        self.surface.centered_item()
    }

    /// Run one layout pass and build a tile per laid-out item.
    pub fn frame(&mut self, now: Instant) -> Vec<TileView> {
        let aspect_ratio = self.config.video_aspect_ratio;
        let selected = self.store.selected().map(CarouselItem::id);
        let pass = self.surface.layout(now);
        let viewport_width = self.surface.metrics().viewport.width;

        pass.items
            .into_iter()
            .map(|laid| {
                let result = self.model.evaluate(viewport_width, &laid.frame);
                let frame = laid.frame.frame;
                TileView {
                    is_selected: selected == Some(laid.item.id()),
                    item: laid.item,
                    index: laid.index,
                    frame,
                    distance_from_center: result.distance_from_center,
                    scale: result.scale,
                    opacity: result.opacity,
                    is_centered: result.is_centered,
                    phase: laid.phase,
                    image: laid.image,
                    tile_height: frame.width / aspect_ratio,
                }
            })
            .collect()
    }

    /// Generic form of [`Self::frame`]: `render` is called with each item,
    /// its frame and the centering result and returns whatever the host
    /// draws.
    pub fn render_with<R, F>(&mut self, now: Instant, mut render: F) -> Vec<R>
    where
        F: FnMut(&CarouselItem, &SpacedFrame, &CenteringResult) -> R,
    {
        let pass = self.surface.layout(now);
        let viewport_width = self.surface.metrics().viewport.width;
        pass.items
            .iter()
            .map(|laid| {
                let result = self.model.evaluate(viewport_width, &laid.frame);
                render(&laid.item, &laid.frame, &result)
            })
            .collect()
    }

    /// Route a tap on `item` whose current frame is `frame`.
    pub fn tap(&mut self, item: &CarouselItem, frame: &SpacedFrame) -> TapOutcome {
        let viewport_width = self.surface.metrics().viewport.width;
        let result = self.model.evaluate(viewport_width, frame);
        if result.is_centered {
            log::debug!("Carousel: primary action on '{}'", item.title());
            if let Some(action) = self.primary_action.as_mut() {
                action(item);
            }
            return TapOutcome::PrimaryAction(item.clone());
        }

        let scroll = self.select(item.clone());
        TapOutcome::Recentering {
            item: item.clone(),
            scroll,
        }
    }

    /// Hit-test a point in the carousel space and route the tap.
    pub fn tap_at(&mut self, x: f32, y: f32) -> Option<TapOutcome> {
        let (item, frame) = self
            .surface
            .hit_test(x, y)
            .map(|(_, item, frame)| (item.clone(), frame))?;
        Some(self.tap(&item, &frame))
    }

    /// Select `item` and scroll it to the center.
    pub fn select(&mut self, item: CarouselItem) -> ScrollOutcome {
        let change = self.store.select(item);
        self.surface.scroll_to_center(Some(&change.current))
    }

    /// Select the neighbour of the centered item, `step` positions away.
    pub fn select_relative(&mut self, step: isize) -> Option<ScrollOutcome> {
        let current = self.surface.centered_index()?;
        let last = self.surface.items().len().checked_sub(1)?;
        let target = current.saturating_add_signed(step).min(last);
        let item = self.surface.items()[target].clone();
        Some(self.select(item))
    }

    /// Replace the items in the store and on the surface, then bring the
    /// surviving selection back to the center against the new geometry.
    pub fn replace_items(&mut self, items: Vec<CarouselItem>) -> ItemDiff {
        self.store.replace_items(items.clone());
        let selected = self.store.selected().cloned();
        self.surface.set_items_then(items, move |surface| {
            surface.scroll_to_center(selected.as_ref());
        })
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface.resize(width, height);
    }

    pub fn set_size_class(&mut self, size_class: SizeClass) {
        self.config = self.config.with_size_class(size_class);
        self.surface.set_size_class(size_class);
    }

    /// Elm-style entry point. Only taps produce an outcome.
    pub fn update(&mut self, message: CarouselMessage) -> Option<TapOutcome> {
        match message {
            CarouselMessage::Tap { item, frame } => Some(self.tap(&item, &frame)),
            CarouselMessage::TapAt { x, y } => self.tap_at(x, y),
            CarouselMessage::Select(item) => {
                self.select(item);
                None
            }
            CarouselMessage::SelectNext => {
                self.select_relative(1);
                None
            }
            CarouselMessage::SelectPrevious => {
                self.select_relative(-1);
                None
            }
            CarouselMessage::DragStarted => {
                self.surface.begin_drag();
                None
            }
            CarouselMessage::DraggedBy(dx) => {
                self.surface.drag_by(dx);
                None
            }
            CarouselMessage::DragEnded => {
                self.surface.end_drag();
                None
            }
            CarouselMessage::Resized { width, height } => {
                self.resize(width, height);
                None
            }
            CarouselMessage::SizeClassChanged(size_class) => {
                self.set_size_class(size_class);
                None
            }
            CarouselMessage::ItemsReplaced(items) => {
                self.replace_items(items);
                None
            }
            CarouselMessage::Tick(now) => {
                self.surface.layout(now);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::seed::video_seed;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn carousel() -> Carousel {
        let mut carousel =
            Carousel::without_images(CarouselConfig::default(), video_seed())
                .unwrap();
        carousel.resize(300.0, 200.0);
        carousel
    }

    fn settle(carousel: &mut Carousel) -> Vec<TileView> {
        let t0 = Instant::now();
        carousel.frame(t0);
        carousel.frame(t0 + Duration::from_secs(5))
    }

    #[test]
    fn centered_tile_is_full_size() {
        let mut carousel = carousel();
        let tiles = settle(&mut carousel);
        let first = tiles.iter().find(|t| t.index == 0).unwrap();
        assert!(first.is_centered);
        assert_eq!(first.scale, 1.0);
        let second = tiles.iter().find(|t| t.index == 1).unwrap();
        assert!(!second.is_centered);
        assert!(second.scale < 1.0);
    }

    #[test]
    fn tapping_off_center_selects_and_recenters() {
        let mut carousel = carousel();
        let second = carousel.store().items()[1].clone();
        let frame = carousel.surface().frame_of(second.id()).unwrap();

        let outcome = carousel.tap(&second, &frame);
        assert!(matches!(
            outcome,
            TapOutcome::Recentering { ref item, scroll } if *item == second && scroll.is_started()
        ));
        assert_eq!(carousel.selected(), Some(&second));

        let tiles = settle(&mut carousel);
        let tile = tiles.iter().find(|t| t.item == second).unwrap();
        assert!(tile.is_centered);
        assert!(tile.is_selected);
    }

    #[test]
    fn tapping_the_centered_item_runs_the_primary_action() {
        let mut carousel = carousel();
        let hits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&hits);
        carousel.on_primary_action(move |item| {
            sink.borrow_mut().push(item.title().to_string())
        });

        let outcome = carousel.tap_at(150.0, 100.0).unwrap();
        assert!(matches!(outcome, TapOutcome::PrimaryAction(_)));
        assert_eq!(*hits.borrow(), ["1"]);
        assert!(carousel.selected().is_none());
    }

    #[test]
    fn taps_outside_every_slot_are_ignored() {
        let mut carousel = carousel();
        // Left inset in front of the first item.
        assert!(carousel.tap_at(10.0, 100.0).is_none());
    }

    #[test]
    fn select_relative_walks_and_stops_at_the_ends() {
        let mut carousel = carousel();
        assert!(carousel.select_relative(-1).is_some());
        assert_eq!(carousel.selected(), Some(&carousel.store().items()[0]));

        for _ in 0..10 {
            carousel.update(CarouselMessage::SelectNext);
            settle(&mut carousel);
        }
        assert_eq!(carousel.surface().centered_index(), Some(4));
    }

    #[test]
    fn replacing_items_recenters_the_surviving_selection() {
        let mut carousel = carousel();
        let fourth = carousel.store().items()[3].clone();
        carousel.select(fourth.clone());
        settle(&mut carousel);

        // Drop the first two items: the selection moves to index 1.
        let items = video_seed()[2..].to_vec();
        carousel.update(CarouselMessage::ItemsReplaced(items));
        settle(&mut carousel);
        assert_eq!(carousel.surface().centered_index(), Some(1));
        assert_eq!(carousel.centered_item(), Some(&fourth));
    }

    #[test]
    fn render_with_passes_frames_and_results() {
        let mut carousel = carousel();
        let rows = carousel.render_with(Instant::now(), |item, frame, result| {
            (item.title().to_string(), frame.frame.width, result.is_centered)
        });
        assert_eq!(rows[0].0, "1");
        assert!(rows[0].2);
        assert!(rows.iter().skip(1).all(|row| !row.2));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CarouselConfig {
            minimum_scale_fraction: 0.0,
            ..CarouselConfig::default()
        };
        assert!(Carousel::without_images(config, video_seed()).is_err());
    }

    #[test]
    fn visual_frame_shrinks_around_the_slot_center() {
        let mut carousel = carousel();
        let tiles = settle(&mut carousel);
        let second = tiles.iter().find(|t| t.index == 1).unwrap();
        let visual = second.visual_frame();
        assert!((visual.mid_x() - second.frame.mid_x()).abs() < 1e-3);
        assert!(visual.width < second.frame.width);
        assert!((visual.height - second.tile_height * second.scale).abs() < 1e-3);
    }
}
