use std::time::{Duration, Instant};

use carousel_core::prelude::*;

const VIEWPORT_WIDTH: f32 = 300.0;
const VIEWPORT_HEIGHT: f32 = 200.0;

fn thirds() -> CarouselConfig {
    RuntimeConfig {
        item_width_fraction: Some(1.0 / 3.0),
        ..RuntimeConfig::default()
    }
    .resolve(SizeClass::Compact)
    .unwrap()
}

fn carousel() -> Carousel {
    let mut carousel = Carousel::without_images(thirds(), video_seed()).unwrap();
    carousel.resize(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    carousel
}

fn settle(carousel: &mut Carousel) -> Vec<TileView> {
    let t0 = Instant::now();
    carousel.frame(t0);
    carousel.frame(t0 + Duration::from_secs(2))
}

#[test]
fn centering_the_third_item() {
    let mut carousel = carousel();
    let third = carousel.store().items()[2].clone();
    carousel.select(third.clone());
    let tiles = settle(&mut carousel);

    let centered = tiles.iter().find(|t| t.item == third).unwrap();
    assert!(centered.distance_from_center.abs() < 1e-3);
    assert_eq!(centered.scale, 1.0);
    assert!(centered.is_centered);

    let item_width = carousel.surface().metrics().item_width;
    assert!((item_width - 100.0).abs() < 1e-3);

    // Item 1 sits exactly one item width left of center, item 0 further out.
    let second = tiles.iter().find(|t| t.index == 1).unwrap();
    assert!((second.distance_from_center - item_width).abs() < 1e-3);
    assert!((second.scale - MINIMUM_SCALE_FRACTION).abs() < 1e-5);
    assert!(!second.is_centered);

    let first = tiles.iter().find(|t| t.index == 0).unwrap();
    assert!(first.distance_from_center >= item_width);
    assert_eq!(first.scale, MINIMUM_SCALE_FRACTION);
}

#[test]
fn scale_is_live_during_the_animation() {
    let mut carousel = carousel();
    let second = carousel.store().items()[1].clone();
    carousel.select(second.clone());

    let t0 = Instant::now();
    let mut scales = Vec::new();
    for ms in [0, 60, 120, 180, 400] {
        let tiles = carousel.frame(t0 + Duration::from_millis(ms));
        let tile = tiles.iter().find(|t| t.item == second).unwrap();
        scales.push(tile.scale);
    }
    assert_eq!(scales[0], MINIMUM_SCALE_FRACTION);
    assert!(scales.windows(2).all(|w| w[1] >= w[0]));
    assert_eq!(*scales.last().unwrap(), 1.0);
}

#[test]
fn tap_flow_uses_the_reported_frame() {
    let mut carousel = carousel();
    let tiles = settle(&mut carousel);
    let second = tiles.iter().find(|t| t.index == 1).unwrap().clone();

    let frame = SpacedFrame::new(CoordinateSpace::CAROUSEL, second.frame);
    let outcome = carousel.update(CarouselMessage::Tap {
        item: second.item.clone(),
        frame,
    });
    assert!(matches!(outcome, Some(TapOutcome::Recentering { .. })));
    settle(&mut carousel);

    let frame = carousel.surface().frame_of(second.item.id()).unwrap();
    let outcome = carousel.update(CarouselMessage::Tap {
        item: second.item.clone(),
        frame,
    });
    assert_eq!(outcome, Some(TapOutcome::PrimaryAction(second.item)));
}

#[test]
fn selecting_an_absent_item_records_it_without_scrolling() {
    let mut carousel = carousel();
    let stranger = CarouselItem::new("not shown", None);
    assert_eq!(carousel.select(stranger.clone()), ScrollOutcome::NotFound);
    assert_eq!(carousel.selected(), Some(&stranger));
    assert_eq!(carousel.surface().scroll_x(), 0.0);
}

#[test]
fn dragging_past_halfway_settles_on_the_next_item() {
    let mut carousel = carousel();
    carousel.update(CarouselMessage::DragStarted);
    carousel.update(CarouselMessage::DraggedBy(-60.0));
    carousel.update(CarouselMessage::DragEnded);
    settle(&mut carousel);
    assert_eq!(carousel.surface().centered_index(), Some(1));
}

#[test]
fn regular_layout_shows_more_items() {
    let mut carousel =
        Carousel::without_images(CarouselConfig::compact_defaults(), video_seed()).unwrap();
    carousel.resize(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    let compact = settle(&mut carousel)
        .iter()
        .filter(|t| t.phase.is_on_screen())
        .count();
    carousel.update(CarouselMessage::SizeClassChanged(SizeClass::Regular));
    let regular = settle(&mut carousel)
        .iter()
        .filter(|t| t.phase.is_on_screen())
        .count();
    assert!(regular > compact);
}

#[test]
fn width_override_outlives_size_class_changes() {
    let mut carousel = carousel();
    settle(&mut carousel);
    let before = carousel.surface().metrics().item_width;

    carousel.update(CarouselMessage::SizeClassChanged(SizeClass::Regular));
    carousel.update(CarouselMessage::SizeClassChanged(SizeClass::Compact));
    settle(&mut carousel);

    let after = carousel.surface().metrics().item_width;
    assert_eq!(after, before);
    assert!((after - VIEWPORT_WIDTH / 3.0).abs() < 1e-3);
    assert_eq!(carousel.config().size_class, SizeClass::Compact);
}

#[test]
fn nudged_item_settles_at_full_scale() {
    let mut carousel = carousel();
    settle(&mut carousel);
    carousel.update(CarouselMessage::DragStarted);
    carousel.update(CarouselMessage::DraggedBy(-0.0009));
    carousel.update(CarouselMessage::DragEnded);

    let tiles = settle(&mut carousel);
    let first = tiles.iter().find(|t| t.index == 0).unwrap();
    assert_eq!(first.distance_from_center, 0.0);
    assert_eq!(first.scale, 1.0);
}
