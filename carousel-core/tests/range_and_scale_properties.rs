use carousel_core::centering::CenteringModel;
use carousel_core::geometry::{CoordinateSpace, Frame};
use carousel_core::math::{clamp_value, map_value};
use carousel_core::store::CarouselStore;
use carousel_core::item::{CarouselItem, seed::video_seed};
use proptest::prelude::*;

fn model(min: f32) -> CenteringModel {
    CenteringModel::new(CoordinateSpace::CAROUSEL, min, 0.05)
}

proptest! {
    #[test]
    fn map_value_hits_both_endpoints(
        a in -1_000.0f32..1_000.0,
        width in 0.5f32..1_000.0,
        c in -1_000.0f32..1_000.0,
        d in -1_000.0f32..1_000.0,
    ) {
        let b = a + width;
        let source = a..=b;
        let target = c..=d;
        prop_assert_eq!(map_value(a, &source, &target, false), c);
        prop_assert_eq!(map_value(b, &source, &target, false), d);
    }

    #[test]
    fn map_value_preserves_order_for_ascending_targets(
        a in -100.0f32..100.0,
        width in 1.0f32..100.0,
        c in -100.0f32..100.0,
        span in 0.0f32..100.0,
        x in -300.0f32..300.0,
        dx in 0.0f32..50.0,
    ) {
        let source = a..=(a + width);
        let target = c..=(c + span);
        let lo = map_value(x, &source, &target, false);
        let hi = map_value(x + dx, &source, &target, false);
        prop_assert!(hi + 1e-3 >= lo);
    }

    #[test]
    fn clamped_map_stays_in_target(
        x in -1_000.0f32..1_000.0,
        c in -100.0f32..100.0,
        span in 0.0f32..100.0,
    ) {
        let target = c..=(c + span);
        let v = map_value(x, &(0.0..=10.0), &target, true);
        prop_assert!(target.contains(&v));
    }

    #[test]
    fn clamp_is_idempotent(v in any::<f32>().prop_filter("finite", |v| v.is_finite()),
                           lo in -100.0f32..100.0,
                           span in 0.0f32..100.0) {
        let range = lo..=(lo + span);
        let once = clamp_value(v, &range);
        prop_assert_eq!(clamp_value(once, &range), once);
    }

    #[test]
    fn scale_is_bounded_and_monotonic(
        min in 0.05f32..=1.0,
        width in 1.0f32..500.0,
        d in -1_000.0f32..1_000.0,
        extra in 0.0f32..500.0,
    ) {
        let m = model(min);
        let near = m.scale_for(d, width);
        let far = m.scale_for(d.abs() + extra, width);
        prop_assert!(near >= min - 1e-6 && near <= 1.0);
        prop_assert!(far <= near + 1e-6);
        if d.abs() >= width {
            prop_assert!((near - min).abs() < 1e-6);
        }
    }

    #[test]
    fn scale_is_full_only_at_zero(min in 0.05f32..0.99, width in 1.0f32..500.0, d in 0.01f32..500.0) {
        let m = model(min);
        prop_assert_eq!(m.scale_for(0.0, width), 1.0);
        prop_assert!(m.scale_for(d, width) < 1.0);
        prop_assert!(m.scale_for(-d, width) < 1.0);
    }

    #[test]
    fn unlaid_frames_are_at_center(
        viewport in 0.0f32..2_000.0,
        x in -2_000.0f32..2_000.0,
        y in -2_000.0f32..2_000.0,
        size in 0.0f32..500.0,
    ) {
        let no_width = Frame::new(x, y, 0.0, size);
        let no_height = Frame::new(x, y, size, 0.0);
        prop_assert_eq!(CenteringModel::distance_from_center(viewport, &no_width), 0.0);
        prop_assert_eq!(CenteringModel::distance_from_center(viewport, &no_height), 0.0);
    }

    #[test]
    fn centered_iff_below_tolerance(d in -1.0f32..1.0) {
        let m = model(0.85);
        prop_assert_eq!(m.is_centered(d), d.abs() < 0.05);
    }

    #[test]
    fn select_always_records_the_item(pick in 0usize..7, prior in proptest::option::of(0usize..5)) {
        let mut store = CarouselStore::new(video_seed());
        if let Some(p) = prior {
            store.select(store.items()[p].clone());
        }
        // Indices past the seed select items that are not in the list.
        let item = video_seed()
            .get(pick)
            .cloned()
            .unwrap_or_else(|| CarouselItem::new(format!("extra-{pick}"), None));
        store.select(item.clone());
        prop_assert_eq!(store.selected(), Some(&item));
    }
}
