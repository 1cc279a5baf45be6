//! Range mapping
//!
//! Linear remapping of a value from one closed interval into another, with
//! optional clamping. Given `5.0` in `0.0..=10.0` mapped to `100.0..=200.0`
//! the result is `150.0`.

use std::ops::RangeInclusive;

/// Map `value` from `source` into `target`.
///
/// The source range must have a non-zero extent (`end > start`). This is a
/// caller precondition: it is asserted in debug builds and yields a
/// non-finite result otherwise.
///
/// `target` may be descending (`start > end`); clamping then keeps the
/// result between its two bounds.
pub fn map_value(
    value: f32,
    source: &RangeInclusive<f32>,
    target: &RangeInclusive<f32>,
    clamp: bool,
) -> f32 {
    let (source_lo, source_hi) = (*source.start(), *source.end());
    debug_assert!(
        source_hi > source_lo,
        "map_value: source range {source_lo}..={source_hi} has no extent"
    );

    let (target_lo, target_hi) = (*target.start(), *target.end());
    let position = (value - source_lo) / (source_hi - source_lo);
    let mapped = lerp(target_lo, target_hi, position);

    if clamp {
        let bounds = target_lo.min(target_hi)..=target_lo.max(target_hi);
        clamp_value(mapped, &bounds)
    } else {
        mapped
    }
}

/// Interpolate between `a` and `b`. Exact at `t == 0` and `t == 1` and
/// monotonic in `t`.
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    if (a <= 0.0 && b >= 0.0) || (a >= 0.0 && b <= 0.0) {
        return t * b + (1.0 - t) * a;
    }
    if t == 1.0 {
        return b;
    }
    let x = a + t * (b - a);
    if (t > 1.0) == (b > a) { x.max(b) } else { x.min(b) }
}

/// Clamp `value` into a closed range.
#[inline]
pub fn clamp_value(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.max(*range.start()).min(*range.end())
}

/// Method-call form of [`map_value`].
pub trait RangeMapExt {
    fn map_range(
        self,
        source: &RangeInclusive<f32>,
        target: &RangeInclusive<f32>,
        clamp: bool,
    ) -> f32;
}

impl RangeMapExt for f32 {
    #[inline]
    fn map_range(
        self,
        source: &RangeInclusive<f32>,
        target: &RangeInclusive<f32>,
        clamp: bool,
    ) -> f32 {
        map_value(self, source, target, clamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_below_range() {
        assert_eq!(clamp_value(-5.0, &(0.0..=1.0)), 0.0);
    }

    #[test]
    fn clamp_in_range() {
        assert_eq!(clamp_value(3.0, &(0.0..=10.0)), 3.0);
    }

    #[test]
    fn clamp_above_range() {
        assert_eq!(clamp_value(15.0, &(0.0..=10.0)), 10.0);
    }

    #[test]
    fn map_below_range() {
        let value = map_value(-10.0, &(0.0..=10.0), &(100.0..=200.0), false);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn map_below_range_clamped() {
        let value = map_value(-10.0, &(0.0..=10.0), &(100.0..=200.0), true);
        assert_eq!(value, 100.0);
    }

    #[test]
    fn map_in_range() {
        let value = map_value(5.0, &(0.0..=10.0), &(100.0..=200.0), false);
        assert_eq!(value, 150.0);
    }

    #[test]
    fn map_above_range() {
        let value = map_value(20.0, &(0.0..=10.0), &(100.0..=200.0), false);
        assert_eq!(value, 300.0);
    }

    #[test]
    fn map_above_range_clamped() {
        let value = map_value(20.0, &(0.0..=10.0), &(100.0..=200.0), true);
        assert_eq!(value, 200.0);
    }

    #[test]
    fn map_into_descending_target() {
        // A reversed target (start > end) is used for fade-out ramps.
        let value = 2.5_f32.map_range(&(0.0..=10.0), &(1.0..=0.0), false);
        assert!((value - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn map_into_descending_target_clamped() {
        let value = 40.0_f32.map_range(&(0.0..=10.0), &(1.0..=0.6), true);
        assert_eq!(value, 0.6);
    }

    #[test]
    fn map_endpoints_are_exact() {
        let target = -999.7..=0.3;
        assert_eq!(map_value(10.0, &(0.0..=10.0), &target, false), 0.3);
        assert_eq!(map_value(0.0, &(0.0..=10.0), &target, false), -999.7);
        assert_eq!(map_value(3.0, &(1.0..=3.0), &(0.1..=0.7), false), 0.7);
    }

    #[test]
    #[should_panic(expected = "has no extent")]
    #[cfg(debug_assertions)]
    fn zero_width_source_is_a_precondition() {
        let _ = map_value(1.0, &(2.0..=2.0), &(0.0..=1.0), false);
    }
}
