//! Helpers for rounding values the way a font compiler is expected to.

/// A trait for the rounding behavior font tables want.
///
/// `f64::round` rounds half away from zero; font coordinates round half
/// toward positive infinity, so `-0.5` becomes `0`, not `-1`.
pub(crate) trait OtRound<T> {
    fn ot_round(self) -> T;
}

impl OtRound<i16> for f64 {
    #[inline]
    fn ot_round(self) -> i16 {
        (self + 0.5).floor() as i16
    }
}

impl OtRound<u16> for f64 {
    #[inline]
    fn ot_round(self) -> u16 {
        (self + 0.5).floor() as u16
    }
}

impl OtRound<(i16, i16)> for kurbo::Point {
    #[inline]
    fn ot_round(self) -> (i16, i16) {
        (self.x.ot_round(), self.y.ot_round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_toward_positive() {
        assert_eq!(1_i16, 0.5_f64.ot_round());
        assert_eq!(0_i16, (-0.5_f64).ot_round());
        assert_eq!(-1_i16, (-1.5_f64).ot_round());
        assert_eq!(2_i16, 1.5_f64.ot_round());
    }

    #[test]
    fn saturates_out_of_range_values() {
        assert_eq!(i16::MAX, 1e9_f64.ot_round());
        assert_eq!(i16::MIN, (-1e9_f64).ot_round());
        assert_eq!(0_u16, (-20.0_f64).ot_round());
    }

    #[test]
    fn rounds_points_per_axis() {
        let (x, y) = kurbo::Point::new(1.5, -0.5).ot_round();
        assert_eq!((2, 0), (x, y));
    }
}
