//! Unit conversion utilities.
//!
//! WordprocessingML measures most layout values in twips (1/20 pt), border
//! widths in eighths of a point, and drawing geometry in EMUs.

pub const EMUS_PER_INCH: i64 = 914_400;

/// Resolution at which image margins are always converted.
pub const MARGIN_PPI: u32 = 72;

/// Convert a pixel count at the given resolution to EMUs.
///
/// `emus = round((pixels / ppi) * 914400)`. A zero `ppi` yields 0 rather
/// than dividing by zero; validation rejects it before rendering.
///
/// # Examples
///
/// ```
/// use longan::common::unit::px_to_emu;
/// assert_eq!(px_to_emu(96, 96), 914_400);
/// assert_eq!(px_to_emu(0, 72), 0);
/// ```
#[inline]
pub fn px_to_emu(px: u32, ppi: u32) -> i64 {
    if ppi == 0 {
        return 0;
    }
    ((px as f64 / ppi as f64) * EMUS_PER_INCH as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_px_to_emu() {
        assert_eq!(px_to_emu(96, 96), 914_400);
        assert_eq!(px_to_emu(0, 72), 0);
        assert_eq!(px_to_emu(72, 72), EMUS_PER_INCH);
        assert_eq!(px_to_emu(8, MARGIN_PPI), 101_600);
        assert_eq!(px_to_emu(10, 0), 0);
    }

    proptest! {
        #[test]
        fn test_px_to_emu_monotonic(a in 0u32..100_000, b in 0u32..100_000, ppi in 1u32..1200) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(px_to_emu(lo, ppi) <= px_to_emu(hi, ppi));
        }
    }
}
