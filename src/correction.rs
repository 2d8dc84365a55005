use crate::FULL_SCALE;
use core::fmt;

/// Right-shift applied after the fixed-point multiply in the scaled
/// correction formulas.
///
/// The shift amount, like the `>> 10` region boundaries and the masks below,
/// is reverse-engineered from observed firmware behavior and must stay
/// bit-exact.
pub const SCALE_SHIFT: u32 = 19;

/// The correction applied by the reference firmware, unscaled.
///
/// Adds a coarse offset that grows by 8 every 1024 codes (once the code is
/// offset by 512) and nudges codes sitting exactly on a 511-wide periodic
/// boundary by 4. Out-of-range inputs are accepted and produce arithmetic
/// results without panicking, as the firmware never range-checks.
///
/// # Examples
///
/// ```
/// use adc_linearizer::reference_correction;
///
/// assert_eq!(reference_correction(0), 0);
/// assert_eq!(reference_correction(4095), 4127);
/// ```
pub fn reference_correction(x: u32) -> u32 {
    let adc512 = u64::from(x) + 512;
    let mut corrected = u64::from(x);

    if adc512 % 0x01ff == 0 {
        corrected += 4;
    }
    corrected += (adc512 >> 10) << 3;

    corrected as u32
}

/// The pre-scale intermediate of the shift-based correction.
///
/// Equivalent to [`reference_correction`](reference_correction) after
/// fixed-point scaling: the region offset is folded in by biasing the code
/// with `0x200` before the `>> 10`, the second quarter of each 2048-wide
/// region gains 2, and codes on a `0x400`-periodic boundary lose 4.
///
/// # Examples
///
/// ```
/// use adc_linearizer::shifted_intermediate;
///
/// assert_eq!(shifted_intermediate(4095), 4127);
/// ```
pub fn shifted_intermediate(x: u32) -> u32 {
    let a = u64::from(x);
    let mut b = a + (((a + 0x200) >> 10) << 3);

    if a & 0x600 != 0 && a & 0x800 == 0 {
        b += 2;
    }
    if (a + 0x200) % 0x400 == 0 {
        b -= 4;
    }

    b as u32
}

/// Returns the fixed-point multiplier that maps `full_scale_output` back to
/// the full-scale code after the [`SCALE_SHIFT`](SCALE_SHIFT) right-shift:
/// `floor(4095 * 2^19 / full_scale_output)`.
pub fn scale_constant(full_scale_output: u32) -> u32 {
    ((u64::from(FULL_SCALE) << SCALE_SHIFT) / u64::from(full_scale_output)) as u32
}

/// The derived scale constant `k` and the scaled correction formulas that
/// consume it.
///
/// `k` is computed once by [`derive`](Calibration::derive) and read-only
/// afterwards.
///
/// # Examples
///
/// ```
/// use adc_linearizer::Calibration;
///
/// let calibration = Calibration::derive().unwrap();
///
/// assert_eq!(calibration.k(), 520222);
/// assert_eq!(calibration.fixed_point_correction(4095), 4094);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    k: u32,
}

impl Calibration {
    /// Derives `k` so that correcting the full-scale code 4095 and shifting
    /// down reproduces 4095 as closely as truncation allows.
    ///
    /// The constant is derived twice, from the full-scale outputs of
    /// [`shifted_intermediate`](shifted_intermediate) and of
    /// [`reference_correction`](reference_correction) independently. The two
    /// formulas implement the same linearization at different levels of
    /// abstraction, so any disagreement means one of them has drifted and is
    /// returned as a hard error.
    pub fn derive() -> Result<Self, CalibrationMismatch> {
        let full_scale = u32::from(FULL_SCALE);
        let shifted = scale_constant(shifted_intermediate(full_scale));
        let reference = scale_constant(reference_correction(full_scale));

        if shifted != reference {
            return Err(CalibrationMismatch { shifted, reference });
        }

        Ok(Self { k: shifted })
    }

    /// Returns the fixed-point scale constant.
    pub fn k(&self) -> u32 {
        self.k
    }

    /// The shift-based correction as the firmware would run it: the
    /// [`shifted_intermediate`](shifted_intermediate) value scaled by a
    /// single fixed-point multiply and right-shift.
    pub fn fixed_point_correction(&self, x: u32) -> u32 {
        ((u64::from(self.k) * u64::from(shifted_intermediate(x))) >> SCALE_SHIFT) as u32
    }

    /// [`reference_correction`](reference_correction) normalized by the same
    /// scale constant, so the two formula families can be compared on equal
    /// footing.
    pub fn scaled_reference_correction(&self, x: u32) -> u32 {
        ((u64::from(self.k) * u64::from(reference_correction(x))) >> SCALE_SHIFT) as u32
    }
}

/// The two independently derived scale constants disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationMismatch {
    /// Constant derived from the shift-based correction.
    pub shifted: u32,
    /// Constant derived from the reference correction.
    pub reference: u32,
}

impl fmt::Display for CalibrationMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "scale constants disagree: {} from the shift-based correction, {} from the reference correction",
            self.shifted, self.reference
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CalibrationMismatch {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_correction_at_origin() {
        assert_eq!(reference_correction(0), 0);
    }

    #[test]
    fn reference_correction_boundary_nudge() {
        // 510 + 512 = 1022 = 2 * 0x01ff, the first periodic boundary.
        assert_eq!(reference_correction(510), 514);
        assert_eq!(reference_correction(509), 509);
        assert_eq!(reference_correction(511), 511);
    }

    #[test]
    fn reference_correction_region_offsets() {
        // The offset steps by 8 whenever x + 512 crosses a multiple of 1024.
        assert_eq!(reference_correction(512), 512 + 8);
        assert_eq!(reference_correction(1536), 1536 + 16);
        assert_eq!(reference_correction(2560), 2560 + 24);
        assert_eq!(reference_correction(3584), 3584 + 32);
        assert_eq!(reference_correction(4095), 4127);
    }

    #[test]
    fn shifted_intermediate_matches_reference_at_full_scale() {
        assert_eq!(shifted_intermediate(4095), 4127);
        assert_eq!(shifted_intermediate(4095), reference_correction(4095));
    }

    #[test]
    fn shifted_intermediate_quarter_region_bump() {
        // 512 is in the second quarter of the first 2048-wide region and on
        // the 0x400-periodic boundary: 512 + 8 + 2 - 4.
        assert_eq!(shifted_intermediate(512), 518);
        assert_eq!(shifted_intermediate(0), 0);
    }

    #[test]
    fn derived_constants_agree() {
        let calibration = Calibration::derive().unwrap();

        assert_eq!(calibration.k(), 520222);
        assert_eq!(
            scale_constant(shifted_intermediate(4095)),
            scale_constant(reference_correction(4095))
        );
    }

    #[test]
    fn full_scale_maps_back_within_truncation() {
        let calibration = Calibration::derive().unwrap();

        assert_eq!(calibration.fixed_point_correction(4095), 4094);
        assert_eq!(calibration.scaled_reference_correction(4095), 4094);
        assert_eq!(
            calibration.scaled_reference_correction(4095),
            ((520222u64 * 4127) >> 19) as u32
        );
    }

    #[test]
    fn mid_scale_correction() {
        let calibration = Calibration::derive().unwrap();

        assert_eq!(calibration.fixed_point_correction(1000), 1002);
    }

    #[test]
    fn out_of_range_inputs_do_not_panic() {
        let calibration = Calibration::derive().unwrap();

        reference_correction(u32::MAX);
        shifted_intermediate(u32::MAX);
        calibration.fixed_point_correction(u32::MAX);
        calibration.scaled_reference_correction(u32::MAX);
    }

    #[test]
    fn repeated_evaluation_is_idempotent() {
        let calibration = Calibration::derive().unwrap();

        for x in [0, 510, 512, 2048, 4095] {
            assert_eq!(reference_correction(x), reference_correction(x));
            assert_eq!(
                calibration.fixed_point_correction(x),
                calibration.fixed_point_correction(x)
            );
        }
    }

    #[test]
    fn mismatch_is_reported() {
        let mismatch = CalibrationMismatch {
            shifted: 520222,
            reference: 520221,
        };

        assert_eq!(
            mismatch.to_string(),
            "scale constants disagree: 520222 from the shift-based correction, \
             520221 from the reference correction"
        );
    }
}
