use crate::CODE_COUNT;

/// Per-code bin widths of a 12-bit converter, derived from a sparse set of
/// observed differential-nonlinearity deviations.
///
/// Each entry is `(code, deviation)`, where `deviation` is how far that
/// code's bin width departs from the ideal width of one code step. Codes not
/// listed share a single default width, chosen so that the total width of all
/// 4096 codes is exactly 4096 (the converter's full analog range).
///
/// # Examples
///
/// ```
/// use adc_linearizer::DnlTable;
///
/// let table = DnlTable::new([(512, 9.0), (3584, 8.0)]);
///
/// assert_eq!(table.width(512), 10.0);
/// assert_eq!(table.width(3584), 9.0);
/// assert_eq!(table.default_width(), (4096.0 - 19.0) / 4094.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DnlTable<const LENGTH: usize> {
    widths: [(u16, f64); LENGTH],
    default_width: f64,
}

impl<const LENGTH: usize> DnlTable<LENGTH> {
    /// Returns a table built from `(code, deviation)` entries.
    ///
    /// The entries must be in ascending order by code or this function will
    /// panic when running in debug mode. A deviation of exactly -1 gives the
    /// code a width of zero, representing a missing code. Deviations below -1
    /// would make conversion non-monotonic and also panic in debug mode.
    pub fn new(deviations: [(u16, f64); LENGTH]) -> Self {
        debug_assert!(
            deviations.windows(2).all(|w| w[0].0 < w[1].0),
            "The entries must be in ascending order by code"
        );

        let mut widths = [(0, 0.0); LENGTH];
        let mut total = 0.0;

        for (index, (code, deviation)) in deviations.into_iter().enumerate() {
            let width = deviation + 1.0;
            debug_assert!(width >= 0.0, "A bin width cannot be negative");

            widths[index] = (code, width);
            total += width;
        }

        let default_width = (CODE_COUNT as f64 - total) / (CODE_COUNT - LENGTH) as f64;

        Self {
            widths,
            default_width,
        }
    }

    /// Returns the bin width of `code`: the observed width if the code is in
    /// the table, otherwise the shared default width.
    pub fn width(&self, code: u16) -> f64 {
        self.widths
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, width)| *width)
            .unwrap_or(self.default_width)
    }

    /// Returns the width shared by every code not in the table.
    pub fn default_width(&self) -> f64 {
        self.default_width
    }
}

/// Returns the DNL table estimated from the converter's data sheet.
///
/// Positive deviations are read off the DNL plot, negative ones inferred from
/// the INL plot; all are within roughly ±0.25 of the plotted values. The step
/// near code 2048 is spread over codes 2047..=2049 at a deviation of -1 each,
/// since a monotonic converter cannot have DNL below -1. An apparent spike at
/// code 511 is excluded as a likely aliasing artifact of the plot itself.
pub fn datasheet_table() -> DnlTable<8> {
    DnlTable::new([
        (512, 9.0),
        (1536, 7.25),
        (2047, -1.0),
        (2048, -1.0),
        (2049, -1.0),
        (2560, 7.5),
        (3072, -1.0),
        (3584, 8.0),
    ])
}
