use crate::{DnlTable, CODE_COUNT};

/// Models the digital response of a converter with the nonuniform bin widths
/// of a [`DnlTable`](DnlTable).
///
/// Conversion inverts the cumulative sum of bin widths: the reported code is
/// the smallest one whose cumulative bin boundary exceeds the analog input
/// magnitude. Codes are indexed from 0, with code 1 owning the first full
/// bin; whether the real converter uses the same convention is unconfirmed.
///
/// # Examples
///
/// ```
/// use adc_linearizer::{datasheet_table, ResponseModel};
///
/// let mut model = ResponseModel::new(datasheet_table());
///
/// assert_eq!(model.response_at(0), 0);
/// assert_eq!(model.response_at(4095), 4095);
/// ```
#[derive(Debug, Clone)]
pub struct ResponseModel<const LENGTH: usize> {
    table: DnlTable<LENGTH>,
    cache: [Option<u16>; CODE_COUNT],
}

impl<const LENGTH: usize> ResponseModel<LENGTH> {
    pub fn new(table: DnlTable<LENGTH>) -> Self {
        Self {
            table,
            cache: [None; CODE_COUNT],
        }
    }

    /// Returns the code reported for an analog input magnitude.
    ///
    /// The first comparison is centered by half a default bin width, so an
    /// input smaller than half a typical bin reports code 0. Monotonically
    /// non-decreasing in `analog`. Callers must not pass negative magnitudes;
    /// magnitudes beyond the full analog range of ~4096 are not meaningful.
    pub fn response(&self, analog: f64) -> u16 {
        let mut code = 0;
        let mut remaining = analog - self.table.default_width() / 2.0;

        while remaining > 0.0 {
            code += 1;
            remaining -= self.table.width(code);
        }

        code
    }

    /// Returns [`response`](ResponseModel::response) evaluated at an integer
    /// code, memoized in a lazily filled per-code lookup table.
    ///
    /// Sweeping a correction formula over all 4096 codes re-evaluates the
    /// model at the same inputs repeatedly; the table makes each input cost
    /// one accumulation pass in total.
    pub fn response_at(&mut self, code: u16) -> u16 {
        if let Some(cached) = self.cache.get(usize::from(code)).copied().flatten() {
            return cached;
        }

        let value = self.response(f64::from(code));

        if let Some(slot) = self.cache.get_mut(usize::from(code)) {
            *slot = Some(value);
        }

        value
    }

    /// Returns the underlying DNL table.
    pub fn table(&self) -> &DnlTable<LENGTH> {
        &self.table
    }
}
