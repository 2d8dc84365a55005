/// Deviation of a response-shaped function from an ideal linear mapping.
///
/// Wraps any function from code to code and reports
/// `f(code) - code * scale`. With the default scale of 1 this is the raw
/// error against the identity mapping; a computed ratio can be supplied
/// instead to normalize full-scale output before comparing.
///
/// # Examples
///
/// ```
/// use adc_linearizer::ErrorCurve;
///
/// let mut identity = ErrorCurve::new(|code: u16| code);
/// assert_eq!(identity.deviation(100), 0.0);
///
/// let mut halved = ErrorCurve::with_scale(|code: u16| code, 0.5);
/// assert_eq!(halved.deviation(100), 50.0);
/// ```
#[derive(Debug, Clone)]
pub struct ErrorCurve<F> {
    response: F,
    scale: f64,
}

impl<F, V> ErrorCurve<F>
where
    F: FnMut(u16) -> V,
    V: Into<f64>,
{
    /// Returns the error curve of `response` against the identity mapping.
    pub fn new(response: F) -> Self {
        Self::with_scale(response, 1.0)
    }

    /// Returns the error curve of `response` against a linear mapping with
    /// the given slope.
    pub fn with_scale(response: F, scale: f64) -> Self {
        Self { response, scale }
    }

    /// Returns `response(code) - code * scale`.
    pub fn deviation(&mut self, code: u16) -> f64 {
        (self.response)(code).into() - f64::from(code) * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{datasheet_table, ResponseModel};

    #[test]
    fn identity_has_zero_deviation() {
        let mut curve = ErrorCurve::new(|code: u16| code);

        for code in [0, 1, 2047, 4095] {
            assert_eq!(curve.deviation(code), 0.0);
        }
    }

    #[test]
    fn scale_tilts_the_reference_line() {
        let mut curve = ErrorCurve::with_scale(|_: u16| 0u16, 2.0);

        assert_eq!(curve.deviation(0), 0.0);
        assert_eq!(curve.deviation(100), -200.0);
    }

    #[test]
    fn model_error_starts_at_zero() {
        let mut model = ResponseModel::new(datasheet_table());
        let mut curve = ErrorCurve::new(|code| model.response_at(code));

        assert_eq!(curve.deviation(0), 0.0);
    }

    #[test]
    fn repeated_evaluation_is_idempotent() {
        let mut model = ResponseModel::new(datasheet_table());
        let mut curve = ErrorCurve::new(|code| model.response_at(code));

        let first = curve.deviation(3000);
        assert_eq!(curve.deviation(3000), first);
    }
}
