use crate::Calibration;
use embedded_hal::adc::{Channel, OneShot};

/// Applies the firmware linearization to every sample read from an ADC pin.
///
/// Each raw code is passed through
/// [`fixed_point_correction`](Calibration::fixed_point_correction), the
/// shift-and-multiply form the firmware itself uses.
#[derive(Debug)]
pub struct LinearizingAdc<Pin> {
    pin: Pin,
    calibration: Calibration,
}

impl<Pin> LinearizingAdc<Pin> {
    /// Returns a linearizer reading from `pin` with the given calibration.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_linearizer::{Calibration, LinearizingAdc};
    /// # use embedded_hal_mock::adc::MockChan0;
    /// #
    /// # let pin = MockChan0 {};
    ///
    /// let calibration = Calibration::derive().unwrap();
    /// let linearizer = LinearizingAdc::new(pin, calibration);
    /// ```
    pub fn new<ADC>(pin: Pin, calibration: Calibration) -> Self
    where
        Pin: Channel<ADC>,
    {
        Self { pin, calibration }
    }

    /// Destroys the linearizer and returns the `Pin`.
    pub fn free(self) -> Pin {
        self.pin
    }

    /// Reads one sample and returns the linearized code.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_linearizer::{Calibration, LinearizingAdc};
    /// # use embedded_hal_mock::{
    /// #     adc::{Mock, MockChan0, Transaction},
    /// #     common::Generic,
    /// # };
    /// #
    /// # let expectations: [Transaction<u16>; 1] = [Transaction::read(0, 4095)];
    /// # let mut adc = Mock::new(&expectations);
    /// # let pin = MockChan0 {};
    ///
    /// let calibration = Calibration::derive().unwrap();
    /// let mut linearizer = LinearizingAdc::new(pin, calibration);
    ///
    /// // Full scale comes back one short of 4095 after truncation.
    /// assert_eq!(linearizer.read(&mut adc), Ok(4094));
    /// ```
    pub fn read<Adc, ADC, Word>(
        &mut self,
        adc: &mut Adc,
    ) -> Result<u32, nb::Error<<Adc as OneShot<ADC, Word, Pin>>::Error>>
    where
        Word: Into<u32>,
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, Word, Pin>,
    {
        let raw = adc.read(&mut self.pin)?;

        Ok(self.calibration.fixed_point_correction(raw.into()))
    }
}
