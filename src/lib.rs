#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod adc;
mod analysis;
mod correction;
mod dnl;
#[cfg(feature = "std")]
mod report;
mod response;

pub use adc::LinearizingAdc;
pub use analysis::ErrorCurve;
pub use correction::{
    reference_correction, scale_constant, shifted_intermediate, Calibration, CalibrationMismatch,
    SCALE_SHIFT,
};
pub use dnl::{datasheet_table, DnlTable};
#[cfg(feature = "std")]
pub use report::write_table;
pub use response::ResponseModel;

/// Number of distinct codes of a 12-bit converter.
pub const CODE_COUNT: usize = 4096;

/// Largest code a 12-bit converter can report.
pub const FULL_SCALE: u16 = 4095;
