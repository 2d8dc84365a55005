//! Tabulates the DNL response model and every correction formula over the
//! full code domain, for external plotting.
//!
//! Takes an optional output directory argument, defaulting to `/tmp`, and
//! prints the two independently derived scale constants for comparison.

use adc_linearizer::{
    datasheet_table, reference_correction, scale_constant, shifted_intermediate, write_table,
    Calibration, ErrorCurve, ResponseModel, FULL_SCALE,
};
use std::{env, error::Error, path::PathBuf, process};

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"));

    let mut model = ResponseModel::new(datasheet_table());

    write_table(&out_dir.join("model_resp"), |x| model.response_at(x))?;

    let mut model_err = ErrorCurve::new(|x| model.response_at(x));
    write_table(&out_dir.join("model_err"), |x| model_err.deviation(x))?;

    let reference = |model: &mut ResponseModel<8>, x| {
        reference_correction(u32::from(model.response_at(x)))
    };

    write_table(&out_dir.join("ref_corrected"), |x| reference(&mut model, x))?;

    let mut ref_err = ErrorCurve::new(|x| reference(&mut model, x));
    write_table(&out_dir.join("ref_err"), |x| ref_err.deviation(x))?;

    let full_scale_ratio =
        f64::from(reference(&mut model, FULL_SCALE)) / f64::from(FULL_SCALE);
    let mut ref_err_scaled = ErrorCurve::with_scale(|x| reference(&mut model, x), full_scale_ratio);
    write_table(&out_dir.join("ref_err_scaled"), |x| {
        ref_err_scaled.deviation(x)
    })?;

    // The constants must agree; derive() rejects any drift between the two
    // correction formulas.
    println!("{}", scale_constant(shifted_intermediate(FULL_SCALE.into())));
    println!("{}", scale_constant(reference_correction(FULL_SCALE.into())));
    let calibration = Calibration::derive()?;

    let fixed = |model: &mut ResponseModel<8>, x| {
        calibration.fixed_point_correction(u32::from(model.response_at(x)))
    };

    write_table(&out_dir.join("fixed_corrected"), |x| fixed(&mut model, x))?;

    let mut fixed_err = ErrorCurve::new(|x| fixed(&mut model, x));
    write_table(&out_dir.join("fixed_err"), |x| fixed_err.deviation(x))?;

    let mut scaled_ref_err = ErrorCurve::new(|x| {
        calibration.scaled_reference_correction(u32::from(model.response_at(x)))
    });
    write_table(&out_dir.join("scaled_ref_err"), |x| {
        scaled_ref_err.deviation(x)
    })?;

    Ok(())
}
