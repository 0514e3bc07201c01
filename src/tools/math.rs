//! Rounding and float splitting

use crate::types::Numeric;

/// Round to `precision` decimal places, halves away from zero
///
/// Negative precision rounds to tens, hundreds, and so on.
pub fn round_f64(number: f64, precision: i32) -> f64 {
    let factor = 10f64.powi(precision);
    (number * factor).round() / factor
}

/// `f32` counterpart of [`round_f64`]
pub fn round_f32(number: f32, precision: i32) -> f32 {
    let factor = 10f32.powi(precision);
    ((number * factor) as f64).round() as f32 / factor
}

/// Shape of the parts returned by [`split_float`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    #[default]
    IntFloat,
    /// Fraction scaled by 1000 and truncated
    IntInt,
    FloatFloat,
}

/// Integer and fractional parts of a number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitFloat {
    IntFloat(i64, f64),
    IntInt(i64, i64),
    FloatFloat(f64, f64),
}

/// Split into floor and remainder
///
/// The integer part is the floor, so the fraction is always in `[0, 1)`;
/// `-1.25` splits into `-2` and `0.75`.
pub fn split_float<T: Numeric>(value: T, mode: SplitMode) -> SplitFloat {
    let value = value.to_f64();
    let int_part = value.floor();
    let frac_part = value - int_part;

    match mode {
        SplitMode::IntFloat => SplitFloat::IntFloat(int_part as i64, frac_part),
        SplitMode::IntInt => SplitFloat::IntInt(int_part as i64, (frac_part * 1000.0) as i64),
        SplitMode::FloatFloat => SplitFloat::FloatFloat(int_part, frac_part),
    }
}
