/// Primitive numeric types usable by the slice and math helpers
///
/// Implemented for every built-in integer and float type. Conversions go
/// through `f64`, so very large 64-bit integers lose precision in `to_f64`.
pub trait Numeric: Copy + PartialOrd + Send + Sync + 'static {
    /// Widen to `f64`
    fn to_f64(self) -> f64;

    /// Narrow from `f64` using `as` semantics (truncating, saturating)
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_numeric {
    ($($t:ty),*) => {
        $(impl Numeric for $t {
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
        })*
    };
}

impl_numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_small_values() {
        assert_eq!(i32::from_f64(7i32.to_f64()), 7);
        assert_eq!(u8::from_f64(300.0), u8::MAX);
        assert_eq!(f32::from_f64(1.5), 1.5f32);
    }
}
