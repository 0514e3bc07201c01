//! Shared value types
//!
//! - [`Value`] - dynamic value for "accepts anything" entry points
//! - [`Numeric`] - bound for generic numeric helpers

mod numeric;
mod value;

pub use numeric::Numeric;
pub use value::Value;
