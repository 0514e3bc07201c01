//! Type coercion
//!
//! Loose conversions from any [`Value`] (or anything convertible into one)
//! to primitive types. Strings are trimmed before parsing.

use crate::error::{Error, Result};
use crate::types::Value;

/// Convert to `f64`
///
/// Numbers convert directly; strings are parsed as floats.
pub fn parse_f64(value: impl Into<Value>) -> Result<f64> {
    let value = value.into();
    match &value {
        Value::Int(n) => Ok(*n as f64),
        Value::UInt(n) => Ok(*n as f64),
        Value::Float(f) => Ok(*f),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::type_error("float", format!("string {:?}", s))),
        other => Err(Error::type_error("float", other.type_name())),
    }
}

/// Convert to `f32` (through [`parse_f64`])
pub fn parse_f32(value: impl Into<Value>) -> Result<f32> {
    parse_f64(value).map(|f| f as f32)
}

fn truncate_float(f: f64) -> Result<i64> {
    if !f.is_finite() || f >= i64::MAX as f64 || f < i64::MIN as f64 {
        return Err(Error::OutOfRange {
            target: "int".to_string(),
            value: f.to_string(),
        });
    }
    Ok(f.trunc() as i64)
}

/// Convert to `i64`
///
/// Floats are truncated toward zero. Strings are parsed as integers first,
/// then as floats (and truncated).
pub fn parse_int(value: impl Into<Value>) -> Result<i64> {
    let value = value.into();
    match &value {
        Value::Int(n) => Ok(*n),
        Value::UInt(n) => i64::try_from(*n).map_err(|_| Error::OutOfRange {
            target: "int".to_string(),
            value: n.to_string(),
        }),
        Value::Float(f) => truncate_float(*f),
        Value::String(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<i64>() {
                Ok(n) => Ok(n),
                Err(_) => match trimmed.parse::<f64>() {
                    Ok(f) => truncate_float(f),
                    Err(_) => Err(Error::type_error("int", format!("string {:?}", s))),
                },
            }
        }
        other => Err(Error::type_error("int", other.type_name())),
    }
}

/// Convert to `bool`
///
/// Accepts `true/1/yes/on` and `false/0/no/off` (case-insensitive), other
/// numeric strings, and numbers; non-zero is `true`.
pub fn parse_bool(value: impl Into<Value>) -> Result<bool> {
    let value = value.into();
    match &value {
        Value::Bool(b) => Ok(*b),
        Value::Int(n) => Ok(*n != 0),
        Value::UInt(n) => Ok(*n != 0),
        Value::Float(f) => Ok(*f != 0.0),
        Value::String(s) => {
            let normalized = s.trim().to_lowercase();
            match normalized.as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => normalized
                    .parse::<f64>()
                    .map(|n| n != 0.0)
                    .map_err(|_| Error::type_error("bool", format!("string {:?}", s))),
            }
        }
        other => Err(Error::type_error("bool", other.type_name())),
    }
}

/// Render any value as a string
pub fn to_string(value: impl Into<Value>) -> String {
    value.into().to_string()
}
