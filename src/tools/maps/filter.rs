use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Condition applied by [`filter_by_key`] and [`filter_by_value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCondition {
    /// Keep entries equal to the target
    EqualTo,
    /// Keep entries not equal to the target
    NotEqualTo,
    /// Keep entries greater than the target (numbers only)
    GreaterThan,
    /// Keep entries less than the target (numbers only)
    LessThan,
    /// Keep entries greater than or equal to the target (numbers only)
    GreaterThanOrEqualTo,
    /// Keep entries less than or equal to the target (numbers only)
    LessThanOrEqualTo,
    /// Keep strings containing the target (strings only)
    Contains,
    /// Keep strings not containing the target (strings only)
    NotContains,
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterCondition::EqualTo => "equal-to",
            FilterCondition::NotEqualTo => "not-equal-to",
            FilterCondition::GreaterThan => "greater-than",
            FilterCondition::LessThan => "less-than",
            FilterCondition::GreaterThanOrEqualTo => "greater-than-or-equal-to",
            FilterCondition::LessThanOrEqualTo => "less-than-or-equal-to",
            FilterCondition::Contains => "contains",
            FilterCondition::NotContains => "not-contains",
        };
        f.write_str(name)
    }
}

/// Types that can be tested against a [`FilterCondition`]
///
/// Every implementor supports equality. Numbers additionally support the
/// ordering conditions, strings support containment.
pub trait Filterable: PartialEq {
    /// Type name used in error messages
    fn type_label(&self) -> &'static str;

    /// Whether the ordering conditions apply to this type
    fn supports_ordering(&self) -> bool {
        false
    }

    /// Compare for the ordering conditions
    fn ordering(&self, _other: &Self) -> Option<Ordering> {
        None
    }

    /// String view for the containment conditions
    fn text(&self) -> Option<&str> {
        None
    }
}

macro_rules! impl_filterable_numeric {
    ($($t:ty),*) => {
        $(impl Filterable for $t {
            fn type_label(&self) -> &'static str {
                stringify!($t)
            }

            fn supports_ordering(&self) -> bool {
                true
            }

            fn ordering(&self, other: &Self) -> Option<Ordering> {
                self.partial_cmp(other)
            }
        })*
    };
}

impl_filterable_numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Filterable for String {
    fn type_label(&self) -> &'static str {
        "string"
    }

    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl Filterable for &str {
    fn type_label(&self) -> &'static str {
        "string"
    }

    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl Filterable for bool {
    fn type_label(&self) -> &'static str {
        "bool"
    }
}

impl Filterable for char {
    fn type_label(&self) -> &'static str {
        "char"
    }
}

fn unsupported<T: Filterable>(condition: FilterCondition, value: &T) -> Error {
    Error::UnsupportedFilter {
        condition: condition.to_string(),
        type_name: value.type_label().to_string(),
    }
}

/// Test one value against a condition and target
pub fn matches_condition<T: Filterable>(
    value: &T,
    condition: FilterCondition,
    target: &T,
) -> Result<bool> {
    use FilterCondition::*;

    match condition {
        EqualTo => Ok(value == target),
        NotEqualTo => Ok(value != target),
        GreaterThan | LessThan | GreaterThanOrEqualTo | LessThanOrEqualTo => {
            if !value.supports_ordering() {
                return Err(unsupported(condition, value));
            }
            // Unordered (NaN) never matches
            let Some(ord) = value.ordering(target) else {
                return Ok(false);
            };
            Ok(match condition {
                GreaterThan => ord == Ordering::Greater,
                LessThan => ord == Ordering::Less,
                GreaterThanOrEqualTo => ord != Ordering::Less,
                _ => ord != Ordering::Greater,
            })
        }
        Contains | NotContains => match (value.text(), target.text()) {
            (Some(v), Some(t)) => Ok(v.contains(t) == (condition == Contains)),
            _ => Err(unsupported(condition, value)),
        },
    }
}

/// Keep entries whose key satisfies the condition
pub fn filter_by_key<K, V>(
    map: &HashMap<K, V>,
    condition: FilterCondition,
    target: &K,
) -> Result<HashMap<K, V>>
where
    K: Filterable + Eq + Hash + Clone,
    V: Clone,
{
    let mut filtered = HashMap::new();
    for (k, v) in map {
        if matches_condition(k, condition, target)? {
            filtered.insert(k.clone(), v.clone());
        }
    }
    Ok(filtered)
}

/// Keep entries whose value satisfies the condition
pub fn filter_by_value<K, V>(
    map: &HashMap<K, V>,
    condition: FilterCondition,
    target: &V,
) -> Result<HashMap<K, V>>
where
    K: Eq + Hash + Clone,
    V: Filterable + Clone,
{
    let mut filtered = HashMap::new();
    for (k, v) in map {
        if matches_condition(v, condition, target)? {
            filtered.insert(k.clone(), v.clone());
        }
    }
    Ok(filtered)
}

/// Keep entries accepted by a predicate
pub fn custom_filter<K, V, F>(map: &HashMap<K, V>, predicate: F) -> HashMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
    F: Fn(&K, &V) -> bool,
{
    map.iter()
        .filter(|(k, v)| predicate(k, v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> HashMap<String, i32> {
        [("alice", 90), ("bob", 72), ("carol", 85), ("dave", 72)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_filter_by_value_numeric() {
        let map = scores();

        let high = filter_by_value(&map, FilterCondition::GreaterThan, &80).unwrap();
        assert_eq!(high.len(), 2);
        assert!(high.contains_key("alice") && high.contains_key("carol"));

        let at_most = filter_by_value(&map, FilterCondition::LessThanOrEqualTo, &72).unwrap();
        assert_eq!(at_most.len(), 2);

        let not_72 = filter_by_value(&map, FilterCondition::NotEqualTo, &72).unwrap();
        assert_eq!(not_72.len(), 2);
    }

    #[test]
    fn test_filter_by_key_contains() {
        let map = scores();
        let with_a = filter_by_key(&map, FilterCondition::Contains, &"a".to_string()).unwrap();
        let mut names: Vec<&String> = with_a.keys().collect();
        names.sort();
        assert_eq!(names, vec!["alice", "carol", "dave"]);

        let without_a =
            filter_by_key(&map, FilterCondition::NotContains, &"a".to_string()).unwrap();
        assert_eq!(without_a.len(), 1);
        assert!(without_a.contains_key("bob"));
    }

    #[test]
    fn test_unsupported_conditions() {
        let map = scores();
        let err = filter_by_value(&map, FilterCondition::Contains, &1).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFilter { ref type_name, .. } if type_name == "i32"));

        let err = filter_by_key(&map, FilterCondition::GreaterThan, &"b".to_string()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFilter { ref type_name, .. } if type_name == "string"));
    }

    #[test]
    fn test_nan_never_ordered() {
        assert!(!matches_condition(&f64::NAN, FilterCondition::GreaterThan, &1.0).unwrap());
        assert!(!matches_condition(&f64::NAN, FilterCondition::LessThan, &1.0).unwrap());
    }

    #[test]
    fn test_custom_filter() {
        let map = scores();
        let picked = custom_filter(&map, |k, v| k.starts_with('d') || *v > 88);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked["dave"], 72);
        assert_eq!(picked["alice"], 90);
    }
}
