//! Slice helpers
//!
//! Generic helpers work on any element type with the needed bounds; the
//! numeric helpers require [`Numeric`].

use crate::error::{Error, Result};
use crate::types::Numeric;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

/// Distinct elements, in order of first occurrence
pub fn unique<T: Eq + Hash + Clone>(slice: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(slice.len());
    slice
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Reverse in place
pub fn reverse<T>(slice: &mut [T]) {
    slice.reverse();
}

/// Index of the first element equal to `target`
pub fn find_first<T: PartialEq>(slice: &[T], target: &T) -> Option<usize> {
    slice.iter().position(|item| item == target)
}

/// Indices of every element equal to `target`
pub fn find_all<T: PartialEq>(slice: &[T], target: &T) -> Vec<usize> {
    slice
        .iter()
        .enumerate()
        .filter(|(_, item)| *item == target)
        .map(|(i, _)| i)
        .collect()
}

pub fn contains<T: PartialEq>(slice: &[T], target: &T) -> bool {
    find_first(slice, target).is_some()
}

/// Insert `values` so the first of them lands at `index`
///
/// Negative indices count from the end: `-1` appends, `-2` inserts before
/// the last element.
pub fn insert_at<T: Clone>(slice: &[T], index: isize, values: &[T]) -> Result<Vec<T>> {
    let len = slice.len();
    let resolved = if index < 0 {
        len as isize + index + 1
    } else {
        index
    };
    if resolved < 0 || resolved as usize > len {
        return Err(Error::IndexOutOfBounds { index, length: len });
    }

    let at = resolved as usize;
    let mut out = Vec::with_capacity(len + values.len());
    out.extend_from_slice(&slice[..at]);
    out.extend_from_slice(values);
    out.extend_from_slice(&slice[at..]);
    Ok(out)
}

/// Copy of `slice` without the element at `index`
///
/// Negative indices count from the end: `-1` is the last element.
pub fn remove_at<T: Clone>(slice: &[T], index: isize) -> Result<Vec<T>> {
    let len = slice.len();
    let resolved = if index < 0 {
        len as isize + index
    } else {
        index
    };
    if resolved < 0 || resolved as usize >= len {
        return Err(Error::IndexOutOfBounds { index, length: len });
    }

    let at = resolved as usize;
    let mut out = Vec::with_capacity(len - 1);
    out.extend_from_slice(&slice[..at]);
    out.extend_from_slice(&slice[at + 1..]);
    Ok(out)
}

/// Copy of `slice` without any element equal to one of `targets`
pub fn remove_all<T: PartialEq + Clone>(slice: &[T], targets: &[T]) -> Vec<T> {
    slice
        .iter()
        .filter(|item| !targets.contains(item))
        .cloned()
        .collect()
}

/// Arbitrarily nested list of `T`
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    Item(T),
    List(Vec<Nested<T>>),
}

impl<T> From<T> for Nested<T> {
    fn from(item: T) -> Self {
        Nested::Item(item)
    }
}

/// Flatten nested lists depth-first, preserving order
pub fn flatten<T: Clone>(nested: &[Nested<T>]) -> Vec<T> {
    fn walk<T: Clone>(nodes: &[Nested<T>], out: &mut Vec<T>) {
        for node in nodes {
            match node {
                Nested::Item(item) => out.push(item.clone()),
                Nested::List(children) => walk(children, out),
            }
        }
    }

    let mut out = Vec::new();
    walk(nested, &mut out);
    out
}

/// Split off the last element
///
/// Returns the element and a copy of the rest.
pub fn pop_from<T: Clone>(slice: &[T]) -> Result<(T, Vec<T>)> {
    match slice.split_last() {
        Some((last, rest)) => Ok((last.clone(), rest.to_vec())),
        None => Err(Error::EmptyCollection {
            operation: "pop_from".to_string(),
        }),
    }
}

fn empty(operation: &str) -> Error {
    Error::EmptyCollection {
        operation: operation.to_string(),
    }
}

/// Largest element
///
/// NaN never replaces the current maximum.
pub fn max<T: Numeric>(slice: &[T]) -> Result<T> {
    let (first, rest) = slice.split_first().ok_or_else(|| empty("max"))?;
    Ok(rest
        .iter()
        .fold(*first, |best, &v| if v > best { v } else { best }))
}

/// Smallest element
pub fn min<T: Numeric>(slice: &[T]) -> Result<T> {
    let (first, rest) = slice.split_first().ok_or_else(|| empty("min"))?;
    Ok(rest
        .iter()
        .fold(*first, |best, &v| if v < best { v } else { best }))
}

/// Arithmetic mean, computed in `f64`
pub fn average<T: Numeric>(slice: &[T]) -> Result<f64> {
    if slice.is_empty() {
        return Err(empty("average"));
    }
    let sum: f64 = slice.iter().map(|v| v.to_f64()).sum();
    Ok(sum / slice.len() as f64)
}

/// Direction for [`sort`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sort numbers in place
///
/// Unordered values (NaN) compare as equal, so their position is unspecified.
pub fn sort<T: Numeric>(slice: &mut [T], order: SortOrder) {
    let cmp = |a: &T, b: &T| a.partial_cmp(b).unwrap_or(Ordering::Equal);
    match order {
        SortOrder::Ascending => slice.sort_by(cmp),
        SortOrder::Descending => slice.sort_by(|a, b| cmp(b, a)),
    }
}
