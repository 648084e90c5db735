//! Dotted-path access into JSON parameter trees.
//!
//! Paths are `.`-separated segments. A segment that parses as an unsigned
//! integer indexes into arrays; every other segment is an object key.

use serde_json::{Map, Value};

/// Splits a dotted path into its segments, dropping empty segments.
///
/// # Examples
///
/// ```
/// use paramguard::domain::split_path;
///
/// assert_eq!(split_path("query.age"), vec!["query", "age"]);
/// assert_eq!(split_path("age"), vec!["age"]);
/// assert!(split_path("").is_empty());
/// ```
#[must_use]
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('.').filter(|segment| !segment.is_empty()).collect()
}

/// Reads the value at `segments`, returning `None` when any segment is
/// absent. An empty path addresses nothing.
#[must_use]
pub fn read_path<'a, S: AsRef<str>>(root: &'a Value, segments: &[S]) -> Option<&'a Value> {
    if segments.is_empty() {
        return None;
    }
    segments
        .iter()
        .try_fold(root, |current, segment| step(current, segment.as_ref()))
}

/// Writes `value` at `segments`, creating intermediate objects as needed.
///
/// Scalars met along the way are replaced by empty objects, so the write
/// always lands. Array segments may address an existing slot or append at
/// the current length. An empty path replaces the root.
pub fn write_path<S: AsRef<str>>(root: &mut Value, segments: &[S], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *root = value;
        return;
    };
    let head = first.as_ref();

    if let Value::Array(items) = root
        && let Ok(index) = head.parse::<usize>()
        && index == items.len()
    {
        items.push(Value::Null);
    }

    if !addresses_array_slot(root, head) && !root.is_object() {
        *root = Value::Object(Map::new());
    }

    let child = match root {
        Value::Array(items) => head
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get_mut(index)),
        Value::Object(map) => Some(map.entry(head.to_owned()).or_insert(Value::Null)),
        _ => None,
    };

    if let Some(slot) = child {
        write_path(slot, rest, value);
    }
}

fn addresses_array_slot(value: &Value, segment: &str) -> bool {
    match value {
        Value::Array(items) => segment
            .parse::<usize>()
            .is_ok_and(|index| index < items.len()),
        _ => false,
    }
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index)),
        _ => None,
    }
}
