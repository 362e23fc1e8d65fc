//! Shape recognition for color-carrying nodes and the tree walkers.
//!
//! Both the extractor and the mutator go through this module, so they
//! always agree on what counts as a color. Two record shapes are
//! recognized:
//!
//! - **Static color property**: `{"c": {"a": 0, "k": [r, g, b, a?]}}`, where
//!   `a == 0` marks a non-keyframed value and the first three entries of
//!   `k` are numbers in `0.0..=1.0`. Used by fills, strokes and similar.
//! - **Solid color**: `{"sc": "#rrggbb"}` on solid layers.

use serde_json::{Map, Value};
use tracing::warn;

use crate::color::HexColor;

/// Nesting depth past which the walkers stop descending.
///
/// Real documents are nowhere near this; it only bounds recursion on
/// pathological input.
pub const MAX_DEPTH: usize = 1024;

/// A color found on a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorNode {
    /// A static `c` property; the color is its quantized RGB.
    Static(HexColor),
    /// A solid layer's `sc` string.
    Solid(HexColor),
}

impl ColorNode {
    pub fn color(self) -> HexColor {
        match self {
            Self::Static(color) | Self::Solid(color) => color,
        }
    }
}

// ============================================================================
// Predicates
// ============================================================================

/// Returns the record's static color property, if it has one.
pub fn static_color(record: &Map<String, Value>) -> Option<HexColor> {
    let tuple = static_color_tuple(record)?;
    let channel = |i: usize| tuple[i].as_f64().unwrap_or_default();
    Some(HexColor::from_rgb_f64(channel(0), channel(1), channel(2)))
}

/// Returns the record's solid-layer color, if it has one.
pub fn solid_color(record: &Map<String, Value>) -> Option<HexColor> {
    record.get("sc")?.as_str().and_then(HexColor::parse_rrggbb)
}

/// Runs both predicates on a record, static color first.
pub fn color_nodes(record: &Map<String, Value>) -> impl Iterator<Item = ColorNode> {
    let stat = static_color(record).map(ColorNode::Static);
    let solid = solid_color(record).map(ColorNode::Solid);
    stat.into_iter().chain(solid)
}

fn static_color_tuple(record: &Map<String, Value>) -> Option<&Vec<Value>> {
    let property = record.get("c")?.as_object()?;
    if !is_static_flag(property.get("a")?) {
        return None;
    }
    let tuple = property.get("k")?.as_array()?;
    is_color_tuple(tuple).then_some(tuple)
}

fn is_static_flag(flag: &Value) -> bool {
    flag.as_f64() == Some(0.0)
}

/// Three or four entries, the first three numeric and within `0.0..=1.0`.
fn is_color_tuple(tuple: &[Value]) -> bool {
    (3..=4).contains(&tuple.len())
        && tuple[..3]
            .iter()
            .all(|v| v.as_f64().is_some_and(|n| (0.0..=1.0).contains(&n)))
}

// ============================================================================
// Rewriters
// ============================================================================

/// Replaces the RGB channels of the record's static color property.
///
/// The alpha entry, if present, is left untouched. Returns `false` when
/// the record has no static color.
pub fn set_static_color(record: &mut Map<String, Value>, color: HexColor) -> bool {
    if static_color_tuple(record).is_none() {
        return false;
    }
    let Some(tuple) = record
        .get_mut("c")
        .and_then(|c| c.get_mut("k"))
        .and_then(Value::as_array_mut)
    else {
        return false;
    };
    for (slot, channel) in tuple.iter_mut().zip(color.to_rgb_f64()) {
        *slot = Value::from(channel);
    }
    true
}

/// Replaces the record's solid-layer color string.
pub fn set_solid_color(record: &mut Map<String, Value>, color: HexColor) -> bool {
    if solid_color(record).is_none() {
        return false;
    }
    record.insert("sc".to_owned(), Value::String(color.to_string()));
    true
}

// ============================================================================
// Walkers
// ============================================================================

fn walk<'a>(value: &'a Value, depth: usize, visit: &mut impl FnMut(&'a Map<String, Value>)) {
    if depth > MAX_DEPTH {
        warn!(depth, "document nesting exceeds walker limit, skipping subtree");
        return;
    }
    match value {
        Value::Array(items) => {
            for item in items {
                walk(item, depth + 1, visit);
            }
        }
        Value::Object(record) => walk_record(record, depth, visit),
        _ => {}
    }
}

/// Visits `root` and every record reachable from it in depth-first
/// pre-order.
///
/// Sequence elements and record values are visited in document order.
pub fn visit_record_tree<'a>(
    root: &'a Map<String, Value>,
    visit: &mut impl FnMut(&'a Map<String, Value>),
) {
    walk_record(root, 0, visit);
}

fn walk_record<'a>(
    record: &'a Map<String, Value>,
    depth: usize,
    visit: &mut impl FnMut(&'a Map<String, Value>),
) {
    visit(record);
    for child in record.values() {
        walk(child, depth + 1, visit);
    }
}

fn walk_mut(value: &mut Value, depth: usize, visit: &mut impl FnMut(&mut Map<String, Value>)) {
    if depth > MAX_DEPTH {
        warn!(depth, "document nesting exceeds walker limit, skipping subtree");
        return;
    }
    match value {
        Value::Array(items) => {
            for item in items {
                walk_mut(item, depth + 1, visit);
            }
        }
        Value::Object(record) => walk_record_mut(record, depth, visit),
        _ => {}
    }
}

/// Mutable counterpart of [`visit_record_tree`].
///
/// A record is visited before its children, so children see the
/// record's rewritten values.
pub fn visit_record_tree_mut(
    root: &mut Map<String, Value>,
    visit: &mut impl FnMut(&mut Map<String, Value>),
) {
    walk_record_mut(root, 0, visit);
}

fn walk_record_mut(
    record: &mut Map<String, Value>,
    depth: usize,
    visit: &mut impl FnMut(&mut Map<String, Value>),
) {
    visit(record);
    for child in record.values_mut() {
        walk_mut(child, depth + 1, visit);
    }
}

// ============================================================================
// Tests
// ============================================================================
