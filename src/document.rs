//! Animation documents as opaque JSON trees with a few recognized fields.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{RetouchError, RetouchResult};
use crate::shape;

/// Frame rate assumed when a document has none (or zero).
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

// ============================================================================
// Animation
// ============================================================================

/// A parsed animation document.
///
/// Only the top-level fields used for metadata and editing are
/// interpreted; everything else is carried through untouched, including
/// key order.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    root: Map<String, Value>,
}

impl Animation {
    /// Parses a document from JSON bytes.
    ///
    /// `name` is only used in error messages.
    pub fn from_slice(name: &str, bytes: &[u8]) -> RetouchResult<Self> {
        let value = parse_unbounded(bytes).map_err(|e| RetouchError::parse(name, e))?;
        Self::from_value(name, value)
    }

    /// Wraps an already parsed JSON value.
    ///
    /// The root must be a record; anything else is rejected.
    pub fn from_value(name: &str, value: Value) -> RetouchResult<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            Value::Array(_) => Err(RetouchError::not_an_animation(name, "root is an array")),
            _ => Err(RetouchError::not_an_animation(name, "root is not a record")),
        }
    }

    /// Returns the document root.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.root
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Serializes the document as indented JSON.
    pub fn to_json_pretty(&self) -> RetouchResult<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.root.get(key).and_then(Value::as_f64)
    }

    /// The stored `fr` field.
    pub fn frame_rate(&self) -> Option<f64> {
        self.number("fr")
    }

    pub fn frame_start(&self) -> Option<f64> {
        self.number("ip")
    }

    pub fn frame_end(&self) -> Option<f64> {
        self.number("op")
    }

    pub fn version(&self) -> Option<&str> {
        self.root.get("v").and_then(Value::as_str)
    }

    /// The top-level layer sequence, or an empty slice.
    pub fn layer_values(&self) -> &[Value] {
        self.root
            .get("layers")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn layer_values_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.root.get_mut("layers").and_then(Value::as_array_mut)
    }

    /// Number of top-level layers.
    pub fn layer_count(&self) -> usize {
        self.layer_values().len()
    }

    /// Lists the top-level layers in order.
    pub fn layers(&self) -> Vec<LayerInfo> {
        self.layer_values()
            .iter()
            .enumerate()
            .map(|(index, layer)| LayerInfo::from_value(index, layer))
            .collect()
    }

    /// Returns `true` if any record in the document carries an expression.
    pub fn has_expressions(&self) -> bool {
        let mut found = false;
        shape::visit_record_tree(&self.root, &mut |record| {
            found |= record.contains_key("x");
        });
        found
    }

    /// Summarizes the document for display.
    pub fn meta(&self) -> AnimationMeta {
        let frame_rate = self
            .frame_rate()
            .filter(|fr| *fr != 0.0)
            .unwrap_or(DEFAULT_FRAME_RATE);
        let total_frames = self.frame_end().unwrap_or(0.0) - self.frame_start().unwrap_or(0.0);

        AnimationMeta {
            version: self.version().unwrap_or("unknown").to_owned(),
            frame_rate,
            total_frames,
            duration: total_frames / frame_rate,
            width: self.number("w").unwrap_or(0.0),
            height: self.number("h").unwrap_or(0.0),
            layer_count: self.layer_count(),
            has_expressions: self.has_expressions(),
        }
    }
}

/// Parses JSON without serde_json's nesting limit.
///
/// Deeply nested shape groups are legal. The stacker grows the stack on
/// demand, leaving the walkers' [`MAX_DEPTH`](crate::MAX_DEPTH) as the
/// only bound.
fn parse_unbounded(bytes: &[u8]) -> serde_json::Result<Value> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

// ============================================================================
// Metadata
// ============================================================================

/// Derived document metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationMeta {
    /// The `v` field, or `"unknown"`.
    pub version: String,
    /// Frames per second; falls back to [`DEFAULT_FRAME_RATE`].
    pub frame_rate: f64,
    /// `op - ip`.
    pub total_frames: f64,
    /// Seconds, `total_frames / frame_rate`.
    pub duration: f64,
    pub width: f64,
    pub height: f64,
    pub layer_count: usize,
    pub has_expressions: bool,
}

// ============================================================================
// Layers
// ============================================================================

/// Layer type from the `ty` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Precomp,
    Solid,
    Image,
    Null,
    Shape,
    /// Any other type code (text, audio, camera, ...), or `-1` if missing.
    Other(i64),
}

impl LayerKind {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Precomp,
            1 => Self::Solid,
            2 => Self::Image,
            3 => Self::Null,
            4 => Self::Shape,
            other => Self::Other(other),
        }
    }

    /// Short label for layer lists.
    pub fn label(self) -> String {
        match self {
            Self::Precomp => "Pre".to_owned(),
            Self::Solid => "Solid".to_owned(),
            Self::Image => "Image".to_owned(),
            Self::Null => "Null".to_owned(),
            Self::Shape => "Shape".to_owned(),
            Self::Other(code) => format!("T{code}"),
        }
    }
}

/// A top-level layer, identified by its position.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerInfo {
    pub index: usize,
    /// The `nm` field, if present and non-empty.
    pub name: Option<String>,
    pub kind: LayerKind,
}

impl LayerInfo {
    fn from_value(index: usize, layer: &Value) -> Self {
        let name = layer
            .get("nm")
            .and_then(Value::as_str)
            .filter(|nm| !nm.is_empty())
            .map(str::to_owned);
        let kind = LayerKind::from_code(layer.get("ty").and_then(Value::as_i64).unwrap_or(-1));
        Self { index, name, kind }
    }

    /// The name, or a 1-based positional placeholder.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Layer {}", self.index + 1))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Animation {
        Animation::from_value(
            "sample.json",
            json!({
                "v": "5.7.4",
                "fr": 60,
                "ip": 0,
                "op": 90,
                "w": 512,
                "h": 256,
                "layers": [
                    {"ty": 4, "nm": "Circle"},
                    {"ty": 1, "sc": "#ff0000"},
                    {"ty": 13, "nm": ""}
                ]
            }),
        )
        .unwrap()
    }

    #[test]
    fn meta_reads_recognized_fields() {
        let meta = sample().meta();
        assert_eq!(meta.version, "5.7.4");
        assert_eq!(meta.frame_rate, 60.0);
        assert_eq!(meta.total_frames, 90.0);
        assert_eq!(meta.duration, 1.5);
        assert_eq!((meta.width, meta.height), (512.0, 256.0));
        assert_eq!(meta.layer_count, 3);
        assert!(!meta.has_expressions);
    }

    #[test]
    fn meta_defaults_for_missing_fields() {
        let anim = Animation::from_value("empty.json", json!({"fr": 0, "op": 15})).unwrap();
        let meta = anim.meta();
        assert_eq!(meta.version, "unknown");
        assert_eq!(meta.frame_rate, DEFAULT_FRAME_RATE);
        assert_eq!(meta.duration, 0.5);
        assert_eq!(meta.layer_count, 0);
    }

    #[test]
    fn expressions_are_detected_anywhere() {
        let anim = Animation::from_value(
            "expr.json",
            json!({"layers": [{"ks": {"o": {"a": 0, "k": 100, "x": "value * 2"}}}]}),
        )
        .unwrap();
        assert!(anim.meta().has_expressions);
    }

    #[test]
    fn layers_have_kinds_and_display_names() {
        let layers = sample().layers();
        assert_eq!(layers[0].display_name(), "Circle");
        assert_eq!(layers[0].kind.label(), "Shape");
        assert_eq!(layers[1].display_name(), "Layer 2");
        assert_eq!(layers[1].kind, LayerKind::Solid);
        assert_eq!(layers[2].display_name(), "Layer 3");
        assert_eq!(layers[2].kind.label(), "T13");
    }

    #[test]
    fn rejects_non_record_roots() {
        assert!(matches!(
            Animation::from_slice("list.json", b"[1, 2]"),
            Err(RetouchError::NotAnAnimation { .. })
        ));
        assert!(matches!(
            Animation::from_slice("bad.json", b"{\"fr\": "),
            Err(RetouchError::Parse { .. })
        ));
    }

    fn nested_groups(depth: usize) -> String {
        let mut group = r#"{"ty": "fl", "c": {"a": 0, "k": [0, 0, 1, 1]}}"#.to_owned();
        for _ in 0..depth {
            group = format!(r#"{{"ty": "gr", "it": [{group}]}}"#);
        }
        format!(r#"{{"fr": 30, "layers": [{{"ty": 4, "shapes": [{group}]}}]}}"#)
    }

    #[test]
    fn deeply_nested_groups_load() {
        let text = nested_groups(70);
        let anim = Animation::from_slice("deep.json", text.as_bytes()).unwrap();
        assert_eq!(anim.layer_count(), 1);
        assert_eq!(
            crate::extract_colors(&anim),
            [crate::HexColor::new(0, 0, 255)]
        );
    }

    #[test]
    fn trailing_garbage_is_still_rejected() {
        assert!(matches!(
            Animation::from_slice("tail.json", b"{\"fr\": 30} {"),
            Err(RetouchError::Parse { .. })
        ));
    }

    #[test]
    fn pretty_output_preserves_unknown_fields_and_order() {
        let text = r#"{"zz":1,"v":"5.0","custom":{"keep":[1,2,3]},"layers":[]}"#;
        let anim = Animation::from_slice("a.json", text.as_bytes()).unwrap();
        let out = anim.to_json_pretty().unwrap();
        assert!(out.find("\"zz\"").unwrap() < out.find("\"custom\"").unwrap());

        let reparsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(reparsed, serde_json::from_str::<Value>(text).unwrap());
    }
}
