//! Static color extraction.

use std::collections::HashSet;

use tracing::debug;

use crate::color::HexColor;
use crate::document::Animation;
use crate::shape;

/// Collects every distinct static color in the document.
///
/// Colors come back in first-occurrence order of a depth-first pre-order
/// walk, each exactly once. Keyframed colors are not included.
///
/// ```
/// use lottie_retouch::{extract_colors, Animation, HexColor};
///
/// let anim = Animation::from_slice(
///     "dot.json",
///     br##"{"layers": [{"ty": 1, "sc": "#FFAA00"}]}"##,
/// )
/// .unwrap();
/// assert_eq!(extract_colors(&anim), [HexColor::new(0xff, 0xaa, 0x00)]);
/// ```
pub fn extract_colors(animation: &Animation) -> Vec<HexColor> {
    let mut seen = HashSet::new();
    let mut colors = Vec::new();

    shape::visit_record_tree(animation.root(), &mut |record| {
        for node in shape::color_nodes(record) {
            let color = node.color();
            if seen.insert(color) {
                colors.push(color);
            }
        }
    });

    debug!(count = colors.len(), "extracted static colors");
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fill(r: f64, g: f64, b: f64) -> serde_json::Value {
        json!({"ty": "fl", "c": {"a": 0, "k": [r, g, b, 1]}, "o": {"a": 0, "k": 100}})
    }

    fn two_color_doc() -> Animation {
        Animation::from_value(
            "two.json",
            json!({
                "fr": 30,
                "layers": [
                    {"ty": 4, "nm": "Red", "shapes": [{"ty": "gr", "it": [fill(1.0, 0.0, 0.0)]}]},
                    {"ty": 4, "nm": "Green", "shapes": [fill(0.0, 1.0, 0.0)]},
                    {"ty": 3, "nm": "Null"}
                ]
            }),
        )
        .unwrap()
    }

    #[test]
    fn colors_in_first_occurrence_order() {
        let colors: Vec<String> = extract_colors(&two_color_doc())
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(colors, ["#ff0000", "#00ff00"]);
    }

    #[test]
    fn duplicates_are_reported_once() {
        let anim = Animation::from_value(
            "dupes.json",
            json!({
                "layers": [
                    {"ty": 1, "sc": "#FF0000"},
                    {"shapes": [fill(1.0, 0.0, 0.0), fill(0.0, 0.0, 1.0)]},
                    {"shapes": [fill(0.0, 0.0, 1.0)]}
                ]
            }),
        )
        .unwrap();
        assert_eq!(
            extract_colors(&anim),
            [HexColor::new(255, 0, 0), HexColor::new(0, 0, 255)]
        );
    }

    #[test]
    fn colors_nested_in_assets_are_found() {
        let anim = Animation::from_value(
            "assets.json",
            json!({
                "assets": [{"id": "comp_0", "layers": [{"shapes": [fill(0.2, 0.4, 0.6)]}]}],
                "layers": [{"ty": 0, "refId": "comp_0"}]
            }),
        )
        .unwrap();
        assert_eq!(extract_colors(&anim), [HexColor::new(51, 102, 153)]);
    }

    #[test]
    fn keyframed_colors_are_skipped() {
        let anim = Animation::from_value(
            "anim.json",
            json!({"layers": [{"shapes": [{"ty": "fl", "c": {"a": 1, "k": [
                {"t": 0, "s": [1, 0, 0, 1]},
                {"t": 30, "s": [0, 0, 1, 1]}
            ]}}]}]}),
        )
        .unwrap();
        assert!(extract_colors(&anim).is_empty());
    }
}
