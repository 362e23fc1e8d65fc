//! Color extraction and replacement for plain SVG markup.
//!
//! SVG files are handled textually: only hex and `rgb()` values that
//! follow a `fill`, `stroke`, `stop-color` or `color` attribute or style
//! property are considered, and everything else in the markup is left
//! byte-for-byte intact.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::color::HexColor;

static HEX_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"((?:fill|stroke|stop-color|color)\s*[:=]\s*["']?\s*)(#[0-9a-fA-F]{3,6})\b"#)
        .expect("hex attribute regex")
});

static RGB_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:fill|stroke|stop-color|color)\s*[:=]\s*["']?\s*rgb\(\s*([0-9]+)\s*,\s*([0-9]+)\s*,\s*([0-9]+)\s*\)"#,
    )
    .expect("rgb attribute regex")
});

/// Collects the distinct colors used by fills, strokes and gradient stops.
///
/// Hex values come first, in order of appearance, followed by `rgb()`
/// values. Shorthand hex is expanded and channels of `rgb()` are clamped
/// to 255.
///
/// ```
/// use lottie_retouch::svg::extract_svg_colors;
///
/// let svg = r##"<rect fill="#F00" style="stroke: rgb(0, 0, 300)"/>"##;
/// let colors: Vec<String> = extract_svg_colors(svg).iter().map(|c| c.to_string()).collect();
/// assert_eq!(colors, ["#ff0000", "#0000ff"]);
/// ```
pub fn extract_svg_colors(markup: &str) -> Vec<HexColor> {
    let mut seen = HashSet::new();
    let mut colors = Vec::new();
    let mut push = |color: HexColor| {
        if seen.insert(color) {
            colors.push(color);
        }
    };

    for caps in HEX_ATTR.captures_iter(markup) {
        if let Ok(color) = caps[2].parse::<HexColor>() {
            push(color);
        }
    }
    for caps in RGB_ATTR.captures_iter(markup) {
        push(HexColor::new(
            clamp_channel(&caps[1]),
            clamp_channel(&caps[2]),
            clamp_channel(&caps[3]),
        ));
    }

    colors
}

fn clamp_channel(digits: &str) -> u8 {
    digits
        .parse::<u32>()
        .map_or(u8::MAX, |v| v.min(u8::MAX as u32) as u8)
}

/// Rewrites hex colors in the recognized attribute contexts.
///
/// Matching is case-insensitive and shorthand-aware, so `#F00` matches an
/// override keyed on `#ff0000`. Replacements are written in canonical
/// form. `rgb()` values are not rewritten.
pub fn apply_svg_color_overrides(
    markup: &str,
    overrides: &BTreeMap<HexColor, HexColor>,
) -> String {
    if overrides.is_empty() {
        return markup.to_owned();
    }

    HEX_ATTR
        .replace_all(markup, |caps: &Captures| {
            let replacement = caps[2]
                .parse::<HexColor>()
                .ok()
                .and_then(|color| overrides.get(&color));
            match replacement {
                Some(to) => format!("{}{}", &caps[1], to),
                None => caps[0].to_owned(),
            }
        })
        .into_owned()
}
